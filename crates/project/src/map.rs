use crate::areas::{AreaId, AreaInfo, AreaResolver};
use crate::classifier::{classify, FileCategory};
use crate::infer::normalize_relative;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One classified file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEntry {
    pub path: String,
    pub category: FileCategory,
    pub areas: BTreeSet<AreaId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Snapshot of a scanned project: every non-ignored file with its category,
/// areas and description. This is what gets persisted as the map artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMap {
    pub files: Vec<MapEntry>,
    pub categories: BTreeMap<FileCategory, usize>,
    pub areas: Vec<AreaInfo>,
}

impl ProjectMap {
    pub fn build<S: AsRef<str>>(resolver: &AreaResolver, files: &[S]) -> Self {
        let index = resolver.build_index(files);

        let mut categories: BTreeMap<FileCategory, usize> = BTreeMap::new();
        let entries: Vec<MapEntry> = index
            .by_file
            .iter()
            .map(|(path, areas)| {
                let category = classify(path);
                *categories.entry(category).or_default() += 1;
                MapEntry {
                    path: path.clone(),
                    category,
                    areas: areas.clone(),
                    description: resolver.describe(path),
                }
            })
            .collect();

        let areas = index.by_population().into_iter().cloned().collect();

        log::info!(
            "Mapped {} files into {} areas",
            entries.len(),
            index.areas.len()
        );

        Self {
            files: entries,
            categories,
            areas,
        }
    }

    pub fn entry(&self, path: &str) -> Option<&MapEntry> {
        let normalized = normalize_relative(path);
        self.files.iter().find(|entry| entry.path == normalized)
    }

    pub fn area(&self, id: &str) -> Option<&AreaInfo> {
        self.areas.iter().find(|area| area.id == id)
    }

    pub fn area_files(&self, id: &str) -> Vec<&MapEntry> {
        self.files
            .iter()
            .filter(|entry| entry.areas.contains(id))
            .collect()
    }

    pub fn file_paths(&self) -> Vec<&str> {
        self.files.iter().map(|entry| entry.path.as_str()).collect()
    }

    /// `(id, file_count)` pairs, largest area first.
    pub fn area_counts(&self) -> Vec<(&str, usize)> {
        self.areas
            .iter()
            .map(|area| (area.id.as_str(), area.file_count))
            .collect()
    }
}
