use crate::classifier::classify;
use crate::config::{AreaDefinition, ProjectConfig};
use crate::error::{ProjectError, Result};
use crate::infer::{infer_areas, infer_description, normalize_relative};
use crate::names::{builtin_by_id, fold, lookup_builtin};
use globset::{GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub type AreaId = String;

/// Summary of one area as seen in a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaInfo {
    pub id: AreaId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub auto_detected: bool,
    pub file_count: usize,
}

/// File <-> area relation for one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaIndex {
    pub by_file: BTreeMap<String, BTreeSet<AreaId>>,
    /// Inverse of `by_file`.
    pub by_area: BTreeMap<AreaId, Vec<String>>,
    pub areas: BTreeMap<AreaId, AreaInfo>,
}

impl AreaIndex {
    pub fn files_in(&self, area: &str) -> &[String] {
        self.by_area.get(area).map_or(&[], Vec::as_slice)
    }

    pub fn areas_of(&self, file: &str) -> Option<&BTreeSet<AreaId>> {
        self.by_file.get(file)
    }

    /// Areas ordered by member count (largest first), then id.
    pub fn by_population(&self) -> Vec<&AreaInfo> {
        let mut infos: Vec<&AreaInfo> = self.areas.values().collect();
        infos.sort_by(|a, b| b.file_count.cmp(&a.file_count).then_with(|| a.id.cmp(&b.id)));
        infos
    }
}

enum AreaRule {
    Glob(GlobMatcher),
    /// Folded substring of the file name.
    Name(String),
}

impl AreaRule {
    fn compile(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.contains(['/', '*', '?', '[']) {
            let glob = GlobBuilder::new(trimmed)
                .case_insensitive(true)
                .literal_separator(false)
                .build()
                .map_err(|source| ProjectError::InvalidPattern {
                    pattern: trimmed.to_string(),
                    source,
                })?;
            return Ok(AreaRule::Glob(glob.compile_matcher()));
        }
        Ok(AreaRule::Name(fold(trimmed)))
    }

    fn matches(&self, path: &str, folded_name: &str) -> bool {
        match self {
            AreaRule::Glob(matcher) => matcher.is_match(path),
            AreaRule::Name(needle) => !needle.is_empty() && folded_name.contains(needle.as_str()),
        }
    }
}

struct ExplicitArea {
    id: AreaId,
    name: Option<String>,
    description: Option<String>,
    rules: Vec<AreaRule>,
}

impl ExplicitArea {
    fn compile(id: &str, definition: &AreaDefinition) -> Self {
        let rules = definition
            .rules
            .iter()
            .filter_map(|raw| match AreaRule::compile(raw) {
                Ok(rule) => Some(rule),
                Err(err) => {
                    log::warn!("Skipping rule for area '{id}': {err}");
                    None
                }
            })
            .collect();
        Self {
            id: id.to_string(),
            name: definition.name.clone(),
            description: definition.description.clone(),
            rules,
        }
    }
}

/// Area assignment for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaAssignment {
    pub ids: Vec<AreaId>,
    /// `true` when the ids came from path inference rather than config.
    pub auto_detected: bool,
}

/// Maps files to areas using explicit configuration first and path
/// inference second.
pub struct AreaResolver {
    explicit: Vec<ExplicitArea>,
    ignore: GlobSet,
    descriptions: BTreeMap<String, String>,
    auto_describe: bool,
}

impl AreaResolver {
    pub fn new(config: &ProjectConfig) -> Self {
        let explicit = config
            .areas
            .iter()
            .map(|(id, definition)| ExplicitArea::compile(id, definition))
            .collect();

        let mut ignore = GlobSetBuilder::new();
        for pattern in &config.ignore {
            let glob = GlobBuilder::new(pattern.trim())
                .case_insensitive(true)
                .literal_separator(false)
                .build();
            match glob {
                Ok(glob) => {
                    ignore.add(glob);
                }
                Err(err) => log::warn!("Skipping ignore pattern '{pattern}': {err}"),
            }
        }
        let ignore = ignore.build().unwrap_or_else(|err| {
            log::warn!("Failed to compile ignore patterns: {err}");
            GlobSet::empty()
        });

        let descriptions = config
            .descriptions
            .iter()
            .map(|(path, text)| (normalize_relative(path), text.clone()))
            .collect();

        Self {
            explicit,
            ignore,
            descriptions,
            auto_describe: config.auto_describe,
        }
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        self.ignore.is_match(normalize_relative(path))
    }

    /// Areas for `path`, with how they were obtained.
    pub fn assign(&self, path: &str) -> AreaAssignment {
        if self.is_ignored(path) {
            return AreaAssignment::default();
        }

        let normalized = normalize_relative(path);
        let folded_name = fold(normalized.rsplit('/').next().unwrap_or_default());
        let ids: Vec<AreaId> = self
            .explicit
            .iter()
            .filter(|area| area.rules.iter().any(|rule| rule.matches(&normalized, &folded_name)))
            .map(|area| area.id.clone())
            .collect();
        if !ids.is_empty() {
            return AreaAssignment {
                ids,
                auto_detected: false,
            };
        }

        AreaAssignment {
            ids: infer_areas(&normalized),
            auto_detected: true,
        }
    }

    /// Deduplicated area ids for `path`; order is not significant.
    pub fn resolve_areas(&self, path: &str) -> Vec<AreaId> {
        self.assign(path).ids
    }

    /// Resolve free text to an area id.
    ///
    /// Tried in order: exact configured id, configured friendly name,
    /// built-in name table, substring of a configured id, substring of an
    /// inferred id. Falls back to the input itself.
    pub fn resolve_area_reference<S: AsRef<str>>(&self, input: &str, all_files: &[S]) -> AreaId {
        let trimmed = input.trim();
        let folded = fold(trimmed);
        if folded.is_empty() {
            return input.to_string();
        }

        if let Some(area) = self.explicit.iter().find(|area| area.id == trimmed) {
            return area.id.clone();
        }

        if let Some(area) = self
            .explicit
            .iter()
            .find(|area| area.name.as_deref().is_some_and(|name| fold(name) == folded))
        {
            return area.id.clone();
        }

        if let Some(builtin) = lookup_builtin(trimmed) {
            return builtin.id.to_string();
        }

        if let Some(area) = self
            .explicit
            .iter()
            .find(|area| fold(&area.id).contains(&folded))
        {
            return area.id.clone();
        }

        let inferred: BTreeSet<AreaId> = all_files
            .iter()
            .map(|file| file.as_ref())
            .filter(|path| !self.is_ignored(path))
            .flat_map(infer_areas)
            .collect();
        if let Some(id) = inferred.into_iter().find(|id| fold(id).contains(&folded)) {
            return id;
        }

        log::debug!("Area reference '{trimmed}' did not resolve; using it verbatim");
        input.to_string()
    }

    /// Explicit override first, inferred one-liner second (unless disabled).
    pub fn describe(&self, path: &str) -> Option<String> {
        let normalized = normalize_relative(path);
        if let Some(text) = self.descriptions.get(&normalized) {
            return Some(text.clone());
        }
        if !self.auto_describe {
            return None;
        }
        Some(infer_description(&normalized, classify(&normalized)))
    }

    fn area_info(&self, id: &str, auto_detected: bool, file_count: usize) -> AreaInfo {
        let explicit = self.explicit.iter().find(|area| area.id == id);
        let builtin = builtin_by_id(id);
        let name = explicit
            .and_then(|area| area.name.clone())
            .or_else(|| builtin.map(|b| b.name.to_string()))
            .unwrap_or_else(|| title_case(id));
        AreaInfo {
            id: id.to_string(),
            name,
            description: explicit.and_then(|area| area.description.clone()),
            auto_detected,
            file_count,
        }
    }

    /// Build both directions of the file/area relation, skipping ignored
    /// files. Built fresh on every call.
    pub fn build_index<S: AsRef<str>>(&self, files: &[S]) -> AreaIndex {
        let mut by_file: BTreeMap<String, BTreeSet<AreaId>> = BTreeMap::new();
        let mut auto_flags: BTreeMap<AreaId, bool> = BTreeMap::new();

        for file in files {
            let path = normalize_relative(file.as_ref());
            if self.is_ignored(&path) {
                continue;
            }
            let assignment = self.assign(&path);
            for id in &assignment.ids {
                let auto = auto_flags.entry(id.clone()).or_insert(true);
                *auto &= assignment.auto_detected;
            }
            by_file.insert(path, assignment.ids.into_iter().collect());
        }

        let mut by_area: BTreeMap<AreaId, Vec<String>> = BTreeMap::new();
        for (file, ids) in &by_file {
            for id in ids {
                by_area.entry(id.clone()).or_default().push(file.clone());
            }
        }

        let areas = by_area
            .iter()
            .map(|(id, members)| {
                let auto = auto_flags.get(id).copied().unwrap_or(true);
                (id.clone(), self.area_info(id, auto, members.len()))
            })
            .collect();

        AreaIndex {
            by_file,
            by_area,
            areas,
        }
    }
}

fn title_case(id: &str) -> String {
    id.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
