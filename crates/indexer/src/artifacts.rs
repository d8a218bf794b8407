use crate::layout::cache_dir;
use crate::persist::{read_json, unix_now_ms, write_json_atomic, JsonRead};
use crate::{InvalidationHook, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

/// Bumped whenever the envelope or any payload changes shape.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Graph,
    Map,
    DeadCode,
    Symbols,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Graph,
        ArtifactKind::Map,
        ArtifactKind::DeadCode,
        ArtifactKind::Symbols,
    ];

    pub const fn file_name(self) -> &'static str {
        match self {
            ArtifactKind::Graph => "graph.json",
            ArtifactKind::Map => "map.json",
            ArtifactKind::DeadCode => "dead.json",
            ArtifactKind::Symbols => "symbols.json",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Graph => "graph",
            ArtifactKind::Map => "map",
            ArtifactKind::DeadCode => "dead_code",
            ArtifactKind::Symbols => "symbols",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-describing wrapper written around every artifact payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactEnvelope<T> {
    pub format_version: u32,
    pub kind: ArtifactKind,
    pub saved_at_unix_ms: u64,
    pub data: T,
}

/// Import graph snapshot: file -> files it imports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub edges: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.edges.entry(from.into()).or_default().insert(to.into());
    }

    pub fn dependencies_of(&self, file: &str) -> Vec<&str> {
        self.edges
            .get(file)
            .map(|targets| targets.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Files that import `file` directly.
    pub fn dependents_of(&self, file: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|(_, targets)| targets.contains(file))
            .map(|(source, _)| source.as_str())
            .collect()
    }
}

/// Reads and writes artifact snapshots under `<root>/.atlas/cache/`.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: &Path) -> Self {
        Self {
            dir: cache_dir(root),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, kind: ArtifactKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    pub fn save<T: Serialize>(&self, kind: ArtifactKind, data: &T) -> Result<()> {
        let envelope = ArtifactEnvelope {
            format_version: ARTIFACT_FORMAT_VERSION,
            kind,
            saved_at_unix_ms: unix_now_ms(),
            data,
        };
        write_json_atomic(&self.path_for(kind), &envelope)?;
        log::debug!("Saved {kind} artifact");
        Ok(())
    }

    /// `None` on a missing, unreadable or foreign-version artifact.
    pub fn load<T: DeserializeOwned>(&self, kind: ArtifactKind) -> Option<T> {
        let path = self.path_for(kind);
        let envelope: ArtifactEnvelope<T> = match read_json(&path) {
            JsonRead::Found(envelope) => envelope,
            JsonRead::Missing => return None,
            JsonRead::Corrupt(reason) => {
                log::debug!("Ignoring unreadable {}: {reason}", path.display());
                return None;
            }
        };
        if envelope.format_version != ARTIFACT_FORMAT_VERSION || envelope.kind != kind {
            log::debug!(
                "Ignoring {} (format {}, kind {})",
                path.display(),
                envelope.format_version,
                envelope.kind
            );
            return None;
        }
        Some(envelope.data)
    }

    /// Remove every artifact file; returns how many were deleted.
    pub fn remove_all(&self) -> Result<usize> {
        let mut removed = 0;
        for kind in ArtifactKind::ALL {
            match std::fs::remove_file(self.path_for(kind)) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(removed)
    }
}

impl InvalidationHook for ArtifactStore {
    fn name(&self) -> &str {
        "artifact-store"
    }

    /// Clears the directory this store was built for; `root` is not consulted.
    fn clear(&self, _root: &Path) -> anyhow::Result<()> {
        let removed = self.remove_all()?;
        log::info!("Removed {removed} cached artifacts from {}", self.dir.display());
        Ok(())
    }
}
