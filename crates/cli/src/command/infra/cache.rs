use crate::command::context::ProjectContext;
use atlas_indexer::{
    ArtifactKind, ArtifactStore, CacheGate, CacheStatus, DependencyGraph, StaleReason,
};
use atlas_project::ProjectMap;
use std::path::{Path, PathBuf};

/// A project map together with how it was obtained.
pub struct MapSnapshot {
    pub map: ProjectMap,
    pub cache_hit: bool,
    pub stale_reasons: Vec<StaleReason>,
    /// Set when a rebuilt map could not be written back.
    pub persist_error: Option<String>,
}

/// Cache Gate and artifact store for one project root.
pub struct MapCacheAdapter {
    root: PathBuf,
    gate: CacheGate,
    store: ArtifactStore,
}

impl MapCacheAdapter {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            gate: CacheGate::new().with_hook(ArtifactStore::new(root)),
            store: ArtifactStore::new(root),
        }
    }

    pub fn gate(&self) -> &CacheGate {
        &self.gate
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    pub fn status(&self) -> CacheStatus {
        self.gate.check(&self.root)
    }

    pub fn invalidate(&self) {
        self.gate.invalidate(&self.root);
    }

    pub fn load_graph(&self) -> Option<DependencyGraph> {
        self.store.load(ArtifactKind::Graph)
    }

    /// Reuse `map.json` when the gate says the tree is unchanged, otherwise
    /// scan, classify and persist a new map. The recorded fingerprint comes
    /// from the same walk the map was built from.
    pub fn load_or_build(&self, project: &ProjectContext, force: bool) -> MapSnapshot {
        let status = self.status();
        if status.fresh && !force {
            if let Some(map) = self.store.load::<ProjectMap>(ArtifactKind::Map) {
                if let Err(err) = self.gate.mark_checked(&self.root) {
                    log::debug!("Failed to bump cache check time: {err}");
                }
                return MapSnapshot {
                    map,
                    cache_hit: true,
                    stale_reasons: Vec::new(),
                    persist_error: None,
                };
            }
            log::info!("Cache metadata is fresh but map.json is unusable; rebuilding");
        }

        let tree = self.gate.snapshot(&self.root);
        let map = ProjectMap::build(&project.resolver(), &tree.relative_files());

        let persist_error = self
            .store
            .save(ArtifactKind::Map, &map)
            .and_then(|()| {
                self.gate
                    .record_fingerprint(&self.root, tree.fingerprint)
                    .map(|_| ())
            })
            .err()
            .map(|err| {
                log::warn!("Failed to write map cache: {err}");
                format!("Failed to write map cache: {err}")
            });

        MapSnapshot {
            map,
            cache_hit: false,
            stale_reasons: status.reasons,
            persist_error,
        }
    }
}
