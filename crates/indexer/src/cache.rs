use crate::fingerprint::CacheFingerprint;
use crate::layout::{meta_path, CONFIG_FILE};
use crate::meta::{assess_staleness, CacheMeta, CacheStatus, SCHEMA_VERSION, TOOL_VERSION};
use crate::persist::{read_json, unix_now_ms, write_json_atomic, JsonRead};
use crate::scanner::{FileScanner, ScannedFile, MAX_WALK_DEPTH};
use crate::Result;
use std::path::{Path, PathBuf};

/// External cache notified when the gate invalidates a project.
pub trait InvalidationHook {
    fn name(&self) -> &str;
    fn clear(&self, root: &Path) -> anyhow::Result<()>;
}

/// Files from a single walk together with the fingerprint of exactly those
/// files. A rebuild processes `entries` and records `fingerprint`, so an edit
/// landing mid-rebuild leaves the record stale instead of hiding it.
#[derive(Debug, Clone)]
pub struct TreeSnapshot {
    pub root: PathBuf,
    pub entries: Vec<ScannedFile>,
    pub fingerprint: CacheFingerprint,
}

impl TreeSnapshot {
    /// `/`-separated paths relative to the root, in walk order.
    pub fn relative_files(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|file| FileScanner::relative_path(&self.root, &file.path))
            .collect()
    }
}

/// Decides whether persisted artifacts can be reused for a project root.
///
/// The gate holds no per-project state; every call re-reads `meta.json` and
/// re-walks the tree.
pub struct CacheGate {
    config_file: Option<PathBuf>,
    max_depth: usize,
    hooks: Vec<Box<dyn InvalidationHook>>,
}

impl Default for CacheGate {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheGate {
    pub fn new() -> Self {
        Self {
            config_file: Some(PathBuf::from(CONFIG_FILE)),
            max_depth: MAX_WALK_DEPTH,
            hooks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_hook(mut self, hook: impl InvalidationHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Relative path of the settings file folded into the fingerprint;
    /// `None` disables it.
    #[must_use]
    pub fn with_config_file(mut self, relative: Option<PathBuf>) -> Self {
        self.config_file = relative;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn hook_names(&self) -> Vec<&str> {
        self.hooks.iter().map(|hook| hook.name()).collect()
    }

    pub fn fingerprint(&self, root: &Path) -> CacheFingerprint {
        let scanner = FileScanner::new(root).with_max_depth(self.max_depth);
        CacheFingerprint::compute(&scanner, self.config_file.as_deref())
    }

    /// Walk once and fingerprint the files that walk produced.
    pub fn snapshot(&self, root: &Path) -> TreeSnapshot {
        let entries = FileScanner::new(root)
            .with_max_depth(self.max_depth)
            .entries();
        let fingerprint =
            CacheFingerprint::from_entries(root, &entries, self.config_file.as_deref());
        TreeSnapshot {
            root: root.to_path_buf(),
            entries,
            fingerprint,
        }
    }

    pub fn check(&self, root: &Path) -> CacheStatus {
        let current = self.fingerprint(root);
        let stored = read_json::<CacheMeta>(&meta_path(root));
        let reasons = assess_staleness(&stored, &current);
        let fresh = reasons.is_empty();
        if fresh {
            log::info!("Cache is fresh ({current})");
        } else {
            log::info!("Cache is stale: {reasons:?}");
        }
        CacheStatus {
            fresh,
            reasons,
            current,
            stored: stored.found(),
        }
    }

    pub fn is_valid(&self, root: &Path) -> bool {
        self.check(root).fresh
    }

    /// Persist metadata for the tree as it is now. Call after a successful
    /// run has written its artifacts.
    pub fn record(&self, root: &Path) -> Result<CacheMeta> {
        self.record_fingerprint(root, self.fingerprint(root))
    }

    /// Persist metadata carrying `fingerprint`, normally the one from the
    /// [`TreeSnapshot`] the artifacts were built from.
    pub fn record_fingerprint(
        &self,
        root: &Path,
        fingerprint: CacheFingerprint,
    ) -> Result<CacheMeta> {
        let path = meta_path(root);
        let created_at = read_json::<CacheMeta>(&path)
            .found()
            .and_then(|previous| previous.created_at_unix_ms);
        let now = unix_now_ms();
        let meta = CacheMeta {
            tool_version: Some(TOOL_VERSION.to_string()),
            schema_version: Some(SCHEMA_VERSION.to_string()),
            created_at_unix_ms: Some(created_at.unwrap_or(now)),
            last_check_unix_ms: Some(now),
            fingerprint: Some(fingerprint),
        };
        write_json_atomic(&path, &meta)?;
        Ok(meta)
    }

    /// Bump `last_check` on an existing record; no-op without one.
    pub fn mark_checked(&self, root: &Path) -> Result<()> {
        let path = meta_path(root);
        let JsonRead::Found(mut meta) = read_json::<CacheMeta>(&path) else {
            return Ok(());
        };
        meta.last_check_unix_ms = Some(unix_now_ms());
        write_json_atomic(&path, &meta)
    }

    /// Reset the metadata to an empty record and notify every hook.
    /// Failures are logged, never returned.
    pub fn invalidate(&self, root: &Path) {
        if let Err(e) = write_json_atomic(&meta_path(root), &CacheMeta::default()) {
            log::warn!("Failed to reset cache metadata: {e}");
        }
        for hook in &self.hooks {
            if let Err(e) = hook.clear(root) {
                log::warn!("Invalidation hook '{}' failed: {e:#}", hook.name());
            }
        }
    }
}
