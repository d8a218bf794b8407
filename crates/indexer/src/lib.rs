//! # Atlas Indexer
//!
//! Source-tree walking and cache freshness for project analysis.
//!
//! ## Pipeline
//!
//! ```text
//! Project root
//!     │
//!     ├──> File Scanner (depth-bounded, .gitignore aware)
//!     │      └─> Source files + mtimes
//!     │
//!     ├──> Cache Gate
//!     │      ├─> Fingerprint (count, mtime XOR, max mtime)
//!     │      └─> .atlas/cache/meta.json (schema + fingerprint)
//!     │
//!     └──> Artifact Store
//!            └─> graph / map / dead-code / symbols snapshots
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use atlas_indexer::{ArtifactKind, ArtifactStore, CacheGate};
//! use std::path::Path;
//!
//! fn main() -> atlas_indexer::Result<()> {
//!     let root = Path::new("/path/to/project");
//!     let gate = CacheGate::new();
//!     let store = ArtifactStore::new(root);
//!
//!     if !gate.is_valid(root) {
//!         store.save(ArtifactKind::Map, &vec!["src/main.ts"])?;
//!         gate.record(root)?;
//!     }
//!     Ok(())
//! }
//! ```

mod artifacts;
mod cache;
mod error;
mod fingerprint;
mod layout;
mod meta;
mod persist;
mod scanner;

pub use artifacts::{
    ArtifactEnvelope, ArtifactKind, ArtifactStore, DependencyGraph, ARTIFACT_FORMAT_VERSION,
};
pub use cache::{CacheGate, InvalidationHook, TreeSnapshot};
pub use error::{IndexerError, Result};
pub use fingerprint::CacheFingerprint;
pub use layout::{cache_dir, meta_path, ATLAS_DIR_NAME, CACHE_DIR_NAME, CONFIG_FILE, META_FILE_NAME};
pub use meta::{
    assess_staleness, schema_is_supported, CacheMeta, CacheStatus, StaleReason,
    MIN_SCHEMA_VERSION, SCHEMA_VERSION, TOOL_VERSION,
};
pub use persist::{read_json, unix_now_ms, write_json_atomic, JsonRead};
pub use scanner::{FileScanner, ScannedFile, MAX_WALK_DEPTH, SOURCE_EXTENSIONS};
