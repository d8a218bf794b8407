//! # Atlas Project
//!
//! Structural knowledge about a front-end source tree: what each file is,
//! which feature areas it belongs to, and how to describe it in one line.
//!
//! ## Pipeline
//!
//! ```text
//! relative path
//!     │
//!     ├──> Classifier (ordered rule table)
//!     │      └─> FileCategory
//!     │
//!     ├──> Area resolver (.atlas/config.json, then path inference)
//!     │      └─> area ids, description
//!     │
//!     └──> Project map
//!            └─> entries, category counts, area summaries
//! ```
//!
//! ## Example
//!
//! ```
//! use atlas_project::{classify, AreaResolver, FileCategory, ProjectConfig};
//!
//! assert_eq!(classify("src/components/Button.test.tsx"), FileCategory::Test);
//!
//! let resolver = AreaResolver::new(&ProjectConfig::default());
//! assert_eq!(resolver.resolve_areas("src/features/login/Form.tsx"), vec!["auth"]);
//! ```

mod areas;
mod classifier;
mod config;
mod error;
mod infer;
mod map;
mod names;

pub use areas::{AreaAssignment, AreaId, AreaIndex, AreaInfo, AreaResolver};
pub use classifier::{classify, matching_rule, ClassifierRule, FileCategory, PathFacts, RULES};
pub use config::{config_path, AreaDefinition, ProjectConfig, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use error::{ProjectError, Result};
pub use infer::{infer_areas, infer_description};
pub use map::{MapEntry, ProjectMap};
pub use names::{builtin_by_id, fold, lookup_builtin, BuiltinArea, BUILTIN_AREAS};
