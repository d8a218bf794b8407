//! # Atlas Search
//!
//! Loose-reference resolution for project files and areas.
//!
//! ## Pipeline
//!
//! ```text
//! user query
//!     │
//!     ├──> Target resolver (tiered, directory-aware)
//!     │      └─> single best file, or none
//!     │
//!     └──> Similarity engine (edit distance)
//!            ├─> ranked near matches for suggestion lists
//!            └─> one high-confidence "did you mean"
//! ```
//!
//! ## Example
//!
//! ```
//! use atlas_search::{find_best_match, find_target};
//!
//! let files = ["src/services/quota/index.ts", "src/index.ts"];
//! assert_eq!(find_target("quota/index.ts", &files), Some("src/services/quota/index.ts"));
//! assert_eq!(find_best_match("auht", &["auth", "dashboard"]), Some("auth"));
//! ```

mod error;
pub mod path;
mod similarity;
mod target;

pub use error::{require_query, Result, SearchError};
pub use similarity::{
    distance, find_best_match, find_best_match_by, find_similar, find_similar_by, Scored,
    SimilarOptions, BEST_MATCH_MAX_DISTANCE, DEFAULT_LIMIT, DEFAULT_MAX_DISTANCE,
};
pub use target::{find_target, rank_targets, MatchCandidate, MatchTier};
