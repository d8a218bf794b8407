//! # Atlas Protocol
//!
//! The command vocabulary shared by the terminal and agent front-ends, and
//! the recovery hints built from it.
//!
//! Every command has two spellings: a shell invocation (`atlas area auth`)
//! and a JSON request (`{"action":"area","payload":{"area":"auth"}}`).
//! [`HintFormatter`] picks one per [`Dialect`] so a hint can be pasted back
//! verbatim by whoever reads it.
//!
//! ```
//! use atlas_protocol::{Dialect, HintFormatter};
//!
//! let hint = HintFormatter::new(Dialect::Terminal)
//!     .missing_area("auht", &[("auth", 4), ("billing", 9)]);
//! assert_eq!(hint.did_you_mean.as_deref(), Some("auth"));
//! ```

mod catalog;
mod dialect;
mod hints;

pub use catalog::{command_inventory_json, lookup, CommandDescriptor, COMMAND_CATALOG};
pub use dialect::{render, Dialect, Placeholders};
pub use hints::{HintFormatter, NextStep, RecoveryHint, DEFAULT_HINT_LIMIT, MAX_HINT_LIMIT};
