use crate::fingerprint::CacheFingerprint;
use crate::persist::JsonRead;
use serde::{Deserialize, Serialize};

/// Schema written by this build.
pub const SCHEMA_VERSION: &str = "2.1";
/// Oldest schema whose artifacts are still readable.
pub const MIN_SCHEMA_VERSION: &str = "2.0";
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Persisted cache metadata. Every field defaults so an empty record (`{}`)
/// parses, and is always stale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_unix_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_check_unix_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<CacheFingerprint>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StaleReason {
    MetaMissing,
    MetaCorrupt,
    SchemaTooOld,
    FingerprintMissing,
    FingerprintChanged,
}

impl StaleReason {
    pub const fn describe(self) -> &'static str {
        match self {
            StaleReason::MetaMissing => "no cache metadata",
            StaleReason::MetaCorrupt => "cache metadata unreadable",
            StaleReason::SchemaTooOld => "cache schema older than required",
            StaleReason::FingerprintMissing => "cache has no fingerprint",
            StaleReason::FingerprintChanged => "source tree changed",
        }
    }
}

/// Result of comparing stored metadata against the current tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStatus {
    pub fresh: bool,
    pub reasons: Vec<StaleReason>,
    pub current: CacheFingerprint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored: Option<CacheMeta>,
}

/// Lexical comparison of schema strings.
///
/// Only sound while both strings share a shape: `"10.0"` sorts below
/// `"2.0"`. Kept lexical so existing caches keep their meaning.
pub fn schema_is_supported(stored: &str, minimum: &str) -> bool {
    stored >= minimum
}

#[must_use]
pub fn assess_staleness(
    stored: &JsonRead<CacheMeta>,
    current: &CacheFingerprint,
) -> Vec<StaleReason> {
    let meta = match stored {
        JsonRead::Missing => return vec![StaleReason::MetaMissing],
        JsonRead::Corrupt(_) => return vec![StaleReason::MetaCorrupt],
        JsonRead::Found(meta) => meta,
    };

    let mut reasons = Vec::new();
    let schema_ok = meta
        .schema_version
        .as_deref()
        .is_some_and(|version| schema_is_supported(version, MIN_SCHEMA_VERSION));
    if !schema_ok {
        reasons.push(StaleReason::SchemaTooOld);
    }

    match &meta.fingerprint {
        None => reasons.push(StaleReason::FingerprintMissing),
        Some(stored) if stored != current => reasons.push(StaleReason::FingerprintChanged),
        Some(_) => {}
    }

    reasons
}
