use crate::error::IndexerError;
use crate::scanner::{system_time_ms, FileScanner, ScannedFile};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Cheap structural summary of a source tree.
///
/// `mtime_xor` folds every file's modification time with XOR, so the value
/// is independent of walk order. Not a content hash: a file rewritten with
/// an identical mtime goes unnoticed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CacheFingerprint {
    pub file_count: u64,
    pub mtime_xor: u64,
    pub max_mtime_ms: u64,
}

impl CacheFingerprint {
    pub fn add_mtime(&mut self, mtime_ms: u64) {
        self.file_count += 1;
        self.mtime_xor ^= mtime_ms;
        self.max_mtime_ms = self.max_mtime_ms.max(mtime_ms);
    }

    /// Walk `root` and fold every source file, plus the modification time of
    /// `config_file` (relative to `root`) when it exists.
    pub fn compute(scanner: &FileScanner, config_file: Option<&Path>) -> Self {
        Self::from_entries(scanner.root(), &scanner.entries(), config_file)
    }

    /// Fold an already walked file list. `config_file` is relative to `root`.
    pub fn from_entries(root: &Path, entries: &[ScannedFile], config_file: Option<&Path>) -> Self {
        let mut fingerprint = Self::default();
        for file in entries {
            fingerprint.add_mtime(file.mtime_ms);
        }

        if let Some(relative) = config_file {
            let path = root.join(relative);
            if let Ok(modified) = std::fs::metadata(&path).and_then(|meta| meta.modified()) {
                fingerprint.mtime_xor ^= system_time_ms(modified);
            }
        }

        fingerprint
    }
}

impl fmt::Display for CacheFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:x}-{}", self.file_count, self.mtime_xor, self.max_mtime_ms)
    }
}

impl FromStr for CacheFingerprint {
    type Err = IndexerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || IndexerError::InvalidFingerprint(value.to_string());
        let mut parts = value.trim().split('-');
        let (Some(count), Some(xor), Some(max), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        Ok(Self {
            file_count: count.parse().map_err(|_| invalid())?,
            mtime_xor: u64::from_str_radix(xor, 16).map_err(|_| invalid())?,
            max_mtime_ms: max.parse().map_err(|_| invalid())?,
        })
    }
}

impl Serialize for CacheFingerprint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CacheFingerprint {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_and_parses() {
        let fingerprint = CacheFingerprint {
            file_count: 3,
            mtime_xor: 0xbeef,
            max_mtime_ms: 1_700_000_000_123,
        };
        assert_eq!(fingerprint.to_string(), "3-beef-1700000000123");
        assert_eq!("3-beef-1700000000123".parse::<CacheFingerprint>().unwrap(), fingerprint);
    }

    #[test]
    fn rejects_malformed_strings() {
        for raw in ["", "3-beef", "3-beef-1-2", "x-beef-1", "3-zz-1"] {
            assert!(raw.parse::<CacheFingerprint>().is_err(), "{raw}");
        }
    }

    #[test]
    fn fold_is_order_independent() {
        let mut forward = CacheFingerprint::default();
        let mut backward = CacheFingerprint::default();
        for mtime in [10, 20, 35] {
            forward.add_mtime(mtime);
        }
        for mtime in [35, 20, 10] {
            backward.add_mtime(mtime);
        }
        assert_eq!(forward, backward);
        assert_eq!(forward.max_mtime_ms, 35);
        assert_eq!(forward.file_count, 3);
    }

    #[test]
    fn serializes_as_string() {
        let fingerprint = CacheFingerprint {
            file_count: 1,
            mtime_xor: 255,
            max_mtime_ms: 255,
        };
        let json = serde_json::to_string(&fingerprint).unwrap();
        assert_eq!(json, "\"1-ff-255\"");
        let back: CacheFingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fingerprint);
    }
}
