//! On-disk locations under a project root.

use std::path::{Path, PathBuf};

pub const ATLAS_DIR_NAME: &str = ".atlas";
pub const CACHE_DIR_NAME: &str = "cache";
pub const META_FILE_NAME: &str = "meta.json";
/// Project settings file, relative to the root. Its mtime feeds the fingerprint.
pub const CONFIG_FILE: &str = ".atlas/config.json";

pub fn cache_dir(root: &Path) -> PathBuf {
    root.join(ATLAS_DIR_NAME).join(CACHE_DIR_NAME)
}

pub fn meta_path(root: &Path) -> PathBuf {
    cache_dir(root).join(META_FILE_NAME)
}
