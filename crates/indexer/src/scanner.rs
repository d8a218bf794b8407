use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Walk depth cap; dependency trees below this are not worth the cost.
pub const MAX_WALK_DEPTH: usize = 6;

/// A source file with its modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub mtime_ms: u64,
}

/// Scanner for ECMAScript-family sources in a project
pub struct FileScanner {
    root: PathBuf,
    max_depth: usize,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            max_depth: MAX_WALK_DEPTH,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Source files under the root, sorted.
    pub fn scan(&self) -> Vec<PathBuf> {
        self.entries().into_iter().map(|file| file.path).collect()
    }

    /// Source files with their modification times, sorted by path.
    ///
    /// Unreadable entries are logged and skipped; the walk never aborts.
    pub fn entries(&self) -> Vec<ScannedFile> {
        let mut files = Vec::new();

        let root = self.root.clone();
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .require_git(false)
            .max_depth(Some(self.max_depth));
        builder.filter_entry(move |entry| !FileScanner::is_ignored_scope(entry.path(), &root));

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() || !Self::is_source_file(entry.path()) {
                        continue;
                    }

                    let mtime_ms = match entry.metadata() {
                        Ok(meta) => meta.modified().ok().map_or(0, system_time_ms),
                        Err(e) => {
                            log::debug!("Skipping {}: {e}", entry.path().display());
                            continue;
                        }
                    };

                    files.push(ScannedFile {
                        path: entry.into_path(),
                        mtime_ms,
                    });
                }
                Err(e) => log::debug!("Failed to read entry: {e}"),
            }
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        log::info!("Found {} source files under {}", files.len(), self.root.display());
        files
    }

    /// `/`-separated path of `path` relative to `root`, falling back to the
    /// path itself when it lies outside the root.
    pub fn relative_path(root: &Path, path: &Path) -> String {
        let relative = path.strip_prefix(root).unwrap_or(path);
        relative
            .components()
            .filter_map(|component| match component {
                std::path::Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Relative paths of every source file.
    pub fn relative_files(&self) -> Vec<String> {
        self.scan()
            .iter()
            .map(|path| Self::relative_path(&self.root, path))
            .collect()
    }

    fn is_source_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_lowercase();
                SOURCE_EXTENSIONS.iter().any(|candidate| *candidate == ext)
            })
    }

    fn is_ignored_scope(path: &Path, root: &Path) -> bool {
        if let Ok(relative) = path.strip_prefix(root) {
            for component in relative.components() {
                if let std::path::Component::Normal(name) = component {
                    let lowered = name.to_string_lossy().to_lowercase();
                    if IGNORED_SCOPES.iter().any(|ignored| *ignored == lowered) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

pub(crate) fn system_time_ms(time: std::time::SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Dependency, build and output directories.
const IGNORED_SCOPES: &[&str] = &[
    "node_modules",
    "bower_components",
    "jspm_packages",
    "dist",
    "build",
    "out",
    "coverage",
    "target",
    "vendor",
    "storybook-static",
    "tmp",
    "temp",
];

pub const SOURCE_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs", "vue", "svelte", "astro",
];
