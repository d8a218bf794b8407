use crate::command::domain::{Hint, HintKind, RequestOptions};
use anyhow::{Context as AnyhowContext, Result};
use atlas_project::{config_path, AreaResolver, ProjectConfig};
use atlas_protocol::{Dialect, HintFormatter};
use std::path::{Path, PathBuf};

/// Process-wide defaults the CLI resolved from its flags.
#[derive(Debug, Clone)]
pub struct CommandDefaults {
    pub root: PathBuf,
    pub dialect: Dialect,
    pub hint_limit: Option<usize>,
}

impl Default for CommandDefaults {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            dialect: Dialect::Terminal,
            hint_limit: None,
        }
    }
}

pub struct CommandContext {
    defaults: CommandDefaults,
    options: RequestOptions,
}

pub struct ProjectContext {
    pub root: PathBuf,
    pub config: ProjectConfig,
    pub config_path: Option<String>,
    pub hints: Vec<Hint>,
}

impl ProjectContext {
    pub fn resolver(&self) -> AreaResolver {
        AreaResolver::new(&self.config)
    }
}

impl CommandContext {
    pub fn new(defaults: CommandDefaults, options: RequestOptions) -> Self {
        Self { defaults, options }
    }

    pub fn dialect(&self) -> Dialect {
        self.options.dialect.unwrap_or(self.defaults.dialect)
    }

    pub fn hint_formatter(&self) -> HintFormatter {
        let formatter = HintFormatter::new(self.dialect());
        match self.options.hint_limit.or(self.defaults.hint_limit) {
            Some(limit) => formatter.with_limit(limit),
            None => formatter,
        }
    }

    /// Canonical root plus its configuration. A broken config file is not
    /// fatal: areas fall back to path inference and a warning hint is added.
    pub fn resolve_project(&self, project: Option<PathBuf>) -> Result<ProjectContext> {
        let requested = project.unwrap_or_else(|| self.defaults.root.clone());
        if !requested.exists() {
            anyhow::bail!("Project path does not exist: {}", requested.display());
        }
        let root = requested
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", requested.display()))?;

        let mut hints = Vec::new();
        let path = config_path(&root);
        let (config, config_path) = match ProjectConfig::try_load(&root) {
            Ok(Some(config)) => (config, Some(display_path(&path))),
            Ok(None) => (ProjectConfig::default(), None),
            Err(err) => {
                log::warn!("Ignoring {}: {err}", path.display());
                hints.push(Hint::new(
                    HintKind::Warn,
                    format!(
                        "{} is unreadable ({err}); areas were inferred from paths only.",
                        display_path(&path)
                    ),
                ));
                (ProjectConfig::default(), None)
            }
        };

        Ok(ProjectContext {
            root,
            config,
            config_path,
            hints,
        })
    }
}

pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
