use anyhow::Result;
use atlas_indexer::StaleReason;
use atlas_project::{AreaInfo, FileCategory, MapEntry, ProjectMap};
use atlas_protocol::{Dialect, RecoveryHint};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandRequest {
    pub action: CommandAction,
    #[serde(default = "empty_payload")]
    pub payload: Value,
    #[serde(default)]
    pub options: RequestOptions,
}

impl CommandRequest {
    pub fn new<T: Serialize>(action: CommandAction, payload: T) -> Result<Self> {
        Ok(Self {
            action,
            payload: serde_json::to_value(payload)?,
            options: RequestOptions::default(),
        })
    }
}

fn empty_payload() -> Value {
    Value::Object(Default::default())
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandAction {
    Map,
    Areas,
    Area,
    Find,
    Describe,
    CacheStatus,
    CacheClear,
}

impl CommandAction {
    pub const ALL: [CommandAction; 7] = [
        CommandAction::Map,
        CommandAction::Areas,
        CommandAction::Area,
        CommandAction::Find,
        CommandAction::Describe,
        CommandAction::CacheStatus,
        CommandAction::CacheClear,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            CommandAction::Map => "map",
            CommandAction::Areas => "areas",
            CommandAction::Area => "area",
            CommandAction::Find => "find",
            CommandAction::Describe => "describe",
            CommandAction::CacheStatus => "cache_status",
            CommandAction::CacheClear => "cache_clear",
        }
    }
}

/// Per-request overrides of the process-wide defaults.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RequestOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub status: CommandStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<Hint>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub meta: ResponseMeta,
}

impl CommandResponse {
    pub fn is_error(&self) -> bool {
        matches!(self.status, CommandStatus::Error)
    }

    pub fn error_with_hints(message: String, hints: Vec<Hint>) -> Self {
        Self {
            status: CommandStatus::Error,
            message: Some(message),
            hints,
            data: Value::Null,
            meta: ResponseMeta::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Ok,
    /// The target did not resolve; `data` carries a recovery hint.
    NotFound,
    Error,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Hint {
    #[serde(rename = "type")]
    pub kind: HintKind,
    pub text: String,
}

impl Hint {
    pub fn new(kind: HintKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    Info,
    Cache,
    Action,
    Warn,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_hit: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stale_reasons: Vec<StaleReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

pub struct CommandOutcome {
    pub status: CommandStatus,
    pub message: Option<String>,
    pub data: Value,
    pub hints: Vec<Hint>,
    pub meta: ResponseMeta,
    pub started: Instant,
}

impl CommandOutcome {
    pub fn from_value<T: Serialize>(value: T) -> Result<Self> {
        Ok(Self {
            status: CommandStatus::Ok,
            message: None,
            data: serde_json::to_value(value)?,
            hints: Vec::new(),
            meta: ResponseMeta::default(),
            started: Instant::now(),
        })
    }

    pub fn not_found(hint: RecoveryHint) -> Result<Self> {
        let message = Some(hint.headline.clone());
        let mut outcome = Self::from_value(hint)?;
        outcome.status = CommandStatus::NotFound;
        outcome.message = message;
        Ok(outcome)
    }
}

pub fn parse_payload<T: DeserializeOwned>(payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(Into::into)
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct MapPayload {
    #[serde(default)]
    pub project: Option<PathBuf>,
    /// Rebuild even when the cached map is fresh.
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ProjectPayload {
    #[serde(default)]
    pub project: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AreaPayload {
    #[serde(default)]
    pub project: Option<PathBuf>,
    pub area: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FindPayload {
    #[serde(default)]
    pub project: Option<PathBuf>,
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DescribePayload {
    #[serde(default)]
    pub project: Option<PathBuf>,
    pub file: String,
}

pub type MapOutput = ProjectMap;

#[derive(Debug, Serialize, Deserialize)]
pub struct AreasOutput {
    pub areas: Vec<AreaInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AreaOutput {
    pub area: AreaInfo,
    /// The text the user typed, when it differs from the id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_from: Option<String>,
    pub files: Vec<MapEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FindOutput {
    pub query: String,
    pub path: String,
    pub tier: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DescribeOutput {
    pub path: String,
    pub category: FileCategory,
    pub areas: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imported_by: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CacheStatusOutput {
    pub fresh: bool,
    #[serde(default)]
    pub reasons: Vec<StaleReason>,
    pub cache_dir: String,
    pub fingerprint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_fingerprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_check_unix_ms: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CacheClearOutput {
    pub cache_dir: String,
    pub hooks: Vec<String>,
}

pub fn classify_error(message: &str) -> Vec<Hint> {
    let mut hints = Vec::new();

    if message.contains("must not be empty") {
        hints.push(Hint::new(
            HintKind::Action,
            "Pass a file path, file name or area name; blank targets are rejected.",
        ));
    }

    if message.contains("unknown variant") {
        let actions: Vec<&str> = CommandAction::ALL.iter().map(|a| a.as_str()).collect();
        hints.push(Hint::new(
            HintKind::Action,
            format!("Supported actions: {}.", actions.join(", ")),
        ));
    }

    if message.contains("missing field") {
        hints.push(Hint::new(
            HintKind::Action,
            "Check the payload shape, e.g. {\"action\":\"find\",\"payload\":{\"query\":\"Button\"}}.",
        ));
    }

    if message.contains("Project path does not exist") {
        hints.push(Hint::new(
            HintKind::Action,
            "Check --root / payload.project or run from the repository root.",
        ));
    }

    if message.contains("Failed to write") {
        hints.push(Hint::new(
            HintKind::Warn,
            "Cache directory is not writable; results were computed but not persisted.",
        ));
    }

    hints
}
