use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a command reference is spelled for the reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// Shell invocation, e.g. `atlas area auth`.
    #[default]
    Terminal,
    /// JSON request an agent can send back verbatim.
    ToolCall,
}

/// Named values substituted into command templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    values: BTreeMap<&'static str, String>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(name, value.into());
        self
    }

    #[must_use]
    pub fn file(self, value: impl Into<String>) -> Self {
        self.with("file", value)
    }

    #[must_use]
    pub fn area(self, value: impl Into<String>) -> Self {
        self.with("area", value)
    }

    #[must_use]
    pub fn query(self, value: impl Into<String>) -> Self {
        self.with("query", value)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Replace every `{name}` token in `template`.
///
/// Only identifier-shaped tokens are placeholders, so JSON braces in
/// tool-call templates pass through. Unknown names render as `<name>`. In
/// the tool-call dialect values are JSON-string escaped.
pub fn render(template: &str, dialect: Dialect, values: &Placeholders) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let token_end = after.find('}').filter(|&end| is_placeholder_name(&after[..end]));

        match token_end {
            Some(end) => {
                let name = &after[..end];
                match values.get(name) {
                    Some(value) => out.push_str(&escape(value, dialect)),
                    None => {
                        out.push('<');
                        out.push_str(name);
                        out.push('>');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn escape(value: &str, dialect: Dialect) -> String {
    match dialect {
        Dialect::Terminal => value.to_string(),
        Dialect::ToolCall => {
            let quoted = serde_json::Value::String(value.to_string()).to_string();
            quoted[1..quoted.len() - 1].to_string()
        }
    }
}
