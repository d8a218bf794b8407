use crate::dialect::{render, Dialect, Placeholders};
use serde_json::json;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub summary: &'static str,
    /// Shell form, e.g. `atlas area {area}`.
    pub terminal: &'static str,
    /// JSON request form accepted by `atlas command`.
    pub tool_call: &'static str,
}

impl CommandDescriptor {
    pub fn template(&self, dialect: Dialect) -> &'static str {
        match dialect {
            Dialect::Terminal => self.terminal,
            Dialect::ToolCall => self.tool_call,
        }
    }

    pub fn render(&self, dialect: Dialect, values: &Placeholders) -> String {
        render(self.template(dialect), dialect, values)
    }
}

pub const COMMAND_CATALOG: &[CommandDescriptor] = &[
    CommandDescriptor {
        name: "map",
        summary: "Project map: categories, areas and one-line descriptions.",
        terminal: "atlas map",
        tool_call: r#"{"action":"map","payload":{}}"#,
    },
    CommandDescriptor {
        name: "areas",
        summary: "Feature areas with file counts.",
        terminal: "atlas areas",
        tool_call: r#"{"action":"areas","payload":{}}"#,
    },
    CommandDescriptor {
        name: "area",
        summary: "Files that belong to one area.",
        terminal: "atlas area {area}",
        tool_call: r#"{"action":"area","payload":{"area":"{area}"}}"#,
    },
    CommandDescriptor {
        name: "suggest",
        summary: "Files worth reading for a task description.",
        terminal: "atlas suggest {query}",
        tool_call: r#"{"action":"suggest","payload":{"query":"{query}"}}"#,
    },
    CommandDescriptor {
        name: "context",
        summary: "Category, areas and neighbours of a file.",
        terminal: "atlas context {file}",
        tool_call: r#"{"action":"context","payload":{"file":"{file}"}}"#,
    },
    CommandDescriptor {
        name: "impact",
        summary: "Files affected by changing a file.",
        terminal: "atlas impact {file}",
        tool_call: r#"{"action":"impact","payload":{"file":"{file}"}}"#,
    },
    CommandDescriptor {
        name: "dead",
        summary: "Files and exports nothing imports.",
        terminal: "atlas dead",
        tool_call: r#"{"action":"dead","payload":{}}"#,
    },
    CommandDescriptor {
        name: "find",
        summary: "Resolve a loose file reference to a path.",
        terminal: "atlas find {query}",
        tool_call: r#"{"action":"find","payload":{"query":"{query}"}}"#,
    },
    CommandDescriptor {
        name: "describe",
        summary: "One-line description of a file.",
        terminal: "atlas describe {file}",
        tool_call: r#"{"action":"describe","payload":{"file":"{file}"}}"#,
    },
];

pub fn lookup(name: &str) -> Option<&'static CommandDescriptor> {
    COMMAND_CATALOG.iter().find(|command| command.name == name)
}

pub fn command_inventory_json(version: &str) -> serde_json::Value {
    let commands: Vec<serde_json::Value> = COMMAND_CATALOG
        .iter()
        .map(|command| {
            json!({
                "name": command.name,
                "summary": command.summary,
                "terminal": command.terminal,
                "tool_call": command.tool_call,
            })
        })
        .collect();

    json!({
        "binary": "atlas",
        "version": version,
        "count": commands.len(),
        "commands": commands,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn catalog_names_are_unique() {
        let mut names: Vec<&str> = COMMAND_CATALOG.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), COMMAND_CATALOG.len());
        assert_eq!(COMMAND_CATALOG.len(), 9);
    }

    #[test]
    fn dialects_agree_on_placeholders() {
        for command in COMMAND_CATALOG {
            for name in ["file", "area", "query"] {
                let token = format!("{{{name}}}");
                assert_eq!(
                    command.terminal.contains(&token),
                    command.tool_call.contains(&token),
                    "{} / {name}",
                    command.name
                );
            }
        }
    }

    #[test]
    fn tool_calls_render_to_valid_json() {
        let values = Placeholders::new()
            .file("src/a \"b\".ts")
            .area("auth")
            .query("cart");
        for command in COMMAND_CATALOG {
            let rendered = command.render(Dialect::ToolCall, &values);
            let parsed: serde_json::Value = serde_json::from_str(&rendered)
                .unwrap_or_else(|e| panic!("{}: {e}: {rendered}", command.name));
            assert_eq!(parsed["action"], command.name);
            assert!(command.terminal.starts_with(&format!("atlas {}", command.name)));
        }
    }

    #[test]
    fn inventory_lists_every_command() {
        let inventory = command_inventory_json("0.0.0");
        assert_eq!(inventory["count"], 9);
        assert_eq!(inventory["commands"][2]["name"], "area");
        assert_eq!(lookup("describe").map(|c| c.terminal), Some("atlas describe {file}"));
        assert!(lookup("nope").is_none());
    }
}
