use crate::catalog::lookup;
use crate::dialect::{Dialect, Placeholders};
use atlas_search::path::{bare_name, file_name, normalize_path};
use atlas_search::{find_best_match_by, find_similar_by, SimilarOptions};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_HINT_LIMIT: usize = 10;
pub const MAX_HINT_LIMIT: usize = 15;

/// A rendered follow-up command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextStep {
    pub command: String,
    pub summary: String,
    pub invocation: String,
}

/// Recovery payload for a reference that did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryHint {
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub did_you_mean: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
    pub next_steps: Vec<NextStep>,
}

impl fmt::Display for RecoveryHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.headline)?;
        if let Some(best) = &self.did_you_mean {
            writeln!(f, "Did you mean: {best}?")?;
        }
        if !self.alternatives.is_empty() {
            writeln!(f, "Alternatives:")?;
            for alternative in &self.alternatives {
                writeln!(f, "  - {alternative}")?;
            }
        }
        if !self.next_steps.is_empty() {
            writeln!(f, "Next steps:")?;
            for step in &self.next_steps {
                writeln!(f, "  {}  # {}", step.invocation, step.summary)?;
            }
        }
        Ok(())
    }
}

/// Builds [`RecoveryHint`]s for missing files and areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintFormatter {
    dialect: Dialect,
    limit: usize,
}

impl HintFormatter {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            limit: DEFAULT_HINT_LIMIT,
        }
    }

    /// Cap on listed alternatives, clamped to `1..=MAX_HINT_LIMIT`.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.clamp(1, MAX_HINT_LIMIT);
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn missing_file<S: AsRef<str>>(&self, query: &str, files: &[S]) -> RecoveryHint {
        let normalized = normalize_path(query);
        let needle = bare_name(&normalized);
        let key = |file: &S| file_name(file.as_ref()).to_string();

        let did_you_mean = find_best_match_by(needle, files, key).map(|f| f.as_ref().to_string());
        let alternatives = if did_you_mean.is_some() {
            Vec::new()
        } else {
            let options = SimilarOptions::default().with_limit(self.limit);
            find_similar_by(needle, files, options, key)
                .into_iter()
                .map(|scored| scored.item.as_ref().to_string())
                .collect()
        };

        let mut steps = vec![
            self.step("find", Placeholders::new().query(query.trim())),
            self.step("suggest", Placeholders::new().query(needle)),
        ];
        if let Some(best) = &did_you_mean {
            steps.push(self.step("describe", Placeholders::new().file(best.as_str())));
            steps.push(self.step("context", Placeholders::new().file(best.as_str())));
        }
        steps.push(self.step("map", Placeholders::new()));

        RecoveryHint {
            headline: format!("File not found: {}", query.trim()),
            did_you_mean,
            alternatives,
            next_steps: steps.into_iter().flatten().collect(),
        }
    }

    /// `areas` pairs each known area id with its file count.
    pub fn missing_area<S: AsRef<str>>(&self, query: &str, areas: &[(S, usize)]) -> RecoveryHint {
        let key = |(id, _): &(S, usize)| id.as_ref().to_string();

        let did_you_mean =
            find_best_match_by(query, areas, key).map(|(id, _)| id.as_ref().to_string());
        let alternatives = if did_you_mean.is_some() {
            Vec::new()
        } else {
            let options = SimilarOptions::default().with_limit(self.limit);
            let mut picked: Vec<&(S, usize)> = find_similar_by(query, areas, options, key)
                .into_iter()
                .map(|scored| scored.item)
                .collect();
            if picked.is_empty() {
                picked = areas.iter().collect();
                picked.sort_by(|a, b| b.1.cmp(&a.1));
                picked.truncate(self.limit);
            }
            picked
                .into_iter()
                .map(|(id, count)| format!("{} ({count} files)", id.as_ref()))
                .collect()
        };

        let area = match &did_you_mean {
            Some(best) => Placeholders::new().area(best.as_str()),
            None => Placeholders::new(),
        };
        let steps = [
            self.step("areas", Placeholders::new()),
            self.step("area", area),
            self.step("suggest", Placeholders::new().query(query.trim())),
        ];

        RecoveryHint {
            headline: format!("Area not found: {}", query.trim()),
            did_you_mean,
            alternatives,
            next_steps: steps.into_iter().flatten().collect(),
        }
    }

    fn step(&self, command: &str, values: Placeholders) -> Option<NextStep> {
        let descriptor = lookup(command)?;
        Some(NextStep {
            command: descriptor.name.to_string(),
            summary: descriptor.summary.to_string(),
            invocation: descriptor.render(self.dialect, &values),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FILES: &[&str] = &[
        "src/components/Button.tsx",
        "src/components/ButtonGroup.tsx",
        "src/pages/Login.tsx",
        "src/hooks/useAuth.ts",
    ];

    #[test]
    fn close_file_gets_did_you_mean() {
        let hint = HintFormatter::new(Dialect::Terminal).missing_file("src/Buton.tsx", FILES);
        assert_eq!(hint.headline, "File not found: src/Buton.tsx");
        assert_eq!(hint.did_you_mean.as_deref(), Some("src/components/Button.tsx"));
        assert!(hint.alternatives.is_empty());
        let invocations: Vec<&str> = hint
            .next_steps
            .iter()
            .map(|step| step.invocation.as_str())
            .collect();
        assert_eq!(
            invocations,
            vec![
                "atlas find src/Buton.tsx",
                "atlas suggest buton",
                "atlas describe src/components/Button.tsx",
                "atlas context src/components/Button.tsx",
                "atlas map",
            ]
        );
    }

    #[test]
    fn distant_file_lists_near_matches_without_assertion() {
        let hint = HintFormatter::new(Dialect::Terminal).missing_file("Logn", FILES);
        assert_eq!(hint.did_you_mean.as_deref(), Some("src/pages/Login.tsx"));

        let hint = HintFormatter::new(Dialect::Terminal).missing_file("uzeAth2", FILES);
        assert_eq!(hint.did_you_mean, None);
        assert_eq!(hint.alternatives, vec!["src/hooks/useAuth.ts"]);
        assert!(hint.next_steps.iter().all(|s| s.command != "describe"));
    }

    #[test]
    fn unknown_area_falls_back_to_largest_areas() {
        let areas = [("auth", 4), ("billing", 9), ("cart", 2), ("search", 9)];
        let hint = HintFormatter::new(Dialect::Terminal)
            .with_limit(2)
            .missing_area("warehouse", &areas);
        assert_eq!(hint.did_you_mean, None);
        assert_eq!(hint.alternatives, vec!["billing (9 files)", "search (9 files)"]);
        assert_eq!(hint.next_steps[1].invocation, "atlas area <area>");
    }

    #[test]
    fn close_area_renders_tool_calls() {
        let areas = [("auth", 4), ("billing", 9)];
        let hint = HintFormatter::new(Dialect::ToolCall).missing_area("auht", &areas);
        assert_eq!(hint.did_you_mean.as_deref(), Some("auth"));
        assert_eq!(
            hint.next_steps[1].invocation,
            r#"{"action":"area","payload":{"area":"auth"}}"#
        );
        for step in &hint.next_steps {
            assert!(serde_json::from_str::<serde_json::Value>(&step.invocation).is_ok());
        }
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(HintFormatter::new(Dialect::Terminal).limit(), DEFAULT_HINT_LIMIT);
        assert_eq!(HintFormatter::new(Dialect::Terminal).with_limit(0).limit(), 1);
        assert_eq!(HintFormatter::new(Dialect::Terminal).with_limit(99).limit(), MAX_HINT_LIMIT);
    }

    #[test]
    fn display_lists_sections() {
        let hint = HintFormatter::new(Dialect::Terminal).missing_area("zzz", &[("auth", 1)]);
        let text = hint.to_string();
        assert!(text.starts_with("Area not found: zzz\n"));
        assert!(text.contains("Alternatives:\n  - auth (1 files)\n"));
        assert!(text.contains("  atlas areas  # Feature areas with file counts.\n"));
    }
}
