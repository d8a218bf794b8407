use super::attach_snapshot;
use crate::command::context::CommandContext;
use crate::command::domain::{parse_payload, CommandOutcome, Hint, HintKind, MapPayload};
use crate::command::infra::MapCacheAdapter;
use anyhow::Result;
use serde_json::Value;

#[derive(Default)]
pub struct MapService;

impl MapService {
    pub fn run(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: MapPayload = parse_payload(payload)?;
        let project = ctx.resolve_project(payload.project)?;
        let adapter = MapCacheAdapter::new(&project.root);
        let snapshot = adapter.load_or_build(&project, payload.force);

        let mut outcome = CommandOutcome::from_value(&snapshot.map)?;
        if snapshot.cache_hit {
            outcome
                .hints
                .push(Hint::new(HintKind::Cache, "Served from .atlas/cache/map.json."));
        }
        if snapshot.map.files.is_empty() {
            outcome.hints.push(Hint::new(
                HintKind::Info,
                "No source files found; check --root and .gitignore.",
            ));
        }
        attach_snapshot(&mut outcome, project, &snapshot);
        Ok(outcome)
    }
}
