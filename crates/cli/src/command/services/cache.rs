use crate::command::context::{display_path, CommandContext};
use crate::command::domain::{
    parse_payload, CacheClearOutput, CacheStatusOutput, CommandOutcome, Hint, HintKind,
    ProjectPayload,
};
use crate::command::infra::MapCacheAdapter;
use anyhow::Result;
use atlas_indexer::cache_dir;
use serde_json::Value;

#[derive(Default)]
pub struct CacheService;

impl CacheService {
    pub fn status(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: ProjectPayload = parse_payload(payload)?;
        let project = ctx.resolve_project(payload.project)?;
        let adapter = MapCacheAdapter::new(&project.root);
        let status = adapter.status();
        let stored = status.stored.clone().unwrap_or_default();

        let mut outcome = CommandOutcome::from_value(CacheStatusOutput {
            fresh: status.fresh,
            reasons: status.reasons.clone(),
            cache_dir: display_path(&cache_dir(&project.root)),
            fingerprint: status.current.to_string(),
            stored_fingerprint: stored.fingerprint.map(|fp| fp.to_string()),
            schema_version: stored.schema_version,
            last_check_unix_ms: stored.last_check_unix_ms,
        })?;
        if !status.fresh {
            outcome.hints.push(Hint::new(
                HintKind::Cache,
                "The next map-backed command rebuilds the cache.",
            ));
        }
        outcome.meta.root = Some(display_path(&project.root));
        outcome.meta.config_path = project.config_path;
        outcome.meta.file_count = usize::try_from(status.current.file_count).ok();
        outcome.meta.stale_reasons = status.reasons;
        outcome.hints.extend(project.hints);
        Ok(outcome)
    }

    pub fn clear(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: ProjectPayload = parse_payload(payload)?;
        let project = ctx.resolve_project(payload.project)?;
        let adapter = MapCacheAdapter::new(&project.root);
        adapter.invalidate();

        let mut outcome = CommandOutcome::from_value(CacheClearOutput {
            cache_dir: display_path(&cache_dir(&project.root)),
            hooks: adapter
                .gate()
                .hook_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        })?;
        outcome.meta.root = Some(display_path(&project.root));
        outcome.hints.extend(project.hints);
        Ok(outcome)
    }
}
