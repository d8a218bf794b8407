mod areas;
mod cache;
mod lookup;
mod map;

use crate::command::context::{CommandContext, ProjectContext};
use crate::command::domain::{CommandAction, CommandOutcome, Hint, HintKind};
use crate::command::infra::MapSnapshot;
use anyhow::Result;
use serde_json::Value;

use areas::AreaService;
use cache::CacheService;
use lookup::LookupService;
use map::MapService;

#[derive(Default)]
pub struct Services {
    map: MapService,
    areas: AreaService,
    lookup: LookupService,
    cache: CacheService,
}

impl Services {
    pub fn route(
        &self,
        action: CommandAction,
        payload: Value,
        ctx: &CommandContext,
    ) -> Result<CommandOutcome> {
        match action {
            CommandAction::Map => self.map.run(payload, ctx),
            CommandAction::Areas => self.areas.list(payload, ctx),
            CommandAction::Area => self.areas.show(payload, ctx),
            CommandAction::Find => self.lookup.find(payload, ctx),
            CommandAction::Describe => self.lookup.describe(payload, ctx),
            CommandAction::CacheStatus => self.cache.status(payload, ctx),
            CommandAction::CacheClear => self.cache.clear(payload, ctx),
        }
    }
}

/// Copy project and cache facts shared by every map-backed command.
fn attach_snapshot(outcome: &mut CommandOutcome, project: ProjectContext, snapshot: &MapSnapshot) {
    outcome.meta.root = Some(project.root.to_string_lossy().into_owned());
    outcome.meta.config_path = project.config_path;
    outcome.meta.cache_hit = Some(snapshot.cache_hit);
    outcome.meta.stale_reasons = snapshot.stale_reasons.clone();
    outcome.meta.file_count = Some(snapshot.map.files.len());
    outcome.hints.extend(project.hints);
    if let Some(err) = &snapshot.persist_error {
        outcome.hints.push(Hint::new(HintKind::Warn, err.clone()));
    }
    if !snapshot.cache_hit && !snapshot.stale_reasons.is_empty() {
        let reasons: Vec<&str> = snapshot
            .stale_reasons
            .iter()
            .map(|reason| reason.describe())
            .collect();
        outcome.hints.push(Hint::new(
            HintKind::Cache,
            format!("Map rebuilt: {}.", reasons.join(", ")),
        ));
    }
}
