use super::attach_snapshot;
use crate::command::context::CommandContext;
use crate::command::domain::{
    parse_payload, AreaOutput, AreaPayload, AreasOutput, CommandOutcome, ProjectPayload,
};
use crate::command::infra::MapCacheAdapter;
use anyhow::Result;
use atlas_search::require_query;
use serde_json::Value;

#[derive(Default)]
pub struct AreaService;

impl AreaService {
    pub fn list(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: ProjectPayload = parse_payload(payload)?;
        let project = ctx.resolve_project(payload.project)?;
        let snapshot = MapCacheAdapter::new(&project.root).load_or_build(&project, false);

        let mut outcome = CommandOutcome::from_value(AreasOutput {
            areas: snapshot.map.areas.clone(),
        })?;
        attach_snapshot(&mut outcome, project, &snapshot);
        Ok(outcome)
    }

    /// Resolve a loose area reference (id, display name, alias) and list its files.
    pub fn show(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: AreaPayload = parse_payload(payload)?;
        let input = require_query(&payload.area, "area")?;
        let project = ctx.resolve_project(payload.project)?;
        let snapshot = MapCacheAdapter::new(&project.root).load_or_build(&project, false);
        let map = &snapshot.map;

        let id = project
            .resolver()
            .resolve_area_reference(input, &map.file_paths());
        log::debug!("Area reference '{input}' resolved to '{id}'");

        let mut outcome = match map.area(&id) {
            Some(area) => CommandOutcome::from_value(AreaOutput {
                area: area.clone(),
                resolved_from: (input != id).then(|| input.to_string()),
                files: map.area_files(&id).into_iter().cloned().collect(),
            })?,
            None => {
                let hint = ctx
                    .hint_formatter()
                    .missing_area(input, &map.area_counts());
                CommandOutcome::not_found(hint)?
            }
        };
        attach_snapshot(&mut outcome, project, &snapshot);
        Ok(outcome)
    }
}
