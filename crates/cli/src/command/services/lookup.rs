use super::attach_snapshot;
use crate::command::context::CommandContext;
use crate::command::domain::{
    parse_payload, CommandOutcome, DescribeOutput, DescribePayload, FindOutput, FindPayload,
};
use crate::command::infra::MapCacheAdapter;
use anyhow::Result;
use atlas_search::{rank_targets, require_query};
use serde_json::Value;

#[derive(Default)]
pub struct LookupService;

impl LookupService {
    pub fn find(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: FindPayload = parse_payload(payload)?;
        let query = require_query(&payload.query, "query")?;
        let project = ctx.resolve_project(payload.project)?;
        let snapshot = MapCacheAdapter::new(&project.root).load_or_build(&project, false);
        let files = snapshot.map.file_paths();

        let best = rank_targets(query, &files)
            .into_iter()
            .min_by_key(|candidate| candidate.tier);
        let mut outcome = match best {
            Some(candidate) => {
                log::debug!("'{query}' matched {} at {:?}", candidate.path, candidate.tier);
                CommandOutcome::from_value(FindOutput {
                    query: query.to_string(),
                    path: candidate.path.to_string(),
                    tier: candidate.tier.rank(),
                })?
            }
            None => CommandOutcome::not_found(ctx.hint_formatter().missing_file(query, &files))?,
        };
        attach_snapshot(&mut outcome, project, &snapshot);
        Ok(outcome)
    }

    /// Classification, areas and description of one file, plus its import
    /// edges when a dependency graph artifact is cached.
    pub fn describe(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: DescribePayload = parse_payload(payload)?;
        let query = require_query(&payload.file, "file")?;
        let project = ctx.resolve_project(payload.project)?;
        let adapter = MapCacheAdapter::new(&project.root);
        let snapshot = adapter.load_or_build(&project, false);
        let files = snapshot.map.file_paths();

        let entry = rank_targets(query, &files)
            .into_iter()
            .min_by_key(|candidate| candidate.tier)
            .and_then(|candidate| snapshot.map.entry(candidate.path));
        let mut outcome = match entry {
            Some(entry) => {
                let graph = adapter.load_graph().unwrap_or_default();
                CommandOutcome::from_value(DescribeOutput {
                    path: entry.path.clone(),
                    category: entry.category,
                    areas: entry.areas.clone(),
                    description: entry.description.clone(),
                    imports: owned(graph.dependencies_of(&entry.path)),
                    imported_by: owned(graph.dependents_of(&entry.path)),
                })?
            }
            None => CommandOutcome::not_found(ctx.hint_formatter().missing_file(query, &files))?,
        };
        attach_snapshot(&mut outcome, project, &snapshot);
        Ok(outcome)
    }
}

fn owned(paths: Vec<&str>) -> Vec<String> {
    paths.into_iter().map(str::to_string).collect()
}
