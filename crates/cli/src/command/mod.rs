mod context;
pub mod domain;
pub mod infra;
mod services;

pub use context::CommandDefaults;
pub use domain::{
    classify_error, AreaOutput, AreasOutput, CacheClearOutput, CacheStatusOutput, CommandAction,
    CommandRequest, CommandResponse, CommandStatus, DescribeOutput, FindOutput, Hint, HintKind,
    MapOutput, RequestOptions, ResponseMeta,
};

use anyhow::Result;
use context::CommandContext;
use services::Services;

pub struct CommandHandler {
    services: Services,
    defaults: CommandDefaults,
}

impl CommandHandler {
    pub fn new(defaults: CommandDefaults) -> Self {
        Self {
            services: Services::default(),
            defaults,
        }
    }

    pub fn execute(&self, request: CommandRequest) -> Result<CommandResponse> {
        let CommandRequest {
            action,
            payload,
            options,
        } = request;
        log::debug!("Executing {}", action.as_str());

        let ctx = CommandContext::new(self.defaults.clone(), options);
        let mut outcome = self.services.route(action, payload, &ctx)?;

        outcome.meta.duration_ms = outcome
            .meta
            .duration_ms
            .or_else(|| Some(outcome.started.elapsed().as_millis() as u64));

        Ok(CommandResponse {
            status: outcome.status,
            message: outcome.message,
            hints: outcome.hints,
            data: outcome.data,
            meta: outcome.meta,
        })
    }

    /// Like [`CommandHandler::execute`], folding failures into an error
    /// response with recovery hints.
    pub fn respond(&self, request: CommandRequest) -> CommandResponse {
        match self.execute(request) {
            Ok(response) => response,
            Err(err) => {
                let message = format!("{err:#}");
                let hints = classify_error(&message);
                CommandResponse::error_with_hints(message, hints)
            }
        }
    }
}
