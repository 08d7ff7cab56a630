// src/handler/api.rs

use tracing::info;

use crate::errors::MigrationError;
use crate::handler::{TriggerHandler, ensure_valid};
use crate::job::{OutputJob, OutputTrigger, Trigger};
use crate::types::TriggerKind;
use crate::validate::ValidationOutcome;

#[derive(Debug, Clone, Copy, Default)]
pub struct ApiTriggerHandler;

impl TriggerHandler for ApiTriggerHandler {
    fn kind(&self) -> TriggerKind {
        TriggerKind::Api
    }

    fn validate(&self, _trigger: &Trigger) -> ValidationOutcome {
        ValidationOutcome::new()
    }

    fn migrate(&self, trigger: &Trigger) -> Result<OutputJob, MigrationError> {
        ensure_valid(self, trigger)?;

        info!(job = %trigger.job_name, "migrating API trigger");

        let out = OutputTrigger {
            api_enabled: Some(true),
            ..OutputTrigger::new("API")
        };
        let mut job = OutputJob::for_trigger(trigger, "API", out);

        if let Some(source) = &trigger.event_source {
            job = job.with_metadata("event_source", source.clone());
        }
        if let Some(event_type) = &trigger.event_type {
            job = job.with_metadata("event_type", event_type.clone());
        }

        Ok(job)
    }

    fn describe(&self) -> &'static str {
        "Direct migration - target scheduler supports API triggers"
    }
}
