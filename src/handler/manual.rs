// src/handler/manual.rs

use tracing::info;

use crate::errors::MigrationError;
use crate::handler::{TriggerHandler, ensure_valid};
use crate::job::{OutputJob, OutputTrigger, Trigger};
use crate::types::TriggerKind;
use crate::validate::ValidationOutcome;

#[derive(Debug, Clone, Copy, Default)]
pub struct ManualTriggerHandler;

impl TriggerHandler for ManualTriggerHandler {
    fn kind(&self) -> TriggerKind {
        TriggerKind::Manual
    }

    fn validate(&self, _trigger: &Trigger) -> ValidationOutcome {
        ValidationOutcome::new()
    }

    fn migrate(&self, trigger: &Trigger) -> Result<OutputJob, MigrationError> {
        ensure_valid(self, trigger)?;

        info!(job = %trigger.job_name, "migrating MANUAL trigger");

        let out = OutputTrigger {
            api_enabled: Some(true),
            ..OutputTrigger::new("MANUAL")
        };
        Ok(OutputJob::for_trigger(trigger, "MANUAL", out))
    }

    fn describe(&self) -> &'static str {
        "Direct migration - manual runs are exposed through the target API"
    }
}
