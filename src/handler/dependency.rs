// src/handler/dependency.rs

use tracing::info;

use crate::errors::MigrationError;
use crate::handler::{TriggerHandler, ensure_valid};
use crate::job::{OutputJob, OutputTrigger, Trigger};
use crate::types::TriggerKind;
use crate::validate::ValidationOutcome;

/// Upstream-completion triggers become event triggers with chaining metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyTriggerHandler;

impl TriggerHandler for DependencyTriggerHandler {
    fn kind(&self) -> TriggerKind {
        TriggerKind::Dependency
    }

    fn validate(&self, trigger: &Trigger) -> ValidationOutcome {
        let outcome = ValidationOutcome::new();
        match trigger.upstream_job_id {
            None => outcome.with_error("Dependency trigger missing upstream job ID"),
            Some(id) if id <= 0 => {
                outcome.with_error(format!("Upstream job ID must be positive: {id}"))
            }
            Some(_) => outcome,
        }
    }

    fn migrate(&self, trigger: &Trigger) -> Result<OutputJob, MigrationError> {
        ensure_valid(self, trigger)?;

        // ensure_valid guarantees the id is present.
        let upstream = trigger.upstream_job_id.unwrap_or_default();

        info!(
            job = %trigger.job_name,
            upstream_job_id = upstream,
            "migrating DEPENDENCY trigger"
        );

        let out = OutputTrigger {
            api_enabled: Some(false),
            ..OutputTrigger::new("EVENT")
        };

        Ok(OutputJob::for_trigger(trigger, "DEPENDENCY", out)
            .with_metadata("upstream_job_id", upstream.to_string())
            .with_metadata("trigger_type", "DEPENDENCY")
            .with_metadata("trigger_condition", "ON_SUCCESS")
            .with_note(format!(
                "This job is triggered when job {upstream} completes successfully"
            )))
    }

    fn describe(&self) -> &'static str {
        "Direct migration - target scheduler supports dependency-based job chaining"
    }
}
