// src/handler/schedule.rs

use tracing::info;

use crate::errors::MigrationError;
use crate::handler::{TriggerHandler, ensure_valid};
use crate::job::{OutputJob, OutputTrigger, Trigger};
use crate::types::TriggerKind;
use crate::validate::ValidationOutcome;

pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Time-based triggers map one to one onto scheduled jobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleTriggerHandler;

/// Shape check only: 5 or 6 whitespace-separated fields.
pub fn is_cron_shaped(expr: &str) -> bool {
    let fields = expr.split_whitespace().count();
    (5..=6).contains(&fields)
}

impl TriggerHandler for ScheduleTriggerHandler {
    fn kind(&self) -> TriggerKind {
        TriggerKind::Schedule
    }

    fn validate(&self, trigger: &Trigger) -> ValidationOutcome {
        let outcome = ValidationOutcome::new();
        match trigger.cron_expression.as_deref() {
            None => outcome.with_error("Schedule trigger missing cron expression"),
            Some(cron) if cron.trim().is_empty() => {
                outcome.with_error("Schedule trigger missing cron expression")
            }
            Some(cron) if !is_cron_shaped(cron) => {
                outcome.with_error(format!("Invalid cron expression: {cron}"))
            }
            Some(_) => outcome,
        }
    }

    fn migrate(&self, trigger: &Trigger) -> Result<OutputJob, MigrationError> {
        ensure_valid(self, trigger)?;

        info!(job = %trigger.job_name, "migrating SCHEDULE trigger");

        let timezone = trigger
            .timezone
            .clone()
            .filter(|tz| !tz.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());

        let out = OutputTrigger {
            schedule: trigger.cron_expression.as_ref().map(|c| c.trim().to_string()),
            timezone: Some(timezone),
            ..OutputTrigger::new("SCHEDULED")
        };

        Ok(OutputJob::for_trigger(trigger, "SCHEDULED", out))
    }

    fn describe(&self) -> &'static str {
        "Direct migration - target scheduler fully supports scheduled triggers"
    }
}
