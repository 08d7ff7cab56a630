// src/handler/file_watch.rs

use tracing::warn;

use crate::errors::MigrationError;
use crate::handler::{TriggerHandler, ensure_valid};
use crate::job::{OutputJob, OutputTrigger, Trigger};
use crate::types::TriggerKind;
use crate::validate::ValidationOutcome;

/// Every five minutes.
pub const POLLING_SCHEDULE: &str = "*/5 * * * *";

pub const POLLING_WARNING: &str = "File watch triggers will be converted to 5-minute polling. \
     Real-time file detection not available.";

/// The target scheduler has no file-arrival trigger, so file watches become
/// a polling schedule guarded by a pre-script that skips the run until the
/// watched file exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileWatchTriggerHandler;

/// Bash guard: exit non-zero (skip the run) unless `watch_path` exists.
pub fn guard_script(watch_path: &str) -> String {
    let quoted = shell_quote(watch_path);
    format!(
        "#!/bin/bash\n\
         # Check if file exists before running job\n\
         if [ ! -f {quoted} ]; then\n  \
         echo 'File not found, skipping execution'\n  \
         exit 1\n\
         fi\n"
    )
}

/// Single-quote for POSIX shells, escaping embedded single quotes.
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

impl TriggerHandler for FileWatchTriggerHandler {
    fn kind(&self) -> TriggerKind {
        TriggerKind::FileWatch
    }

    fn validate(&self, trigger: &Trigger) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::new();

        let has_path = trigger
            .watch_path
            .as_deref()
            .is_some_and(|p| !p.trim().is_empty());
        if !has_path {
            outcome = outcome.with_error("File watch trigger missing watch path");
        }

        outcome.with_warning(POLLING_WARNING)
    }

    fn migrate(&self, trigger: &Trigger) -> Result<OutputJob, MigrationError> {
        ensure_valid(self, trigger)?;

        let watch_path = trigger.watch_path.as_deref().unwrap_or_default();

        warn!(
            job = %trigger.job_name,
            watch_path,
            "FILE_WATCH trigger converted to polling"
        );

        let out = OutputTrigger {
            schedule: Some(POLLING_SCHEDULE.to_string()),
            timezone: Some("UTC".to_string()),
            pre_script: Some(guard_script(watch_path)),
            ..OutputTrigger::new("SCHEDULED")
        };

        let mut job = OutputJob::for_trigger(trigger, "SCHEDULED", out)
            .with_note("WORKAROUND: File watch converted to 5-minute polling")
            .with_note(format!("Original watch path: {watch_path}"))
            .with_metadata("original_trigger_type", "FILE_WATCH")
            .with_metadata("migration_strategy", "POLLING_WORKAROUND");

        if let Some(pattern) = trigger.file_pattern.as_deref().filter(|p| !p.is_empty()) {
            job = job.with_note(format!("Original file pattern: {pattern}"));
        }

        Ok(job)
    }

    fn describe(&self) -> &'static str {
        "Workaround - File watch converted to scheduled polling (5 min interval)"
    }
}
