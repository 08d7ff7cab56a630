// src/engine/result.rs

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

pub const MIGRATED_SUCCESSFULLY: &str = "Migrated successfully";

/// Per-job migration outcomes.
///
/// A job name is in exactly one of `successes` / `failures`; recording a new
/// outcome for a name replaces any earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationResult {
    successes: BTreeMap<String, String>,
    failures: BTreeMap<String, String>,
    outputs: BTreeMap<String, PathBuf>,
}

impl MigrationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_success(&mut self, job_name: &str, output: Option<PathBuf>) {
        self.failures.remove(job_name);
        self.successes
            .insert(job_name.to_string(), MIGRATED_SUCCESSFULLY.to_string());
        match output {
            Some(path) => {
                self.outputs.insert(job_name.to_string(), path);
            }
            None => {
                self.outputs.remove(job_name);
            }
        }
    }

    pub(crate) fn record_failure(&mut self, job_name: &str, reason: impl Into<String>) {
        self.successes.remove(job_name);
        self.outputs.remove(job_name);
        self.failures.insert(job_name.to_string(), reason.into());
    }

    pub fn successes(&self) -> &BTreeMap<String, String> {
        &self.successes
    }

    pub fn failures(&self) -> &BTreeMap<String, String> {
        &self.failures
    }

    /// Where each successful job's output document was written.
    pub fn outputs(&self) -> &BTreeMap<String, PathBuf> {
        &self.outputs
    }

    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Human-readable migration report.
impl fmt::Display for MigrationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== MIGRATION RESULT ===")?;
        writeln!(f, "Total: {}", self.total())?;
        writeln!(f, "Success: {}", self.successes.len())?;
        writeln!(f, "Failed: {}", self.failures.len())?;

        if !self.failures.is_empty() {
            writeln!(f, "\nFailures:")?;
            for (job, reason) in &self.failures {
                writeln!(f, "  - {job}: {reason}")?;
            }
        }
        Ok(())
    }
}
