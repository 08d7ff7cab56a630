// src/validate/batch.rs

use std::sync::Arc;

use tracing::info;

use crate::dag::validate_dependencies;
use crate::errors::Result;
use crate::exec::WorkerPool;
use crate::job::{JobBatch, JobRecord};
use crate::validate::{Findings, ValidationOutcome};

/// Lightweight field checks for a single job.
///
/// Errors: empty name, missing trigger, non-positive id.
/// Warnings: execution constraints outside their expected ranges.
pub fn check_job(job: &JobRecord) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::new();

    if job.job_id <= 0 {
        outcome = outcome.with_error(format!("Job {} has a non-positive ID", job.job_id));
    }

    if job.job_name.trim().is_empty() {
        outcome = outcome.with_error(format!("Job {} has no name", job.job_id));
    }

    if job.trigger.is_none() {
        outcome = outcome.with_error(format!(
            "Job {} ({}) has no trigger",
            job.job_id, job.job_name
        ));
    }

    if let Some(constraints) = &job.execution_constraints {
        if let Some(priority) = constraints.priority {
            if !(1..=10).contains(&priority) {
                outcome = outcome.with_warning(format!(
                    "Job {} ({}) has priority {} outside 1..=10",
                    job.job_id, job.job_name, priority
                ));
            }
        }
        if let Some(minutes) = constraints.max_runtime_minutes {
            if minutes <= 0 {
                outcome = outcome.with_warning(format!(
                    "Job {} ({}) has non-positive max runtime {} minutes",
                    job.job_id, job.job_name, minutes
                ));
            }
        }
    }

    outcome
}

/// Validates a whole batch: per-job checks, then the dependency graph.
///
/// Batches smaller than `concurrent_threshold` are checked on the calling
/// task. Larger ones fan the per-job checks out over the worker pool and
/// wait for all of them before the graph check runs. Either way the graph
/// errors come last and the outcome is the same.
#[derive(Debug, Clone)]
pub struct BatchValidator {
    pool: Arc<WorkerPool>,
    concurrent_threshold: usize,
}

impl BatchValidator {
    pub fn new(pool: Arc<WorkerPool>, concurrent_threshold: usize) -> Self {
        Self {
            pool,
            concurrent_threshold: concurrent_threshold.max(1),
        }
    }

    pub fn concurrent_threshold(&self) -> usize {
        self.concurrent_threshold
    }

    /// Whether a batch of `len` jobs takes the pool path.
    pub fn uses_pool(&self, len: usize) -> bool {
        len >= self.concurrent_threshold
    }

    pub async fn validate(&self, batch: &JobBatch) -> Result<ValidationOutcome> {
        let per_job = if self.uses_pool(batch.len()) {
            info!(
                jobs = batch.len(),
                workers = self.pool.size(),
                "large batch, using concurrent validation"
            );
            self.check_concurrent(batch).await?
        } else {
            info!(jobs = batch.len(), "small batch, using sequential validation");
            check_sequential(batch)
        };

        Ok(per_job.merge(validate_dependencies(&batch.jobs)))
    }

    async fn check_concurrent(&self, batch: &JobBatch) -> Result<ValidationOutcome> {
        let findings = Findings::new();
        let items: Vec<(usize, JobRecord)> = batch.jobs.iter().cloned().enumerate().collect();

        let sink = findings.clone();
        self.pool
            .run_all(items, move |(index, job)| sink.extend(index, check_job(&job)))
            .await?;

        Ok(findings.into_outcome())
    }
}

fn check_sequential(batch: &JobBatch) -> ValidationOutcome {
    batch
        .jobs
        .iter()
        .map(check_job)
        .fold(ValidationOutcome::new(), ValidationOutcome::merge)
}
