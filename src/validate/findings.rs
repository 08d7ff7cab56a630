// src/validate/findings.rs

use std::sync::{Arc, Mutex, MutexGuard};

use crate::validate::ValidationOutcome;

#[derive(Debug, Default)]
struct Entries {
    /// `(job index, message)`; the index only orders the final outcome.
    errors: Vec<(usize, String)>,
    warnings: Vec<(usize, String)>,
}

/// Append-only, thread-safe buffer of validation findings.
///
/// Workers push into a shared clone while the pool runs; after the join
/// barrier the owner turns it into an immutable [`ValidationOutcome`] with
/// [`Findings::into_outcome`]. Messages are ordered by job index, then by
/// push order within a job, so the result does not depend on scheduling.
#[derive(Debug, Clone, Default)]
pub struct Findings {
    inner: Arc<Mutex<Entries>>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record everything from one job's outcome.
    pub fn extend(&self, job_index: usize, outcome: ValidationOutcome) {
        let mut entries = self.entries();
        entries
            .errors
            .extend(outcome.errors().iter().map(|e| (job_index, e.clone())));
        entries
            .warnings
            .extend(outcome.warnings().iter().map(|w| (job_index, w.clone())));
    }

    /// Freeze the buffer. Call only after every writer has finished.
    pub fn into_outcome(self) -> ValidationOutcome {
        let mut entries = std::mem::take(&mut *self.entries());
        entries.errors.sort_by_key(|(index, _)| *index);
        entries.warnings.sort_by_key(|(index, _)| *index);

        ValidationOutcome::from_parts(
            entries.errors.into_iter().map(|(_, m)| m).collect(),
            entries.warnings.into_iter().map(|(_, m)| m).collect(),
        )
    }
}
