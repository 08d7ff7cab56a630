// src/job/mod.rs

//! Job data model.
//!
//! - [`record`] holds the exported job records as decoded from a batch
//!   document (`JobBatch`, `JobRecord`, `TriggerSpec`, ...).
//! - [`trigger`] holds the normalised, flattened [`Trigger`] that handlers
//!   work on.
//! - [`output`] holds the target-scheduler job definition produced by a
//!   successful migration.

pub mod output;
pub mod record;
pub mod trigger;

pub use output::{OutputJob, OutputTrigger};
pub use record::{Dependency, ExecutionConstraints, JobBatch, JobRecord, TriggerSpec};
pub use trigger::Trigger;
