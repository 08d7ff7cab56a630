// src/engine/service.rs

//! Analysis and execution of trigger migrations over the handler registry.

use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, error, info};

use crate::codec::Codec;
use crate::engine::analysis::{AnalysisEntry, Classification, MigrationAnalysis};
use crate::engine::result::MigrationResult;
use crate::errors::MigrationError;
use crate::fs::FileStore;
use crate::handler::HandlerRegistry;
use crate::job::{OutputJob, Trigger};

static UNSAFE_FILE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("file name pattern is valid"));

/// `<jobName>_<timestampMillis>.json`, with characters that are unsafe in
/// file names replaced by `_`.
pub fn output_file_name(job_name: &str, timestamp_millis: i64) -> String {
    let stem = UNSAFE_FILE_CHARS.replace_all(job_name.trim(), "_");
    let stem = if stem.is_empty() { "job".into() } else { stem };
    format!("{stem}_{timestamp_millis}.json")
}

/// Classifies and migrates triggers, writing each successful output job
/// through the [`FileStore`].
#[derive(Debug)]
pub struct MigrationService {
    registry: HandlerRegistry,
    codec: Arc<dyn Codec>,
    store: Arc<dyn FileStore>,
}

impl MigrationService {
    pub fn new(registry: HandlerRegistry, codec: Arc<dyn Codec>, store: Arc<dyn FileStore>) -> Self {
        Self {
            registry,
            codec,
            store,
        }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Sort every trigger into exactly one bucket. Never calls `migrate`.
    pub fn analyze(&self, triggers: &[Trigger]) -> MigrationAnalysis {
        info!(triggers = triggers.len(), "analyzing triggers");
        let mut analysis = MigrationAnalysis::default();

        for trigger in triggers {
            let (class, entry) = match self.registry.find(trigger) {
                None => (
                    Classification::Unsupported,
                    AnalysisEntry {
                        job_name: trigger.job_name.clone(),
                        kind: trigger.kind,
                        strategy: None,
                        validation: Default::default(),
                    },
                ),
                Some(handler) => {
                    let validation = handler.validate(trigger);
                    let class = if validation.has_errors() {
                        Classification::Invalid
                    } else if validation.has_warnings() {
                        Classification::Workaround
                    } else {
                        Classification::Supported
                    };
                    (
                        class,
                        AnalysisEntry {
                            job_name: trigger.job_name.clone(),
                            kind: trigger.kind,
                            strategy: Some(handler.describe()),
                            validation,
                        },
                    )
                }
            };
            debug!(job = %trigger.job_name, kind = %trigger.kind, ?class, "classified trigger");
            analysis.push(class, entry);
        }

        analysis
    }

    /// Migrate one trigger without writing anything.
    pub fn migrate(&self, trigger: &Trigger) -> Result<OutputJob, MigrationError> {
        let handler = self
            .registry
            .find(trigger)
            .ok_or(MigrationError::NoHandler(trigger.kind))?;

        let validation = handler.validate(trigger);
        if let Some(first) = validation.first_error() {
            return Err(MigrationError::Validation(first.to_string()));
        }

        handler.migrate(trigger)
    }

    /// Encode `job` and append it under the trigger's output directory.
    pub fn publish(&self, trigger: &Trigger, job: &OutputJob) -> Result<PathBuf, MigrationError> {
        let bytes = self.codec.encode(job).map_err(|e| MigrationError::Encode {
            job: job.name.clone(),
            reason: e.to_string(),
        })?;

        let millis = chrono::Utc::now().timestamp_millis();
        let path = output_path(&trigger.output_dir, &job.name, millis);

        self.store
            .append(&path, &bytes)
            .map_err(|e| MigrationError::Output {
                job: job.name.clone(),
                reason: format!("{e:#}"),
            })?;

        debug!(job = %job.name, ?path, "wrote output job");
        Ok(path)
    }

    /// Migrate and publish every trigger independently; one failure never
    /// stops the rest.
    pub fn migrate_all(&self, triggers: &[Trigger]) -> MigrationResult {
        info!(triggers = triggers.len(), "migrating triggers");
        let mut result = MigrationResult::new();

        for trigger in triggers {
            match self
                .migrate(trigger)
                .and_then(|job| self.publish(trigger, &job))
            {
                Ok(path) => result.record_success(&trigger.job_name, Some(path)),
                Err(e) => {
                    error!(job = %trigger.job_name, error = %e, "failed to migrate trigger");
                    result.record_failure(&trigger.job_name, e.to_string());
                }
            }
        }

        result
    }
}

fn output_path(dir: &Path, job_name: &str, millis: i64) -> PathBuf {
    dir.join(output_file_name(job_name, millis))
}
