// src/job/trigger.rs

use std::path::{Path, PathBuf};

use crate::job::record::{JobBatch, JobRecord, TriggerSpec};
use crate::types::{JobId, TriggerKind};

/// Normalised trigger handed to the handler registry.
///
/// Flattens the record's [`TriggerSpec`] together with the job fields the
/// handlers need (name, system, execution constraints) and the output
/// directory for this migration run. Built once per job and then only read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub kind: TriggerKind,
    pub job_id: JobId,
    pub job_name: String,
    pub system: String,

    pub cron_expression: Option<String>,
    pub timezone: Option<String>,
    pub watch_path: Option<String>,
    pub file_pattern: Option<String>,
    pub event_source: Option<String>,
    pub event_type: Option<String>,
    pub upstream_job_id: Option<JobId>,

    pub priority: Option<i64>,
    pub max_runtime_minutes: Option<i64>,

    /// Where migrated output for this job is written.
    pub output_dir: PathBuf,
}

impl Trigger {
    /// A bare trigger of the given kind with every optional field unset.
    pub fn new(kind: TriggerKind, job_name: impl Into<String>) -> Self {
        Self {
            kind,
            job_id: 0,
            job_name: job_name.into(),
            system: String::new(),
            cron_expression: None,
            timezone: None,
            watch_path: None,
            file_pattern: None,
            event_source: None,
            event_type: None,
            upstream_job_id: None,
            priority: None,
            max_runtime_minutes: None,
            output_dir: PathBuf::from("."),
        }
    }

    /// Normalise one job record. A record without a trigger becomes
    /// [`TriggerKind::Unknown`].
    pub fn from_record(record: &JobRecord, output_dir: &Path) -> Self {
        let kind = record
            .trigger
            .as_ref()
            .map(TriggerSpec::kind)
            .unwrap_or(TriggerKind::Unknown);

        let mut trigger = Trigger::new(kind, record.job_name.clone());
        trigger.job_id = record.job_id;
        trigger.system = record.system.clone();
        trigger.output_dir = output_dir.to_path_buf();

        if let Some(constraints) = &record.execution_constraints {
            trigger.priority = constraints.priority;
            trigger.max_runtime_minutes = constraints.max_runtime_minutes;
        }

        match record.trigger.clone() {
            Some(TriggerSpec::Schedule {
                cron_expression,
                timezone,
            }) => {
                trigger.cron_expression = cron_expression;
                trigger.timezone = timezone;
            }
            Some(TriggerSpec::FileWatch {
                watch_path,
                file_pattern,
            }) => {
                trigger.watch_path = watch_path;
                trigger.file_pattern = file_pattern;
            }
            Some(TriggerSpec::Dependency { upstream_job_id }) => {
                trigger.upstream_job_id = upstream_job_id;
            }
            Some(TriggerSpec::Api {
                event_source,
                event_type,
            })
            | Some(TriggerSpec::Event {
                event_source,
                event_type,
            }) => {
                trigger.event_source = event_source;
                trigger.event_type = event_type;
            }
            Some(TriggerSpec::Manual)
            | Some(TriggerSpec::DatabaseCdc)
            | Some(TriggerSpec::Approval)
            | Some(TriggerSpec::Threshold)
            | Some(TriggerSpec::Unknown)
            | None => {}
        }

        trigger
    }

    /// Normalise every job in a batch, in batch order.
    pub fn from_batch(batch: &JobBatch, output_dir: &Path) -> Vec<Self> {
        batch
            .jobs
            .iter()
            .map(|record| Trigger::from_record(record, output_dir))
            .collect()
    }

    pub fn with_cron(mut self, cron: impl Into<String>) -> Self {
        self.cron_expression = Some(cron.into());
        self
    }

    pub fn with_timezone(mut self, tz: impl Into<String>) -> Self {
        self.timezone = Some(tz.into());
        self
    }

    pub fn with_watch_path(mut self, path: impl Into<String>) -> Self {
        self.watch_path = Some(path.into());
        self
    }

    pub fn with_file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = Some(pattern.into());
        self
    }

    pub fn with_upstream(mut self, job_id: JobId) -> Self {
        self.upstream_job_id = Some(job_id);
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}
