// src/job/record.rs

use serde::{Deserialize, Serialize};

use crate::types::{JobId, TriggerKind};

/// One exported batch document: `{ "jobs": [ ... ] }`.
///
/// Unknown fields are ignored; a document without `jobs` is an empty batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobBatch {
    #[serde(default)]
    pub jobs: Vec<JobRecord>,
}

impl JobBatch {
    pub fn new(jobs: Vec<JobRecord>) -> Self {
        Self { jobs }
    }

    /// Concatenate several batches into one logical batch, preserving order.
    pub fn merge(batches: impl IntoIterator<Item = JobBatch>) -> Self {
        let jobs = batches.into_iter().flat_map(|b| b.jobs).collect();
        Self { jobs }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// A single job as exported by the legacy scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub job_id: JobId,

    #[serde(default)]
    pub job_name: String,

    #[serde(default)]
    pub job_type: String,

    #[serde(default)]
    pub system: String,

    /// How/when the job runs. `None` when the export omitted it, which the
    /// batch validator reports as an error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<TriggerSpec>,

    #[serde(default)]
    pub dependencies: Vec<Dependency>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_constraints: Option<ExecutionConstraints>,

    #[serde(default)]
    pub notes: String,
}

impl JobRecord {
    /// Ids of the jobs this one depends on, in declaration order.
    pub fn dependency_ids(&self) -> impl Iterator<Item = JobId> + '_ {
        self.dependencies.iter().map(|d| d.depends_on_job_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub depends_on_job_id: JobId,

    #[serde(default)]
    pub required_status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionConstraints {
    /// Expected range is 1..=10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_runtime_minutes: Option<i64>,

    #[serde(default)]
    pub exclude_holidays: bool,
}

/// Trigger definition, one variant per kind, each carrying only the fields
/// that kind uses.
///
/// On the wire this is the flat legacy object
/// `{ "type": "...", "cronExpression": ..., "watchPath": ..., ... }`; the
/// conversion goes through [`RawTriggerSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTriggerSpec", into = "RawTriggerSpec")]
pub enum TriggerSpec {
    Schedule {
        cron_expression: Option<String>,
        timezone: Option<String>,
    },
    Manual,
    Api {
        event_source: Option<String>,
        event_type: Option<String>,
    },
    FileWatch {
        watch_path: Option<String>,
        file_pattern: Option<String>,
    },
    Dependency {
        upstream_job_id: Option<JobId>,
    },
    Event {
        event_source: Option<String>,
        event_type: Option<String>,
    },
    DatabaseCdc,
    Approval,
    Threshold,
    Unknown,
}

impl TriggerSpec {
    pub fn kind(&self) -> TriggerKind {
        match self {
            TriggerSpec::Schedule { .. } => TriggerKind::Schedule,
            TriggerSpec::Manual => TriggerKind::Manual,
            TriggerSpec::Api { .. } => TriggerKind::Api,
            TriggerSpec::FileWatch { .. } => TriggerKind::FileWatch,
            TriggerSpec::Dependency { .. } => TriggerKind::Dependency,
            TriggerSpec::Event { .. } => TriggerKind::Event,
            TriggerSpec::DatabaseCdc => TriggerKind::DatabaseCdc,
            TriggerSpec::Approval => TriggerKind::Approval,
            TriggerSpec::Threshold => TriggerKind::Threshold,
            TriggerSpec::Unknown => TriggerKind::Unknown,
        }
    }
}

/// Flat wire representation of a trigger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTriggerSpec {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron_expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_job_id: Option<JobId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
}

impl From<RawTriggerSpec> for TriggerSpec {
    fn from(raw: RawTriggerSpec) -> Self {
        match TriggerKind::normalize(&raw.kind) {
            TriggerKind::Schedule => TriggerSpec::Schedule {
                cron_expression: raw.cron_expression,
                timezone: raw.timezone,
            },
            TriggerKind::Manual => TriggerSpec::Manual,
            TriggerKind::Api => TriggerSpec::Api {
                event_source: raw.event_source,
                event_type: raw.event_type,
            },
            TriggerKind::FileWatch => TriggerSpec::FileWatch {
                watch_path: raw.watch_path,
                file_pattern: raw.file_pattern,
            },
            TriggerKind::Dependency => TriggerSpec::Dependency {
                upstream_job_id: raw.upstream_job_id,
            },
            TriggerKind::Event => TriggerSpec::Event {
                event_source: raw.event_source,
                event_type: raw.event_type,
            },
            TriggerKind::DatabaseCdc => TriggerSpec::DatabaseCdc,
            TriggerKind::Approval => TriggerSpec::Approval,
            TriggerKind::Threshold => TriggerSpec::Threshold,
            TriggerKind::Unknown => TriggerSpec::Unknown,
        }
    }
}

impl From<TriggerSpec> for RawTriggerSpec {
    fn from(spec: TriggerSpec) -> Self {
        let mut raw = RawTriggerSpec {
            kind: spec.kind().as_str().to_string(),
            ..RawTriggerSpec::default()
        };
        match spec {
            TriggerSpec::Schedule {
                cron_expression,
                timezone,
            } => {
                raw.cron_expression = cron_expression;
                raw.timezone = timezone;
            }
            TriggerSpec::Api {
                event_source,
                event_type,
            }
            | TriggerSpec::Event {
                event_source,
                event_type,
            } => {
                raw.event_source = event_source;
                raw.event_type = event_type;
            }
            TriggerSpec::FileWatch {
                watch_path,
                file_pattern,
            } => {
                raw.watch_path = watch_path;
                raw.file_pattern = file_pattern;
            }
            TriggerSpec::Dependency { upstream_job_id } => {
                raw.upstream_job_id = upstream_job_id;
            }
            TriggerSpec::Manual
            | TriggerSpec::DatabaseCdc
            | TriggerSpec::Approval
            | TriggerSpec::Threshold
            | TriggerSpec::Unknown => {}
        }
        raw
    }
}
