// src/job/output.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::job::trigger::Trigger;

/// Job definition in the target scheduler's schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputJob {
    pub name: String,

    #[serde(rename = "type")]
    pub job_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    pub trigger: OutputTrigger,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_runtime_minutes: Option<i64>,

    #[serde(default)]
    pub notes: Vec<String>,

    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputTrigger {
    #[serde(rename = "type")]
    pub trigger_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_enabled: Option<bool>,

    /// Shell script run before the job; the job is skipped on non-zero exit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_script: Option<String>,
}

impl OutputTrigger {
    pub fn new(trigger_type: impl Into<String>) -> Self {
        Self {
            trigger_type: trigger_type.into(),
            ..Self::default()
        }
    }
}

impl OutputJob {
    /// Start an output job for `trigger`, carrying over the job name, system
    /// and execution constraints.
    pub fn for_trigger(trigger: &Trigger, job_type: impl Into<String>, out: OutputTrigger) -> Self {
        let system = if trigger.system.is_empty() {
            None
        } else {
            Some(trigger.system.clone())
        };

        Self {
            name: trigger.job_name.clone(),
            job_type: job_type.into(),
            system,
            trigger: out,
            priority: trigger.priority,
            max_runtime_minutes: trigger.max_runtime_minutes,
            notes: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
