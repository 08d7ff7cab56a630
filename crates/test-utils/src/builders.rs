#![allow(dead_code)]

use jobmigrate::config::{ConfigFile, RawConfigFile};
use jobmigrate::job::{Dependency, ExecutionConstraints, JobBatch, JobRecord, TriggerSpec};
use jobmigrate::types::JobId;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn concurrent_threshold(mut self, threshold: usize) -> Self {
        self.config.validation.concurrent_threshold = threshold;
        self
    }

    pub fn validation_workers(mut self, workers: usize) -> Self {
        self.config.validation.workers = workers;
        self
    }

    pub fn parser_workers(mut self, workers: usize) -> Self {
        self.config.parser.max_workers = workers;
        self
    }

    pub fn extension(mut self, ext: &str) -> Self {
        self.config.parser.extension = ext.to_string();
        self
    }

    pub fn shutdown_timeout_secs(mut self, secs: u64) -> Self {
        self.config.shutdown.timeout_secs = secs;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `JobRecord`. Starts as a valid MANUAL job named `job-<id>`.
pub struct JobRecordBuilder {
    job: JobRecord,
}

impl JobRecordBuilder {
    pub fn new(id: JobId) -> Self {
        Self {
            job: JobRecord {
                job_id: id,
                job_name: format!("job-{id}"),
                job_type: "BATCH".to_string(),
                system: "LEGACY".to_string(),
                trigger: Some(TriggerSpec::Manual),
                dependencies: vec![],
                execution_constraints: None,
                notes: String::new(),
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.job.job_name = name.to_string();
        self
    }

    pub fn system(mut self, system: &str) -> Self {
        self.job.system = system.to_string();
        self
    }

    pub fn schedule(mut self, cron: &str) -> Self {
        self.job.trigger = Some(TriggerSpec::Schedule {
            cron_expression: Some(cron.to_string()),
            timezone: None,
        });
        self
    }

    pub fn schedule_in(mut self, cron: &str, timezone: &str) -> Self {
        self.job.trigger = Some(TriggerSpec::Schedule {
            cron_expression: Some(cron.to_string()),
            timezone: Some(timezone.to_string()),
        });
        self
    }

    pub fn manual(mut self) -> Self {
        self.job.trigger = Some(TriggerSpec::Manual);
        self
    }

    pub fn api(mut self, source: &str, event_type: &str) -> Self {
        self.job.trigger = Some(TriggerSpec::Api {
            event_source: Some(source.to_string()),
            event_type: Some(event_type.to_string()),
        });
        self
    }

    pub fn file_watch(mut self, path: &str) -> Self {
        self.job.trigger = Some(TriggerSpec::FileWatch {
            watch_path: Some(path.to_string()),
            file_pattern: None,
        });
        self
    }

    pub fn upstream(mut self, upstream: JobId) -> Self {
        self.job.trigger = Some(TriggerSpec::Dependency {
            upstream_job_id: Some(upstream),
        });
        self
    }

    pub fn trigger(mut self, spec: TriggerSpec) -> Self {
        self.job.trigger = Some(spec);
        self
    }

    pub fn no_trigger(mut self) -> Self {
        self.job.trigger = None;
        self
    }

    pub fn depends_on(mut self, dep: JobId) -> Self {
        self.job.dependencies.push(Dependency {
            depends_on_job_id: dep,
            required_status: "SUCCESS".to_string(),
        });
        self
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.job
            .execution_constraints
            .get_or_insert_with(ExecutionConstraints::default)
            .priority = Some(priority);
        self
    }

    pub fn max_runtime_minutes(mut self, minutes: i64) -> Self {
        self.job
            .execution_constraints
            .get_or_insert_with(ExecutionConstraints::default)
            .max_runtime_minutes = Some(minutes);
        self
    }

    pub fn build(self) -> JobRecord {
        self.job
    }
}

/// Builder for `JobBatch`.
#[derive(Default)]
pub struct JobBatchBuilder {
    jobs: Vec<JobRecord>,
}

impl JobBatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn job(mut self, job: JobRecordBuilder) -> Self {
        self.jobs.push(job.build());
        self
    }

    pub fn record(mut self, job: JobRecord) -> Self {
        self.jobs.push(job);
        self
    }

    /// `count` valid MANUAL jobs with ids `first..first + count`.
    pub fn manual_jobs(mut self, first: JobId, count: usize) -> Self {
        for id in first..first + count as JobId {
            self.jobs.push(JobRecordBuilder::new(id).build());
        }
        self
    }

    pub fn build(self) -> JobBatch {
        JobBatch::new(self.jobs)
    }

    /// The batch as the JSON export document it would be read from.
    pub fn to_json(self) -> String {
        serde_json::to_string_pretty(&self.build()).expect("batch serializes")
    }
}
