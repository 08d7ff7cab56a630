#![allow(dead_code, unused_imports)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use jobmigrate::engine::{MemoryReportSink, Orchestrator};
use jobmigrate::exec::WorkerPool;
use jobmigrate::job::JobBatch;
use jobmigrate::validate::BatchValidator;

pub use jobmigrate_test_utils::builders::{ConfigFileBuilder, JobBatchBuilder, JobRecordBuilder};
pub use jobmigrate_test_utils::{init_tracing, with_timeout, write_export};

/// Validator with a small pool and the default threshold of 10.
pub fn validator() -> BatchValidator {
    BatchValidator::new(Arc::new(WorkerPool::new("validation", 4)), 10)
}

/// Orchestrator writing into `out`, capturing reports in the returned sink.
pub fn orchestrator(out: &Path, dry_run: bool) -> (Orchestrator, MemoryReportSink) {
    let sink = MemoryReportSink::new();
    let orchestrator = Orchestrator::builder(out)
        .config(ConfigFileBuilder::new().parser_workers(2).build())
        .sink(Arc::new(sink.clone()))
        .dry_run(dry_run)
        .build();
    (orchestrator, sink)
}

/// The standard mixed batch: one job per supported kind plus one
/// unsupported APPROVAL job.
pub fn mixed_batch() -> JobBatchBuilder {
    JobBatchBuilder::new()
        .job(JobRecordBuilder::new(1).name("nightly-etl").schedule("0 2 * * *"))
        .job(JobRecordBuilder::new(2).name("adhoc-report").manual())
        .job(JobRecordBuilder::new(3).name("order-hook").api("orders", "CREATED"))
        .job(JobRecordBuilder::new(4).name("inbox-loader").file_watch("/data/inbox/orders.csv"))
        .job(
            JobRecordBuilder::new(5)
                .name("post-etl")
                .upstream(1)
                .depends_on(1),
        )
        .job(
            JobRecordBuilder::new(6)
                .name("finance-signoff")
                .trigger(jobmigrate::job::TriggerSpec::Approval),
        )
}

pub fn batch(builder: JobBatchBuilder) -> JobBatch {
    builder.build()
}
