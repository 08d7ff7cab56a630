mod common;

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use common::{JobBatchBuilder, JobRecordBuilder};
use jobmigrate::codec::JsonCodec;
use jobmigrate::engine::MigrationService;
use jobmigrate::exec::WorkerPool;
use jobmigrate::fs::mock::MockFileStore;
use jobmigrate::handler::HandlerRegistry;
use jobmigrate::job::{JobBatch, Trigger, TriggerSpec};
use jobmigrate::validate::BatchValidator;
use proptest::prelude::*;

fn trigger_strategy() -> impl Strategy<Value = Option<TriggerSpec>> {
    prop_oneof![
        Just(None),
        Just(Some(TriggerSpec::Manual)),
        Just(Some(TriggerSpec::Approval)),
        Just(Some(TriggerSpec::Threshold)),
        Just(Some(TriggerSpec::Unknown)),
        prop::option::of("[0-9*/ ]{0,14}").prop_map(|cron| Some(TriggerSpec::Schedule {
            cron_expression: cron,
            timezone: None,
        })),
        prop::option::of("/[a-z]{1,8}").prop_map(|path| Some(TriggerSpec::FileWatch {
            watch_path: path,
            file_pattern: None,
        })),
        prop::option::of(-3i64..40).prop_map(|id| Some(TriggerSpec::Dependency {
            upstream_job_id: id,
        })),
    ]
}

// Random jobs with ids drawn from a small range so duplicates, dangling
// references and cycles all show up.
fn batch_strategy(max_jobs: usize) -> impl Strategy<Value = JobBatch> {
    prop::collection::vec(
        (
            -1i64..30,
            "[a-z]{0,6}",
            trigger_strategy(),
            prop::collection::vec(0i64..35, 0..3),
            prop::option::of(-2i64..14),
        ),
        0..max_jobs,
    )
    .prop_map(|jobs| {
        let mut builder = JobBatchBuilder::new();
        for (id, name, trigger, deps, priority) in jobs {
            let mut job = JobRecordBuilder::new(id).name(&name).no_trigger();
            if let Some(spec) = trigger {
                job = job.trigger(spec);
            }
            for dep in deps {
                job = job.depends_on(dep);
            }
            if let Some(p) = priority {
                job = job.priority(p);
            }
            builder = builder.job(job);
        }
        builder.build()
    })
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_analysis_buckets_partition_input(batch in batch_strategy(25)) {
        let store = MockFileStore::new();
        let service = MigrationService::new(
            HandlerRegistry::new(),
            Arc::new(JsonCodec),
            Arc::new(store.clone()),
        );
        let triggers = Trigger::from_batch(&batch, Path::new("out"));

        let analysis = service.analyze(&triggers);

        prop_assert_eq!(
            analysis.supported().len()
                + analysis.workaround().len()
                + analysis.unsupported().len()
                + analysis.invalid().len(),
            triggers.len()
        );
        prop_assert!(store.files_under("out").is_empty());
    }

    #[test]
    fn test_migration_result_names_are_disjoint(batch in batch_strategy(25)) {
        let store = MockFileStore::new();
        let service = MigrationService::new(
            HandlerRegistry::new(),
            Arc::new(JsonCodec),
            Arc::new(store.clone()),
        );
        let triggers = Trigger::from_batch(&batch, Path::new("out"));

        let result = service.migrate_all(&triggers);

        let successes: BTreeSet<_> = result.successes().keys().collect();
        let failures: BTreeSet<_> = result.failures().keys().collect();
        prop_assert!(successes.is_disjoint(&failures));

        let names: BTreeSet<_> = triggers.iter().map(|t| &t.job_name).collect();
        prop_assert_eq!(successes.len() + failures.len(), names.len());
    }

    #[test]
    fn test_pool_and_sequential_validation_agree(batch in batch_strategy(40)) {
        let rt = runtime();
        let sequential = BatchValidator::new(Arc::new(WorkerPool::new("seq", 1)), usize::MAX);
        let concurrent = BatchValidator::new(Arc::new(WorkerPool::new("par", 4)), 1);

        let (a, b) = rt.block_on(async {
            (
                sequential.validate(&batch).await.unwrap(),
                concurrent.validate(&batch).await.unwrap(),
            )
        });

        prop_assert_eq!(a, b);
    }
}
