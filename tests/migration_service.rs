mod common;

use std::path::Path;
use std::sync::Arc;

use common::mixed_batch;
use jobmigrate::codec::JsonCodec;
use jobmigrate::engine::{Classification, MIGRATED_SUCCESSFULLY, MigrationService, output_file_name};
use jobmigrate::errors::MigrationError;
use jobmigrate::fs::FileStore;
use jobmigrate::fs::mock::MockFileStore;
use jobmigrate::handler::HandlerRegistry;
use jobmigrate::job::{OutputJob, Trigger};
use jobmigrate::types::TriggerKind;

fn service(store: &MockFileStore) -> MigrationService {
    MigrationService::new(
        HandlerRegistry::new(),
        Arc::new(JsonCodec),
        Arc::new(store.clone()),
    )
}

fn mixed_triggers(out: &Path) -> Vec<Trigger> {
    Trigger::from_batch(&mixed_batch().build(), out)
}

#[test]
fn test_analysis_partitions_every_trigger() {
    let store = MockFileStore::new();
    let triggers = mixed_triggers(Path::new("out"));

    let analysis = service(&store).analyze(&triggers);

    assert_eq!(analysis.total(), triggers.len());
    assert_eq!(analysis.supported().len(), 4);
    assert_eq!(analysis.workaround().len(), 1);
    assert_eq!(analysis.unsupported().len(), 1);
    assert_eq!(analysis.invalid().len(), 0);
    assert_eq!(
        analysis.classification_of("inbox-loader"),
        Some(Classification::Workaround)
    );
    assert_eq!(
        analysis.classification_of("finance-signoff"),
        Some(Classification::Unsupported)
    );
    assert!(!analysis.is_fully_migratable());
}

#[test]
fn test_analysis_writes_nothing() {
    let store = MockFileStore::new();
    let _ = service(&store).analyze(&mixed_triggers(Path::new("out")));
    assert!(store.files_under("out").is_empty());
}

#[test]
fn test_invalid_trigger_classified_invalid() {
    let store = MockFileStore::new();
    let triggers = vec![Trigger::new(TriggerKind::Schedule, "broken")];

    let analysis = service(&store).analyze(&triggers);

    assert_eq!(analysis.invalid().len(), 1);
    assert_eq!(analysis.blocked(), 1);
    let report = analysis.to_string();
    assert!(report.contains("INVALID TRIGGERS:"));
    assert!(report.contains("Schedule trigger missing cron expression"));
}

#[test]
fn test_analysis_report_sections() {
    let store = MockFileStore::new();
    let report = service(&store)
        .analyze(&mixed_triggers(Path::new("out")))
        .to_string();

    assert!(report.starts_with("=== TRIGGER MIGRATION ANALYSIS ==="));
    assert!(report.contains("Total Triggers: 6"));
    assert!(report.contains("MIGRATION WITH WORKAROUNDS:"));
    assert!(report.contains("UNSUPPORTED TRIGGERS:"));
}

#[test]
fn test_migrate_unsupported_kind_has_no_handler() {
    let store = MockFileStore::new();
    let err = service(&store)
        .migrate(&Trigger::new(TriggerKind::Approval, "finance-signoff"))
        .unwrap_err();

    assert_eq!(err, MigrationError::NoHandler(TriggerKind::Approval));
    assert!(err.to_string().contains("no handler"));
}

#[test]
fn test_migrate_surfaces_first_validation_error() {
    let store = MockFileStore::new();
    let err = service(&store)
        .migrate(&Trigger::new(TriggerKind::FileWatch, "loader"))
        .unwrap_err();

    assert_eq!(
        err,
        MigrationError::Validation("File watch trigger missing watch path".to_string())
    );
}

#[test]
fn test_migrate_all_writes_outputs_and_partitions_results() {
    let store = MockFileStore::new();
    let triggers = mixed_triggers(Path::new("out"));

    let result = service(&store).migrate_all(&triggers);

    assert_eq!(result.total(), triggers.len());
    assert_eq!(result.success_count(), 5);
    assert_eq!(result.failure_count(), 1);
    assert!(result.failures()["finance-signoff"].contains("no handler"));
    assert_eq!(result.successes()["nightly-etl"], MIGRATED_SUCCESSFULLY);
    for name in result.failures().keys() {
        assert!(!result.successes().contains_key(name));
    }

    let written = store.files_under("out");
    assert_eq!(written.len(), 5);

    let path = &result.outputs()["nightly-etl"];
    let job: OutputJob = serde_json::from_slice(&store.read(path).unwrap()).unwrap();
    assert_eq!(job.name, "nightly-etl");
    assert_eq!(job.trigger.timezone.as_deref(), Some("UTC"));
}

#[test]
fn test_write_failure_is_isolated_per_job() {
    let store = MockFileStore::new();
    store.deny_writes_under("denied");

    let triggers = vec![
        Trigger::new(TriggerKind::Manual, "ok-before").with_output_dir("out"),
        Trigger::new(TriggerKind::Manual, "blocked").with_output_dir("denied"),
        Trigger::new(TriggerKind::Manual, "ok-after").with_output_dir("out"),
    ];

    let result = service(&store).migrate_all(&triggers);

    assert_eq!(result.success_count(), 2);
    assert!(result.failures()["blocked"].contains("failed to write output job"));
    assert_eq!(store.files_under("out").len(), 2);
}

#[test]
fn test_empty_input_gives_empty_result() {
    let store = MockFileStore::new();
    let result = service(&store).migrate_all(&[]);
    assert!(result.is_empty());
    assert!(!result.has_failures());
}

#[test]
fn test_output_file_name_sanitizes() {
    assert_eq!(output_file_name("nightly-etl", 1700000000000), "nightly-etl_1700000000000.json");
    assert_eq!(output_file_name("a/b c", 5), "a_b_c_5.json");
    assert_eq!(output_file_name("   ", 5), "job_5.json");
}

#[test]
fn test_output_carries_system_and_constraints() {
    let store = MockFileStore::new();
    let batch = common::JobBatchBuilder::new()
        .job(
            common::JobRecordBuilder::new(1)
                .name("weighted")
                .system("MAINFRAME")
                .priority(3)
                .max_runtime_minutes(90),
        )
        .build();
    let triggers = Trigger::from_batch(&batch, Path::new("out"));

    let job = service(&store).migrate(&triggers[0]).unwrap();

    assert_eq!(job.system.as_deref(), Some("MAINFRAME"));
    assert_eq!(job.priority, Some(3));
    assert_eq!(job.max_runtime_minutes, Some(90));
}
