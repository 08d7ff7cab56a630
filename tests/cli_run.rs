mod common;

use clap::Parser;
use common::{JobBatchBuilder, JobRecordBuilder, init_tracing, mixed_batch, with_timeout, write_export};
use jobmigrate::cli::CliArgs;
use jobmigrate::errors::MigrateError;
use jobmigrate::run;
use tempfile::TempDir;

fn args(input: &std::path::Path, output: &std::path::Path, extra: &[&str]) -> CliArgs {
    let mut argv = vec![
        "jobmigrate".to_string(),
        input.display().to_string(),
        output.display().to_string(),
    ];
    argv.extend(extra.iter().map(|s| s.to_string()));
    CliArgs::parse_from(argv)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_run_migrates_directory() {
    init_tracing();
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let out_dir = output.path().join("migrated");
    write_export(input.path(), "export.json", mixed_batch());
    std::fs::write(input.path().join("README.txt"), "ignored").unwrap();

    let report = with_timeout(run(args(input.path(), &out_dir, &[]))).await.unwrap();

    assert!(report.is_done());
    assert_eq!(report.result.success_count(), 5);
    assert_eq!(std::fs::read_dir(&out_dir).unwrap().count(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_run_reports_validation_failure() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_export(
        input.path(),
        "export.json",
        JobBatchBuilder::new().job(JobRecordBuilder::new(1).depends_on(9999)),
    );

    let err = with_timeout(run(args(input.path(), output.path(), &[])))
        .await
        .unwrap_err();

    match err {
        MigrateError::ValidationFailed(msg) => assert!(msg.contains("non-existent job 9999")),
        other => panic!("expected ValidationFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_run_dry_run_flag() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_export(input.path(), "export.json", mixed_batch());

    let report = with_timeout(run(args(input.path(), output.path(), &["--dry-run"])))
        .await
        .unwrap();

    assert!(report.is_done());
    assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_run_rejects_missing_input_dir() {
    let output = TempDir::new().unwrap();
    let missing = output.path().join("nope");

    let err = run(args(&missing, output.path(), &[])).await.unwrap_err();

    assert!(err.to_string().contains("input directory does not exist"));
}

#[tokio::test]
async fn test_run_rejects_empty_input_dir() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let err = run(args(input.path(), output.path(), &[])).await.unwrap_err();

    assert!(err.to_string().contains("no .json files found"));
}

#[test]
fn test_cli_parses_options() {
    let parsed = CliArgs::parse_from([
        "jobmigrate",
        "in",
        "out",
        "--config",
        "migrate.toml",
        "--log-level",
        "debug",
        "--dry-run",
    ]);

    assert_eq!(parsed.input_dir, std::path::PathBuf::from("in"));
    assert_eq!(parsed.config.as_deref(), Some(std::path::Path::new("migrate.toml")));
    assert!(parsed.dry_run);
    assert!(parsed.log_level.is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_run_multi_file_validation_failure_is_not_fatal() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_export(
        input.path(),
        "a.json",
        JobBatchBuilder::new().job(JobRecordBuilder::new(1).depends_on(9999)),
    );
    write_export(input.path(), "b.json", JobBatchBuilder::new().manual_jobs(2, 1));

    let report = with_timeout(run(args(input.path(), output.path(), &[])))
        .await
        .unwrap();

    assert!(report.is_aborted());
    assert!(report.failure.is_some());
    assert!(report.result.is_empty());
    assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
}
