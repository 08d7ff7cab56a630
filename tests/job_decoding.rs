use std::path::Path;

use jobmigrate::codec::{Codec, JsonCodec};
use jobmigrate::job::{Trigger, TriggerSpec};
use jobmigrate::types::TriggerKind;

const EXPORT: &str = r#"
{
  "exportedAt": "2024-03-01T10:00:00Z",
  "jobs": [
    {
      "jobId": 1001,
      "jobName": "nightly-etl",
      "jobType": "BATCH",
      "system": "MAINFRAME",
      "trigger": { "type": "SCHEDULE", "cronExpression": "0 2 * * *", "timezone": "America/New_York" },
      "dependencies": [],
      "executionConstraints": { "priority": 3, "maxRuntimeMinutes": 120, "excludeHolidays": true },
      "notes": "runs after close of business"
    },
    {
      "jobId": 1002,
      "jobName": "inbox-loader",
      "trigger": { "type": "file_watch", "watchPath": "/data/inbox", "filePattern": "*.csv" },
      "dependencies": [ { "dependsOnJobId": 1001, "requiredStatus": "SUCCESS" } ]
    },
    {
      "jobId": 1003,
      "jobName": "mystery",
      "trigger": { "type": "CARRIER_PIGEON" }
    },
    {
      "jobId": 1004,
      "jobName": "no-trigger"
    }
  ]
}
"#;

#[test]
fn test_decodes_legacy_export() {
    let batch = JsonCodec.decode(EXPORT.as_bytes()).unwrap();

    assert_eq!(batch.len(), 4);
    let etl = &batch.jobs[0];
    assert_eq!(etl.job_id, 1001);
    assert_eq!(etl.system, "MAINFRAME");
    assert_eq!(
        etl.trigger,
        Some(TriggerSpec::Schedule {
            cron_expression: Some("0 2 * * *".to_string()),
            timezone: Some("America/New_York".to_string()),
        })
    );
    let constraints = etl.execution_constraints.as_ref().unwrap();
    assert_eq!(constraints.priority, Some(3));
    assert!(constraints.exclude_holidays);

    assert_eq!(batch.jobs[1].dependency_ids().collect::<Vec<_>>(), vec![1001]);
}

#[test]
fn test_trigger_types_are_normalised() {
    let batch = JsonCodec.decode(EXPORT.as_bytes()).unwrap();
    let triggers = Trigger::from_batch(&batch, Path::new("out"));

    let kinds: Vec<_> = triggers.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TriggerKind::Schedule,
            TriggerKind::FileWatch,
            TriggerKind::Unknown,
            TriggerKind::Unknown,
        ]
    );
    assert_eq!(triggers[1].watch_path.as_deref(), Some("/data/inbox"));
    assert_eq!(triggers[0].priority, Some(3));
    assert_eq!(triggers[0].output_dir, Path::new("out"));
}

#[test]
fn test_document_without_jobs_is_empty_batch() {
    let batch = JsonCodec.decode(br#"{ "exportedAt": "never" }"#).unwrap();
    assert!(batch.is_empty());
}

#[test]
fn test_malformed_document_is_error() {
    assert!(JsonCodec.decode(b"{ \"jobs\": [ { \"jobName\": 1 } ] }").is_err());
}
