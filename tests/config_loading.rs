use std::io::Write;
use std::time::Duration;

use jobmigrate::config::{ConfigFile, load_and_validate, load_or_default};
use jobmigrate::errors::MigrateError;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn test_defaults_without_config_file() {
    let cfg = load_or_default(None).unwrap();

    assert_eq!(cfg.concurrent_threshold(), 10);
    assert_eq!(cfg.extension(), "json");
    assert_eq!(cfg.shutdown_timeout(), Duration::from_secs(60));
    assert!(cfg.parser_workers() >= 1 && cfg.parser_workers() <= 2);
    assert!(cfg.validation_workers() >= 1);
}

#[test]
fn test_partial_config_keeps_other_defaults() {
    let file = config_file(
        r#"
[validation]
concurrent_threshold = 50
workers = 3

[parser]
extension = ".JSON"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.concurrent_threshold(), 50);
    assert_eq!(cfg.validation_workers(), 3);
    assert_eq!(cfg.extension(), "JSON");
    assert_eq!(cfg.shutdown_timeout(), ConfigFile::default().shutdown_timeout());
}

#[test]
fn test_zero_threshold_rejected() {
    let file = config_file("[validation]\nconcurrent_threshold = 0\n");

    match load_and_validate(file.path()) {
        Err(MigrateError::ConfigError(msg)) => assert!(msg.contains("concurrent_threshold")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_zero_parser_workers_rejected() {
    let file = config_file("[parser]\nmax_workers = 0\n");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(MigrateError::ConfigError(_))
    ));
}

#[test]
fn test_glob_extension_rejected() {
    let file = config_file("[parser]\nextension = \"*.json\"\n");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(MigrateError::ConfigError(_))
    ));
}

#[test]
fn test_malformed_toml_is_toml_error() {
    let file = config_file("[validation\nthreshold = ");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(MigrateError::TomlError(_))
    ));
}

#[test]
fn test_missing_config_file_is_io_error() {
    let err = load_or_default(Some(std::path::Path::new("/definitely/not/here.toml"))).unwrap_err();
    assert!(matches!(err, MigrateError::IoError(_)));
}
