// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{MigrateError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = MigrateError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.validation, raw.parser, raw.shutdown))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_validation_section(cfg)?;
    validate_parser_section(cfg)?;
    Ok(())
}

fn validate_validation_section(cfg: &RawConfigFile) -> Result<()> {
    if cfg.validation.concurrent_threshold == 0 {
        return Err(MigrateError::ConfigError(
            "[validation].concurrent_threshold must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_parser_section(cfg: &RawConfigFile) -> Result<()> {
    if cfg.parser.max_workers == 0 {
        return Err(MigrateError::ConfigError(
            "[parser].max_workers must be >= 1 (got 0)".to_string(),
        ));
    }

    let ext = cfg.parser.extension.trim().trim_start_matches('.');
    if ext.is_empty() {
        return Err(MigrateError::ConfigError(
            "[parser].extension must not be empty".to_string(),
        ));
    }
    if ext.contains(['/', '\\', '*', '?']) {
        return Err(MigrateError::ConfigError(format!(
            "[parser].extension must be a plain extension (got '{}')",
            cfg.parser.extension
        )));
    }

    Ok(())
}
