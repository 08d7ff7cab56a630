// src/errors.rs

//! Crate-wide error types.
//!
//! [`MigrateError`] covers everything that can stop a pipeline run (bad
//! config, unreadable files, undecodable documents, a failed validation).
//! [`MigrationError`] is the per-trigger failure that ends up in
//! `MigrationResult::failures` and never stops sibling jobs.

use thiserror::Error;

use crate::types::TriggerKind;

#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Validation failed:\n{0}")]
    ValidationFailed(String),

    #[error("Invalid pipeline transition: {0}")]
    InvalidTransition(String),

    #[error("Worker pool error: {0}")]
    WorkerError(String),

    #[error(transparent)]
    Migration(#[from] MigrationError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Why a single trigger could not be migrated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MigrationError {
    #[error("no handler for trigger type {0}")]
    NoHandler(TriggerKind),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("failed to encode output job '{job}': {reason}")]
    Encode { job: String, reason: String },

    #[error("failed to write output job '{job}': {reason}")]
    Output { job: String, reason: String },
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, MigrateError>;
