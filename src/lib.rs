// src/lib.rs

pub mod cli;
pub mod codec;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod handler;
pub mod job;
pub mod logging;
pub mod types;
pub mod validate;

use std::path::Path;

use tracing::info;

use crate::cli::CliArgs;
use crate::config::load_or_default;
use crate::engine::{Orchestrator, PipelineReport};
use crate::errors::{MigrateError, Result};
use crate::fs::{FileStore, RealFileStore};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - argument checks and config loading
/// - input discovery
/// - the orchestrator (parse, validate, analyze, migrate, report)
///
/// A single-file run that stops at validation is reported as
/// [`MigrateError::ValidationFailed`] so the process exits non-zero. A failed
/// or aborted multi-file run has already been logged and comes back as an
/// empty report.
pub async fn run(args: CliArgs) -> Result<PipelineReport> {
    let store = RealFileStore;
    check_directories(&store, &args.input_dir, &args.output_dir)?;

    let config = load_or_default(args.config.as_deref())?;

    let files = store.list_files(&args.input_dir, config.extension())?;
    if files.is_empty() {
        return Err(MigrateError::ConfigError(format!(
            "no .{} files found in {}",
            config.extension(),
            args.input_dir.display()
        )));
    }
    info!(files = files.len(), input = ?args.input_dir, "found export files");

    let orchestrator = Orchestrator::builder(args.output_dir.clone())
        .config(config)
        .dry_run(args.dry_run)
        .build();

    let report = orchestrator.execute(&files).await?;

    // Multi-file aborts are already logged and carry `failure`.
    if report.is_aborted() && report.failure.is_none() {
        let errors = report
            .validation
            .as_ref()
            .map(|v| v.errors().join("\n"))
            .unwrap_or_default();
        return Err(MigrateError::ValidationFailed(errors));
    }
    Ok(report)
}

fn check_directories(store: &dyn FileStore, input: &Path, output: &Path) -> Result<()> {
    if !store.exists(input) {
        return Err(MigrateError::ConfigError(format!(
            "input directory does not exist: {}",
            input.display()
        )));
    }
    if !store.is_dir(input) {
        return Err(MigrateError::ConfigError(format!(
            "input path is not a directory: {}",
            input.display()
        )));
    }
    if store.exists(output) && !store.is_dir(output) {
        return Err(MigrateError::ConfigError(format!(
            "output path is not a directory: {}",
            output.display()
        )));
    }
    Ok(())
}
