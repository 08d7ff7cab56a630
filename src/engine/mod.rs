// src/engine/mod.rs

//! Migration engine.
//!
//! This module ties together:
//! - trigger classification ([`analysis`]) and per-job results ([`result`])
//! - the [`MigrationService`] that analyses and migrates triggers through
//!   the handler registry
//! - the pipeline state machine and the orchestrator that drives it
//!
//! The pure stage machine lives in [`core`]; the async/IO shell that parses
//! files, runs the pools and emits reports is in [`runtime`].

pub mod analysis;
pub mod core;
pub mod report;
pub mod result;
pub mod runtime;
pub mod service;

pub use analysis::{AnalysisEntry, Classification, MigrationAnalysis};
pub use core::{PipelineCore, PipelineState};
pub use report::{MemoryReportSink, ReportSink, StdoutReportSink};
pub use result::{MIGRATED_SUCCESSFULLY, MigrationResult};
pub use runtime::{Orchestrator, OrchestratorBuilder, PipelineReport, parse_file};
pub use service::{MigrationService, output_file_name};
