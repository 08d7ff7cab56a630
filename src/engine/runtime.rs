// src/engine/runtime.rs

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tracing::{debug, error, info, warn};

use crate::codec::{Codec, JsonCodec};
use crate::config::ConfigFile;
use crate::errors::{MigrateError, Result};
use crate::exec::WorkerPool;
use crate::fs::{FileStore, RealFileStore};
use crate::handler::HandlerRegistry;
use crate::job::{JobBatch, Trigger};
use crate::validate::{BatchValidator, ValidationOutcome};

use super::analysis::MigrationAnalysis;
use super::core::{PipelineCore, PipelineState};
use super::report::{ReportSink, StdoutReportSink};
use super::result::MigrationResult;
use super::service::MigrationService;

/// Read and decode one export file.
pub fn parse_file(store: &dyn FileStore, codec: &dyn Codec, path: &Path) -> Result<JobBatch> {
    let bytes = store.read(path)?;
    let batch = codec
        .decode(&bytes)
        .with_context(|| format!("decoding export file {:?}", path))?;
    info!(jobs = batch.len(), ?path, "parsed export file");
    Ok(batch)
}

/// Everything one pipeline run produced, including where it stopped.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub state: PipelineState,
    pub history: Vec<PipelineState>,
    /// Jobs in the (merged) batch.
    pub jobs: usize,
    /// Input files dropped because they could not be read or decoded.
    pub skipped_files: Vec<PathBuf>,
    pub validation: Option<ValidationOutcome>,
    pub analysis: Option<MigrationAnalysis>,
    pub result: MigrationResult,
    /// Set when a multi-file run failed or aborted and its result is empty.
    pub failure: Option<String>,
}

impl PipelineReport {
    fn start(jobs: usize, skipped_files: Vec<PathBuf>) -> Self {
        Self {
            state: PipelineState::Parse,
            history: vec![PipelineState::Parse],
            jobs,
            skipped_files,
            validation: None,
            analysis: None,
            result: MigrationResult::new(),
            failure: None,
        }
    }

    fn finish(mut self, core: &PipelineCore) -> Self {
        self.state = core.state();
        self.history = core.history().to_vec();
        self
    }

    fn failed(core: &PipelineCore, reason: String) -> Self {
        let mut report = Self::start(0, Vec::new()).finish(core);
        report.failure = Some(reason);
        report
    }

    pub fn is_done(&self) -> bool {
        self.state == PipelineState::Done
    }

    pub fn is_aborted(&self) -> bool {
        self.state == PipelineState::Aborted
    }
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== PIPELINE SUMMARY ===")?;
        writeln!(f, "Final state: {}", self.state)?;
        writeln!(f, "Jobs: {}", self.jobs)?;
        if !self.skipped_files.is_empty() {
            writeln!(f, "Skipped files ({}):", self.skipped_files.len())?;
            for path in &self.skipped_files {
                writeln!(f, "  - {}", path.display())?;
            }
        }
        if let Some(reason) = &self.failure {
            writeln!(f, "Failure: {reason}")?;
        }
        Ok(())
    }
}

/// Drives parse -> validate -> analyze -> migrate -> report over one or many
/// export files.
///
/// Owns the two worker pools for the run (multi-file parsing and large-batch
/// validation). Use [`Orchestrator::execute`] to run and release them in one
/// go, or call [`Orchestrator::shutdown`] yourself.
#[derive(Debug)]
pub struct Orchestrator {
    config: ConfigFile,
    codec: Arc<dyn Codec>,
    store: Arc<dyn FileStore>,
    sink: Arc<dyn ReportSink>,
    service: MigrationService,
    validator: BatchValidator,
    validation_pool: Arc<WorkerPool>,
    parse_pool: Arc<WorkerPool>,
    output_dir: PathBuf,
    dry_run: bool,
}

/// Builder for [`Orchestrator`]; every collaborator has a production default.
#[derive(Debug)]
pub struct OrchestratorBuilder {
    config: ConfigFile,
    codec: Arc<dyn Codec>,
    store: Arc<dyn FileStore>,
    sink: Arc<dyn ReportSink>,
    registry: HandlerRegistry,
    output_dir: PathBuf,
    dry_run: bool,
}

impl OrchestratorBuilder {
    pub fn config(mut self, config: ConfigFile) -> Self {
        self.config = config;
        self
    }

    pub fn codec(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codec = codec;
        self
    }

    pub fn store(mut self, store: Arc<dyn FileStore>) -> Self {
        self.store = store;
        self
    }

    pub fn sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn build(self) -> Orchestrator {
        let validation_pool = Arc::new(WorkerPool::new(
            "validation",
            self.config.validation_workers(),
        ));
        let parse_pool = Arc::new(WorkerPool::new("parser", self.config.parser_workers()));
        let validator = BatchValidator::new(
            Arc::clone(&validation_pool),
            self.config.concurrent_threshold(),
        );
        let service = MigrationService::new(
            self.registry,
            Arc::clone(&self.codec),
            Arc::clone(&self.store),
        );

        info!(output_dir = ?self.output_dir, dry_run = self.dry_run, "migration orchestrator initialized");

        Orchestrator {
            config: self.config,
            codec: self.codec,
            store: self.store,
            sink: self.sink,
            service,
            validator,
            validation_pool,
            parse_pool,
            output_dir: self.output_dir,
            dry_run: self.dry_run,
        }
    }
}

impl Orchestrator {
    pub fn builder(output_dir: impl Into<PathBuf>) -> OrchestratorBuilder {
        OrchestratorBuilder {
            config: ConfigFile::default(),
            codec: Arc::new(JsonCodec),
            store: Arc::new(RealFileStore),
            sink: Arc::new(StdoutReportSink),
            registry: HandlerRegistry::new(),
            output_dir: output_dir.into(),
            dry_run: false,
        }
    }

    pub fn service(&self) -> &MigrationService {
        &self.service
    }

    /// Run the pipeline, then release the pools whatever the outcome.
    pub async fn execute(self, files: &[PathBuf]) -> Result<PipelineReport> {
        let outcome = self.migrate(files).await;
        self.shutdown().await;
        outcome
    }

    /// One file: errors propagate and an invalid batch ends ABORTED. Several
    /// files: parsed concurrently and merged; any failure, including an
    /// aborted validation, is logged and comes back with `failure` set.
    pub async fn migrate(&self, files: &[PathBuf]) -> Result<PipelineReport> {
        match files {
            [] => Err(MigrateError::ConfigError(
                "no input files to migrate".to_string(),
            )),
            [single] => self.run_single(single).await,
            many => Ok(self.run_many(many).await),
        }
    }

    pub async fn run_single(&self, path: &Path) -> Result<PipelineReport> {
        let started = Instant::now();
        info!(?path, "starting migration from file");

        let mut core = PipelineCore::new(self.dry_run);
        let batch = parse_file(self.store.as_ref(), self.codec.as_ref(), path)?;

        let report = self.run_batch(&mut core, batch, Vec::new()).await?;
        log_completion(&report, started);
        Ok(report)
    }

    pub async fn run_many(&self, paths: &[PathBuf]) -> PipelineReport {
        let started = Instant::now();
        info!(files = paths.len(), "starting concurrent migration");

        let mut core = PipelineCore::new(self.dry_run);
        match self.run_many_inner(&mut core, paths).await {
            Ok(mut report) => {
                if report.is_aborted() {
                    let errors = report.validation.as_ref().map_or(0, |v| v.errors().len());
                    error!(errors, "validation of merged batch failed; returning empty result");
                    report.failure = Some(format!("validation failed with {errors} error(s)"));
                }
                log_completion(&report, started);
                report
            }
            Err(e) => {
                error!(error = %e, state = %core.state(), "migration failed");
                PipelineReport::failed(&core, e.to_string())
            }
        }
    }

    async fn run_many_inner(&self, core: &mut PipelineCore, paths: &[PathBuf]) -> Result<PipelineReport> {
        info!(
            files = paths.len(),
            workers = self.parse_pool.size(),
            "parsing files concurrently"
        );

        let store = Arc::clone(&self.store);
        let codec = Arc::clone(&self.codec);
        let parsed = self
            .parse_pool
            .run_all(paths.to_vec(), move |path| {
                debug!(thread = ?std::thread::current().id(), ?path, "parsing");
                let outcome = parse_file(store.as_ref(), codec.as_ref(), &path);
                (path, outcome)
            })
            .await?;

        let mut batches = Vec::with_capacity(parsed.len());
        let mut skipped = Vec::new();
        for (path, outcome) in parsed {
            match outcome {
                Ok(batch) => batches.push(batch),
                Err(e) => {
                    warn!(?path, error = %e, "failed to parse export file; skipping it");
                    skipped.push(path);
                }
            }
        }

        let batch = JobBatch::merge(batches);
        info!(jobs = batch.len(), skipped = skipped.len(), "merged parsed jobs");

        self.run_batch(core, batch, skipped).await
    }

    /// VALIDATE onwards, for one logical batch.
    async fn run_batch(
        &self,
        core: &mut PipelineCore,
        batch: JobBatch,
        skipped: Vec<PathBuf>,
    ) -> Result<PipelineReport> {
        let mut report = PipelineReport::start(batch.len(), skipped);

        core.advance(PipelineState::Validate)?;
        let validation = self.validator.validate(&batch).await?;
        self.sink.emit(&validation.to_string());
        let valid = validation.is_valid();
        report.validation = Some(validation);

        if !valid {
            core.advance(PipelineState::Aborted)?;
            error!("validation failed; migration aborted");
            return Ok(report.finish(core));
        }
        info!("validation passed");

        core.advance(PipelineState::Analyze)?;
        let triggers = Trigger::from_batch(&batch, &self.output_dir);
        let analysis = self.service.analyze(&triggers);
        self.sink.emit(&analysis.to_string());
        report.analysis = Some(analysis);

        if core.is_dry_run() {
            info!("dry run; skipping migration");
        } else {
            core.advance(PipelineState::Migrate)?;
            report.result = self.service.migrate_all(&triggers);
        }

        core.advance(PipelineState::Report)?;
        if !core.is_dry_run() {
            self.sink.emit(&report.result.to_string());
        }

        core.advance(PipelineState::Done)?;
        Ok(report.finish(core))
    }

    /// Drain and close both pools, bounded by the configured timeout.
    pub async fn shutdown(&self) {
        info!("shutting down orchestrator");
        let timeout = self.config.shutdown_timeout();
        self.parse_pool.shutdown(timeout).await;
        self.validation_pool.shutdown(timeout).await;
        info!("shutdown complete");
    }
}

fn log_completion(report: &PipelineReport, started: Instant) {
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        state = %report.state,
        succeeded = report.result.success_count(),
        failed = report.result.failure_count(),
        "migration completed"
    );
}
