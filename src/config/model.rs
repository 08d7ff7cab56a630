// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::exec::available_parallelism;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [validation]
/// concurrent_threshold = 10
/// workers = 0            # 0 = one worker per available core
///
/// [parser]
/// max_workers = 2
/// extension = "json"
///
/// [shutdown]
/// timeout_secs = 60
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub validation: ValidationSection,

    #[serde(default)]
    pub parser: ParserSection,

    #[serde(default)]
    pub shutdown: ShutdownSection,
}

/// `[validation]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationSection {
    /// Batches with at least this many jobs are validated on the worker pool;
    /// smaller ones run on the calling task.
    #[serde(default = "default_concurrent_threshold")]
    pub concurrent_threshold: usize,

    /// Size of the validation worker pool. `0` means one worker per
    /// available core.
    #[serde(default)]
    pub workers: usize,
}

fn default_concurrent_threshold() -> usize {
    10
}

impl Default for ValidationSection {
    fn default() -> Self {
        Self {
            concurrent_threshold: default_concurrent_threshold(),
            workers: 0,
        }
    }
}

/// `[parser]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserSection {
    /// Upper bound for the multi-file parse pool; the effective size is
    /// also capped by the available cores.
    #[serde(default = "default_parser_workers")]
    pub max_workers: usize,

    /// Extension of export files in the input directory (no leading dot).
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_parser_workers() -> usize {
    2
}

fn default_extension() -> String {
    "json".to_string()
}

impl Default for ParserSection {
    fn default() -> Self {
        Self {
            max_workers: default_parser_workers(),
            extension: default_extension(),
        }
    }
}

/// `[shutdown]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ShutdownSection {
    /// How long pool shutdown waits for in-flight work before cancelling it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ShutdownSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Validated configuration.
///
/// Only constructible through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// [`Default`].
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub validation: ValidationSection,
    pub parser: ParserSection,
    pub shutdown: ShutdownSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        validation: ValidationSection,
        parser: ParserSection,
        shutdown: ShutdownSection,
    ) -> Self {
        Self {
            validation,
            parser,
            shutdown,
        }
    }

    pub fn concurrent_threshold(&self) -> usize {
        self.validation.concurrent_threshold
    }

    /// Effective validation pool size.
    pub fn validation_workers(&self) -> usize {
        match self.validation.workers {
            0 => available_parallelism(),
            n => n,
        }
    }

    /// Effective parse pool size: `min(max_workers, available cores)`.
    pub fn parser_workers(&self) -> usize {
        self.parser.max_workers.min(available_parallelism()).max(1)
    }

    /// Input file extension without the leading dot.
    pub fn extension(&self) -> &str {
        self.parser.extension.trim().trim_start_matches('.')
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown.timeout_secs)
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(
            ValidationSection::default(),
            ParserSection::default(),
            ShutdownSection::default(),
        )
    }
}
