// src/engine/report.rs

//! Where rendered reports go.
//!
//! The core renders validation, analysis and migration reports as text; a
//! [`ReportSink`] decides where that text ends up. Production uses
//! [`StdoutReportSink`] so logs (stderr) and reports (stdout) stay apart;
//! tests use [`MemoryReportSink`].

use std::fmt::Debug;
use std::sync::{Arc, Mutex};

pub trait ReportSink: Send + Sync + Debug {
    fn emit(&self, report: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutReportSink;

impl ReportSink for StdoutReportSink {
    fn emit(&self, report: &str) {
        println!("{report}");
    }
}

/// Collects reports in memory; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryReportSink {
    reports: Arc<Mutex<Vec<String>>>,
}

impl MemoryReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<String> {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// All reports joined, for substring assertions.
    pub fn joined(&self) -> String {
        self.reports().join("\n")
    }
}

impl ReportSink for MemoryReportSink {
    fn emit(&self, report: &str) {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(report.to_string());
    }
}
