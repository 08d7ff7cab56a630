// src/validate/mod.rs

//! Validation results and the batch validator.
//!
//! - [`ValidationOutcome`] is the immutable list of errors and warnings every
//!   validator returns.
//! - [`findings`] holds the append-only accumulator used while per-job checks
//!   run on the worker pool.
//! - [`batch`] runs per-job field checks (sequentially or on the pool) and
//!   then the dependency graph check.

pub mod batch;
pub mod findings;

use std::fmt;

pub use batch::{BatchValidator, check_job};
pub use findings::Findings;

/// Errors and warnings from one validation call.
///
/// `is_valid()` is exactly `errors().is_empty()`. Outcomes are values:
/// the `with_*` / [`merge`](Self::merge) methods return a new outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self { errors, warnings }
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.errors.push(message.into());
        self
    }

    pub fn with_warning(mut self, message: impl Into<String>) -> Self {
        self.warnings.push(message.into());
        self
    }

    /// Append `other`'s errors and warnings after this outcome's.
    pub fn merge(mut self, other: ValidationOutcome) -> Self {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Human-readable validation report.
impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== VALIDATION REPORT ===")?;
        writeln!(f)?;

        if self.errors.is_empty() && self.warnings.is_empty() {
            return writeln!(f, "All validations passed!");
        }

        write_section(f, "ERRORS", &self.errors)?;
        write_section(f, "WARNINGS", &self.warnings)?;

        if self.has_errors() {
            writeln!(f, "Validation FAILED. Fix errors before proceeding.")
        } else {
            writeln!(f, "Validation PASSED with warnings.")
        }
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, title: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f, "{title} ({}):", items.len())?;
    for (i, item) in items.iter().enumerate() {
        writeln!(f, "  {}. {item}", i + 1)?;
    }
    writeln!(f)
}
