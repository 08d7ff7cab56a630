// src/engine/analysis.rs

//! Classification of triggers by migration feasibility.

use std::fmt;

use crate::types::TriggerKind;
use crate::validate::ValidationOutcome;

/// Which bucket a trigger landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// A handler exists and validation was clean.
    Supported,
    /// A handler exists; no errors but at least one warning.
    Workaround,
    /// No handler for the trigger's kind.
    Unsupported,
    /// A handler exists but validation failed.
    Invalid,
}

/// One classified trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisEntry {
    pub job_name: String,
    pub kind: TriggerKind,
    /// Handler description; `None` for unsupported triggers.
    pub strategy: Option<&'static str>,
    pub validation: ValidationOutcome,
}

/// Four disjoint buckets that together hold every analysed trigger once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationAnalysis {
    supported: Vec<AnalysisEntry>,
    workaround: Vec<AnalysisEntry>,
    unsupported: Vec<AnalysisEntry>,
    invalid: Vec<AnalysisEntry>,
}

impl MigrationAnalysis {
    pub(crate) fn push(&mut self, class: Classification, entry: AnalysisEntry) {
        match class {
            Classification::Supported => self.supported.push(entry),
            Classification::Workaround => self.workaround.push(entry),
            Classification::Unsupported => self.unsupported.push(entry),
            Classification::Invalid => self.invalid.push(entry),
        }
    }

    pub fn supported(&self) -> &[AnalysisEntry] {
        &self.supported
    }

    pub fn workaround(&self) -> &[AnalysisEntry] {
        &self.workaround
    }

    pub fn unsupported(&self) -> &[AnalysisEntry] {
        &self.unsupported
    }

    pub fn invalid(&self) -> &[AnalysisEntry] {
        &self.invalid
    }

    pub fn total(&self) -> usize {
        self.supported.len() + self.workaround.len() + self.unsupported.len() + self.invalid.len()
    }

    /// Triggers that need manual attention (unsupported + invalid).
    pub fn blocked(&self) -> usize {
        self.unsupported.len() + self.invalid.len()
    }

    pub fn is_fully_migratable(&self) -> bool {
        self.blocked() == 0
    }

    /// Bucket of the first entry with this job name.
    pub fn classification_of(&self, job_name: &str) -> Option<Classification> {
        let buckets = [
            (Classification::Supported, &self.supported),
            (Classification::Workaround, &self.workaround),
            (Classification::Unsupported, &self.unsupported),
            (Classification::Invalid, &self.invalid),
        ];
        buckets
            .into_iter()
            .find(|(_, entries)| entries.iter().any(|e| e.job_name == job_name))
            .map(|(class, _)| class)
    }
}

/// Human-readable analysis report.
impl fmt::Display for MigrationAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== TRIGGER MIGRATION ANALYSIS ===")?;
        writeln!(f, "Total Triggers: {}", self.total())?;
        writeln!(f, "Direct Migration: {}", self.supported.len())?;
        writeln!(f, "With Workarounds: {}", self.workaround.len())?;
        writeln!(f, "Cannot Migrate: {}", self.blocked())?;

        if !self.supported.is_empty() {
            writeln!(f, "\nDIRECT MIGRATION:")?;
            for entry in &self.supported {
                write_entry_head(f, entry)?;
            }
        }

        if !self.workaround.is_empty() {
            writeln!(f, "\nMIGRATION WITH WORKAROUNDS:")?;
            for entry in &self.workaround {
                write_entry_head(f, entry)?;
                for warning in entry.validation.warnings() {
                    writeln!(f, "    Warning: {warning}")?;
                }
            }
        }

        if !self.unsupported.is_empty() {
            writeln!(f, "\nUNSUPPORTED TRIGGERS:")?;
            for entry in &self.unsupported {
                write_entry_head(f, entry)?;
                writeln!(f, "    Action: Manual configuration required")?;
            }
        }

        if !self.invalid.is_empty() {
            writeln!(f, "\nINVALID TRIGGERS:")?;
            for entry in &self.invalid {
                write_entry_head(f, entry)?;
                for error in entry.validation.errors() {
                    writeln!(f, "    Error: {error}")?;
                }
            }
        }

        writeln!(f, "\nRECOMMENDATION:")?;
        if self.is_fully_migratable() {
            writeln!(f, "  All triggers can be migrated!")
        } else {
            writeln!(f, "  {} triggers require manual attention.", self.blocked())
        }
    }
}

fn write_entry_head(f: &mut fmt::Formatter<'_>, entry: &AnalysisEntry) -> fmt::Result {
    writeln!(f, "  - {}", entry.job_name)?;
    writeln!(f, "    Type: {}", entry.kind)?;
    if let Some(strategy) = entry.strategy {
        writeln!(f, "    Strategy: {strategy}")?;
    }
    Ok(())
}
