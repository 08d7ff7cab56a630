// src/engine/core.rs

//! Pure pipeline state machine.
//!
//! The orchestrator (`engine::runtime`) asks this core for every state
//! change. The core knows nothing about files, pools or Tokio; it only
//! enforces the legal order of stages:
//!
//! ```text
//! PARSE -> VALIDATE -> ANALYZE -> MIGRATE -> REPORT -> DONE
//!              |           \____(dry run)____/
//!              v
//!           ABORTED
//! ```

use std::fmt;

use crate::errors::{MigrateError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    Parse,
    Validate,
    Analyze,
    Migrate,
    Report,
    Done,
    Aborted,
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Aborted)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Parse => "PARSE",
            PipelineState::Validate => "VALIDATE",
            PipelineState::Analyze => "ANALYZE",
            PipelineState::Migrate => "MIGRATE",
            PipelineState::Report => "REPORT",
            PipelineState::Done => "DONE",
            PipelineState::Aborted => "ABORTED",
        };
        f.write_str(name)
    }
}

/// Tracks the current stage of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineCore {
    state: PipelineState,
    history: Vec<PipelineState>,
    dry_run: bool,
}

impl PipelineCore {
    pub fn new(dry_run: bool) -> Self {
        Self {
            state: PipelineState::Parse,
            history: vec![PipelineState::Parse],
            dry_run,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Every state visited so far, starting with `Parse`.
    pub fn history(&self) -> &[PipelineState] {
        &self.history
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn is_legal(&self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self.state, next, self.dry_run),
            (Parse, Validate, _)
                | (Validate, Analyze, _)
                | (Validate, Aborted, _)
                | (Analyze, Migrate, false)
                | (Analyze, Report, true)
                | (Migrate, Report, _)
                | (Report, Done, _)
        )
    }

    /// Move to `next`, rejecting transitions the pipeline does not allow.
    pub fn advance(&mut self, next: PipelineState) -> Result<PipelineState> {
        if !self.is_legal(next) {
            return Err(MigrateError::InvalidTransition(format!(
                "{} -> {}{}",
                self.state,
                next,
                if self.dry_run { " (dry run)" } else { "" }
            )));
        }
        self.state = next;
        self.history.push(next);
        Ok(next)
    }
}
