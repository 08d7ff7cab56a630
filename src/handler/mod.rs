// src/handler/mod.rs

//! Trigger handlers and their registry.
//!
//! Each handler knows one [`TriggerKind`]: how to validate a trigger of that
//! kind and how to turn it into an [`OutputJob`]. The [`HandlerRegistry`]
//! keeps them in a fixed order and dispatches to the first one that supports
//! a trigger. Kinds without a handler are unsupported.

pub mod api;
pub mod dependency;
pub mod file_watch;
pub mod manual;
pub mod schedule;

use std::fmt::Debug;

use tracing::info;

use crate::errors::MigrationError;
use crate::job::{OutputJob, Trigger};
use crate::types::TriggerKind;
use crate::validate::ValidationOutcome;

pub use api::ApiTriggerHandler;
pub use dependency::DependencyTriggerHandler;
pub use file_watch::{FileWatchTriggerHandler, POLLING_SCHEDULE, POLLING_WARNING};
pub use manual::ManualTriggerHandler;
pub use schedule::ScheduleTriggerHandler;

/// Migration strategy for one trigger kind.
pub trait TriggerHandler: Send + Sync + Debug {
    fn kind(&self) -> TriggerKind;

    fn supports(&self, trigger: &Trigger) -> bool {
        trigger.kind == self.kind()
    }

    /// Kind-specific checks. Warnings mean "migratable, but behaviour
    /// changes"; errors mean "cannot migrate as is".
    fn validate(&self, trigger: &Trigger) -> ValidationOutcome;

    /// Produce the target job. Must refuse triggers that fail `validate`.
    fn migrate(&self, trigger: &Trigger) -> Result<OutputJob, MigrationError>;

    /// One-line description of the strategy, for reports.
    fn describe(&self) -> &'static str;
}

/// Fail with the first validation error, if any.
pub(crate) fn ensure_valid(
    handler: &dyn TriggerHandler,
    trigger: &Trigger,
) -> Result<ValidationOutcome, MigrationError> {
    let outcome = handler.validate(trigger);
    match outcome.first_error() {
        Some(first) => Err(MigrationError::Validation(first.to_string())),
        None => Ok(outcome),
    }
}

/// Ordered list of handlers; first match wins.
#[derive(Debug)]
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn TriggerHandler>>,
}

impl HandlerRegistry {
    /// The default handler set, in dispatch order.
    pub fn new() -> Self {
        let registry = Self::with_handlers(vec![
            Box::new(ScheduleTriggerHandler),
            Box::new(ManualTriggerHandler),
            Box::new(ApiTriggerHandler),
            Box::new(FileWatchTriggerHandler),
            Box::new(DependencyTriggerHandler),
        ]);
        info!(handlers = registry.len(), "registered trigger handlers");
        registry
    }

    pub fn with_handlers(handlers: Vec<Box<dyn TriggerHandler>>) -> Self {
        Self { handlers }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Kinds covered by at least one handler, in registration order.
    pub fn kinds(&self) -> Vec<TriggerKind> {
        self.handlers.iter().map(|h| h.kind()).collect()
    }

    pub fn find(&self, trigger: &Trigger) -> Option<&dyn TriggerHandler> {
        self.handlers
            .iter()
            .find(|h| h.supports(trigger))
            .map(|h| h.as_ref())
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
