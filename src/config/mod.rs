// src/config/mod.rs

//! Runtime configuration for jobmigrate.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load an optional config file from disk (`loader.rs`).
//! - Validate basic invariants like worker counts (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_or_default};
pub use model::{ConfigFile, ParserSection, RawConfigFile, ShutdownSection, ValidationSection};
