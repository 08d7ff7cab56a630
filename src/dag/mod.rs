// src/dag/mod.rs

//! Job dependency graph.
//!
//! - [`graph`] builds the id -> dependencies graph of a batch and checks it
//!   for duplicate ids, dangling references and cycles.

pub mod graph;

pub use graph::{CIRCULAR_DEPENDENCY, DependencyGraph, validate_dependencies};
