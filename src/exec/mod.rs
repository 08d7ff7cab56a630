// src/exec/mod.rs

//! Execution layer.
//!
//! - [`pool`] provides the bounded [`WorkerPool`] used for concurrent
//!   per-file parsing and per-job validation.

pub mod pool;

pub use pool::{WorkerPool, available_parallelism};
