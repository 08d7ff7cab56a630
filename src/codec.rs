// src/codec.rs

//! Document codec collaborator.
//!
//! Decodes legacy export documents into a [`JobBatch`] and encodes migrated
//! [`OutputJob`]s. The default [`JsonCodec`] uses `serde_json`.

use std::fmt::Debug;

use crate::errors::Result;
use crate::job::{JobBatch, OutputJob};

pub trait Codec: Send + Sync + Debug {
    fn decode(&self, bytes: &[u8]) -> Result<JobBatch>;
    fn encode(&self, job: &OutputJob) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn decode(&self, bytes: &[u8]) -> Result<JobBatch> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn encode(&self, job: &OutputJob) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(job)?)
    }
}
