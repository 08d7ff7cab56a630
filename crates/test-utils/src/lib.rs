//! Shared helpers for the `jobmigrate` integration tests: tracing setup,
//! a timeout guard for async pipeline runs, job/batch builders and a writer
//! for export files on disk.

pub mod builders;

use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use crate::builders::JobBatchBuilder;

static INIT: Once = Once::new();

/// How long a single pipeline run may take in a test.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Initialise tracing for tests.
///
/// Logs go through `with_test_writer()`, so the harness only shows them for
/// failing tests. `RUST_LOG=jobmigrate=debug` turns on per-job detail.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Fail the test if a pipeline future does not finish within [`TEST_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(TEST_TIMEOUT, f)
        .await
        .expect("pipeline run did not finish before the test timeout")
}

/// Write `batch` as a JSON export document named `name` under `dir`.
pub fn write_export(dir: &Path, name: &str, batch: JobBatchBuilder) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, batch.to_json()).expect("export file is writable");
    path
}
