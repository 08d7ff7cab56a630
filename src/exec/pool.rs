// src/exec/pool.rs

//! Bounded worker pool with a fork-join barrier.
//!
//! A [`WorkerPool`] owns a fixed number of permits. [`WorkerPool::run_all`]
//! dispatches one blocking task per item (each holding a permit while it
//! runs), then waits for every task before returning the results in input
//! order. Nothing is visible to the caller before that barrier.
//!
//! Pools are created once per pipeline run and released with
//! [`WorkerPool::shutdown`]: wait (bounded) for outstanding permits, then
//! close the semaphore so any queued dispatch fails fast. Dropping a pool
//! closes it as well.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::errors::{MigrateError, Result};

/// Number of cores the host reports, falling back to 1.
pub fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[derive(Debug)]
pub struct WorkerPool {
    name: &'static str,
    size: usize,
    permits: Arc<Semaphore>,
}

impl WorkerPool {
    /// Create a pool with `size` workers (at least one).
    pub fn new(name: &'static str, size: usize) -> Self {
        let size = size.max(1);
        info!(pool = name, workers = size, "worker pool started");
        Self {
            name,
            size,
            permits: Arc::new(Semaphore::new(size)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_shut_down(&self) -> bool {
        self.permits.is_closed()
    }

    /// Run `work` over every item on the pool and wait for all of them.
    ///
    /// Results come back in the order of `items`. A panicking worker fails
    /// the whole call once the remaining tasks have been joined.
    pub async fn run_all<I, T, F>(&self, items: Vec<I>, work: F) -> Result<Vec<T>>
    where
        I: Send + 'static,
        T: Send + 'static,
        F: Fn(I) -> T + Send + Sync + 'static,
    {
        let total = items.len();
        let work = Arc::new(work);
        let mut set = JoinSet::new();

        for (index, item) in items.into_iter().enumerate() {
            let permit = Arc::clone(&self.permits)
                .acquire_owned()
                .await
                .map_err(|_| MigrateError::WorkerError(format!("{} pool is shut down", self.name)))?;
            let work = Arc::clone(&work);
            set.spawn_blocking(move || {
                let _permit = permit;
                (index, work(item))
            });
        }

        debug!(pool = self.name, tasks = total, "dispatched; waiting for all workers");

        let mut results = Vec::with_capacity(total);
        let mut failure = None;
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(pair) => results.push(pair),
                Err(e) => {
                    warn!(pool = self.name, error = %e, "worker task failed");
                    failure.get_or_insert_with(|| e.to_string());
                }
            }
        }

        if let Some(reason) = failure {
            return Err(MigrateError::WorkerError(format!(
                "{} worker failed: {}",
                self.name, reason
            )));
        }

        results.sort_by_key(|(index, _)| *index);
        Ok(results.into_iter().map(|(_, value)| value).collect())
    }

    /// Drain outstanding work for at most `timeout`, then close the pool.
    ///
    /// Returns `true` if every permit came back before the deadline.
    /// Calling this on an already closed pool is a no-op that returns `true`.
    pub async fn shutdown(&self, timeout: Duration) -> bool {
        if self.permits.is_closed() {
            return true;
        }

        let all = u32::try_from(self.size).unwrap_or(u32::MAX);
        let drained = matches!(
            tokio::time::timeout(timeout, self.permits.acquire_many(all)).await,
            Ok(Ok(_))
        );

        self.permits.close();

        if drained {
            info!(pool = self.name, "worker pool shut down");
        } else {
            warn!(
                pool = self.name,
                timeout_secs = timeout.as_secs(),
                "worker pool did not drain in time; cancelled remaining work"
            );
        }
        drained
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.permits.close();
    }
}
