//! Worker pool for simulated task processing.
//!
//! The pool snapshots the store, fans the snapshot out into a bounded
//! channel, closes it, and lets a fixed number of workers drain it
//! cooperatively. Each worker sleeps for the configured delay per task to
//! simulate work, then marks the original task completed in the shared
//! store. The store lock is never held across the sleep.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::store::SharedTaskStore;

/// Errors that can occur when configuring or running a worker pool.
#[derive(Debug, Error)]
pub enum WorkerPoolError {
    /// A pool with no workers would leave queued tasks unprocessed forever,
    /// so it is rejected at configuration time.
    #[error("worker pool requires at least one worker")]
    ZeroWorkers,

    #[error("worker exited abnormally: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Configuration for a [`WorkerPool`].
#[derive(Debug, Clone)]
pub struct WorkerPoolConfig {
    workers: usize,
    delay: Duration,
}

impl WorkerPoolConfig {
    /// Create a configuration with the given worker count and the default
    /// simulated work duration of 2 seconds.
    ///
    /// # Errors
    ///
    /// Returns `WorkerPoolError::ZeroWorkers` if `workers` is zero.
    pub fn new(workers: usize) -> Result<Self, WorkerPoolError> {
        if workers == 0 {
            return Err(WorkerPoolError::ZeroWorkers);
        }
        Ok(Self {
            workers,
            delay: Duration::from_secs(2),
        })
    }

    /// Override the simulated per-task work duration.
    ///
    /// Tests use `Duration::ZERO` to avoid depending on wall-clock sleeps.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

/// Fixed-size pool of workers draining a closed, bounded work channel.
pub struct WorkerPool {
    config: WorkerPoolConfig,
}

impl WorkerPool {
    pub fn new(config: WorkerPoolConfig) -> Self {
        Self { config }
    }

    /// Process every task currently in the store.
    ///
    /// Snapshots the store, queues the snapshot into a channel sized to
    /// it, closes the channel, and spawns the configured number of
    /// workers. Workers pull tasks until the channel is drained, sleeping
    /// the configured delay per task before completing it in the store.
    /// Workers beyond the task count receive nothing and exit immediately.
    ///
    /// Returns only after every worker has exited, with the total number
    /// of tasks processed.
    ///
    /// # Errors
    ///
    /// Returns `WorkerPoolError::Join` if a worker panics.
    pub async fn run(&self, store: &SharedTaskStore) -> Result<usize, WorkerPoolError> {
        let snapshot = store.list().await;
        info!(
            tasks = snapshot.len(),
            workers = self.config.workers,
            "starting worker pool"
        );

        let (tx, rx) = mpsc::channel(snapshot.len().max(1));
        for task in snapshot {
            // Capacity matches the snapshot and the receiver outlives the
            // loop, so sends cannot block or fail.
            if tx.send(task).await.is_err() {
                break;
            }
        }
        drop(tx);

        let rx = Arc::new(Mutex::new(rx));
        let mut workers = JoinSet::new();

        for worker_id in 0..self.config.workers {
            let rx = Arc::clone(&rx);
            let store = Arc::clone(store);
            let delay = self.config.delay;

            workers.spawn(async move {
                let mut processed = 0usize;
                loop {
                    // Take the next task, releasing the receiver lock
                    // before the simulated work.
                    let task = rx.lock().await.recv().await;
                    let Some(task) = task else { break };

                    debug!(worker = worker_id, task = task.id, "processing task");
                    tokio::time::sleep(delay).await;
                    store.complete(task.id).await;
                    processed += 1;
                }
                debug!(worker = worker_id, processed, "worker done");
                processed
            });
        }

        let mut total = 0;
        while let Some(result) = workers.join_next().await {
            total += result?;
        }

        info!(processed = total, "worker pool finished");
        Ok(total)
    }
}
