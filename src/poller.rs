//! Periodic view refresh
//!
//! A poller owns one tokio task per view. Each tick runs one batch; the next
//! tick waits for it, and ticks missed while a batch runs are skipped, so a
//! view's batches never overlap. Stopping (or dropping the handle) cancels an
//! in-flight batch and its result is never published.

use crate::error::{GeoError, Result};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// One published batch
pub struct Snapshot<T> {
    pub value: Arc<T>,
    /// 1 for the first batch, incremented per batch
    pub sequence: u64,
    pub refreshed_at: DateTime<Utc>,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            sequence: self.sequence,
            refreshed_at: self.refreshed_at,
        }
    }
}

pub type Updates<T> = watch::Receiver<Option<Snapshot<T>>>;

pub struct ViewPoller;

impl ViewPoller {
    /// Start refreshing `name` every `period`. The first batch runs
    /// immediately.
    pub fn spawn<T, F, Fut>(
        name: impl Into<String>,
        period: Duration,
        mut fetch: F,
    ) -> PollHandle<T>
    where
        T: Send + Sync + 'static,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        let name = name.into();
        let (updates_tx, updates) = watch::channel(None);
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);
        let task_name = name.clone();

        let task = tokio::spawn(async move {
            let mut ticker = interval(period.max(MIN_PERIOD));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut sequence = 0u64;

            info!("[Poller] {} started, interval={}ms", task_name, period.as_millis());

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.recv() => break,
                    _ = ticker.tick() => {}
                }

                let value = tokio::select! {
                    biased;
                    _ = shutdown_rx.recv() => {
                        debug!("[Poller] {} stopped mid-batch, result discarded", task_name);
                        break;
                    }
                    value = fetch() => value,
                };

                sequence += 1;
                let snapshot = Snapshot {
                    value: Arc::new(value),
                    sequence,
                    refreshed_at: Utc::now(),
                };
                if updates_tx.send(Some(snapshot)).is_err() {
                    break;
                }
                debug!("[Poller] {} published batch {}", task_name, sequence);
            }

            info!("[Poller] {} stopped after {} batches", task_name, sequence);
        });

        PollHandle {
            name,
            updates,
            shutdown_tx,
            task: Some(task),
        }
    }
}

/// Handle to a running poller. Dropping it stops the poller.
pub struct PollHandle<T> {
    name: String,
    updates: Updates<T>,
    shutdown_tx: broadcast::Sender<()>,
    task: Option<JoinHandle<()>>,
}

impl<T> PollHandle<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Most recent published batch
    pub fn latest(&self) -> Option<Snapshot<T>> {
        self.updates.borrow().clone()
    }

    /// Wait for the next batch. `None` once the poller has stopped.
    pub async fn changed(&mut self) -> Option<Snapshot<T>> {
        self.updates.changed().await.ok()?;
        self.updates.borrow_and_update().clone()
    }

    pub fn subscribe(&self) -> Updates<T> {
        self.updates.clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Signal shutdown and wait for the task to exit. A batch that panicked
    /// surfaces as `GeoError::Internal`.
    pub async fn stop(mut self) -> Result<()> {
        let _ = self.shutdown_tx.send(());
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("[Poller] {} task ended abnormally: {}", self.name, e);
                return Err(GeoError::Internal(format!(
                    "poller {} task failed: {}",
                    self.name, e
                )));
            }
        }
        Ok(())
    }
}

impl<T> Drop for PollHandle<T> {
    fn drop(&mut self) {
        if self.task.is_some() {
            let _ = self.shutdown_tx.send(());
        }
    }
}
