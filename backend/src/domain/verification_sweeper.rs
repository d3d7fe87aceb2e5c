//! Periodic purge of expired verification codes.
//!
//! The store already treats expired entries as missing when they are read;
//! the sweeper only keeps abandoned entries from piling up. It runs on a
//! tokio interval until its [`SweeperHandle`] is dropped.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::domain::Error;
use crate::domain::ports::VerificationCodeStore;

/// Background purge task configuration.
pub struct VerificationSweeper<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    period: Duration,
}

impl<S> VerificationSweeper<S> {
    /// Create a sweeper running every `period`. Zero periods are raised to
    /// one millisecond because tokio intervals cannot tick at zero.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, period: Duration) -> Self {
        Self {
            store,
            clock,
            period: period.max(Duration::from_millis(1)),
        }
    }
}

impl<S> VerificationSweeper<S>
where
    S: VerificationCodeStore + 'static,
{
    /// Purge once. Returns the number of removed entries.
    pub async fn sweep_once(&self) -> Result<usize, Error> {
        self.store
            .purge_expired(self.clock.utc())
            .await
            .map_err(Error::from)
    }

    /// Start the background task.
    #[must_use = "the sweeper stops when its handle is dropped"]
    pub fn spawn(self) -> SweeperHandle {
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match self.sweep_once().await {
                    Ok(0) => {}
                    Ok(purged) => debug!(purged, "expired verification codes purged"),
                    Err(err) => warn!(error = %err, "verification code sweep failed"),
                }
            }
        });
        SweeperHandle { task }
    }
}

/// Owns the sweeper task and aborts it on drop.
#[derive(Debug)]
pub struct SweeperHandle {
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Whether the task has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
