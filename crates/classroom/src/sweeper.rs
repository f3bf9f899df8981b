use crate::error::Result;
use chrono::Utc;
use rollcall_database::{Database, SessionRepository};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, Default)]
pub struct SweepStats {
    pub activated: u64,
    pub expired: u64,
}

/// Periodic status recomputation for attendance sessions.
///
/// The sweeper is the only mechanism that advances time-driven transitions:
/// every interval it promotes due upcoming sessions to active and closes
/// out finished ones as expired, each via a single conditional UPDATE so it
/// can never race an admin invalidation into overwriting a terminal state.
pub struct StatusSweeper {
    session_repo: SessionRepository,
    interval: Duration,
}

impl StatusSweeper {
    pub fn new(db: &Database, interval: Duration) -> Self {
        Self {
            session_repo: SessionRepository::new(db.pool().clone()),
            interval,
        }
    }

    /// Start the sweep loop on the runtime. The first pass runs
    /// immediately; the returned handle stops the loop.
    pub fn spawn(self) -> SweeperHandle {
        let cancel = CancellationToken::new();
        let child = cancel.clone();

        tracing::info!("Starting status sweeper (interval: {:?})", self.interval);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);

            loop {
                tokio::select! {
                    _ = child.cancelled() => break,
                    _ = ticker.tick() => {
                        match self.sweep().await {
                            Ok(stats) if stats.activated > 0 || stats.expired > 0 => {
                                tracing::info!(
                                    "Session sweep: {} activated, {} expired",
                                    stats.activated,
                                    stats.expired
                                );
                            }
                            Ok(_) => {}
                            Err(e) => {
                                // Keep sweeping; the next pass will catch up
                                tracing::warn!("Session sweep failed: {}", e);
                            }
                        }
                    }
                }
            }

            tracing::info!("Status sweeper stopped");
        });

        SweeperHandle { cancel, handle }
    }

    /// One sweep pass: activate due sessions, then expire finished ones.
    pub async fn sweep(&self) -> Result<SweepStats> {
        let now = Utc::now();

        let activated = self.session_repo.activate_due(now).await?;
        let expired = self.session_repo.expire_due(now).await?;

        Ok(SweepStats { activated, expired })
    }
}

/// Owned handle to a running sweeper; dropping it without calling stop
/// leaves the loop running until the runtime shuts down.
pub struct SweeperHandle {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl SweeperHandle {
    /// Cancel the loop and wait for it to finish its current pass.
    pub async fn stop(self) {
        self.cancel.cancel();
        let _ = self.handle.await;
    }
}
