//! The one-second tick source.
//!
//! The [`SessionEngine`](super::SessionEngine) is caller-ticked; this is
//! the caller. A `Ticker` owns at most one scheduled task at a time:
//! `start` always aborts the previous handle before spawning a new one,
//! so orphaned intervals can never accumulate and double-decrement the
//! countdown. Dropping the ticker cancels the task.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Cancellable periodic tick task.
pub struct Ticker {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// A ticker firing once per second (the only granularity the engine
    /// understands).
    pub fn new() -> Self {
        Self::with_period(Duration::from_secs(1))
    }

    /// Custom period, for tests.
    pub fn with_period(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    /// Spawn the tick task, sending one unit message per period on `tx`.
    ///
    /// Any previously running task is cancelled first -- at most one live
    /// handle exists at any time. The task stops on its own when the
    /// receiving side is dropped.
    pub fn start(&mut self, tx: UnboundedSender<()>) {
        self.stop();
        let period = self.period;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first interval tick fires immediately; skip it so the
            // first delivered tick lands one full period after start.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(()).is_err() {
                    break;
                }
            }
        }));
    }

    /// Cancel the tick task, if any.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
