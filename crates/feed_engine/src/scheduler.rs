use std::time::Duration;

use feed_logging::feed_debug;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Runs periodic refresh callbacks on a tokio runtime.
#[derive(Debug, Clone)]
pub struct AutoRefreshScheduler {
    runtime: Handle,
}

/// Owned timer. Cancelling or dropping it stops further ticks.
#[derive(Debug)]
pub struct RefreshHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
    period: Duration,
}

impl AutoRefreshScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Invokes `tick` every `interval_ms`, first after one full period.
    /// Returns `None` when `interval_ms` is 0 (auto-refresh disabled).
    pub fn start<F>(&self, interval_ms: u64, tick: F) -> Option<RefreshHandle>
    where
        F: Fn() + Send + 'static,
    {
        if interval_ms == 0 {
            return None;
        }
        let period = Duration::from_millis(interval_ms);
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let task = self.runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => tick(),
                }
            }
        });
        feed_debug!("Auto-refresh started every {:?}", period);

        Some(RefreshHandle {
            token,
            task,
            period,
        })
    }

    pub fn cancel(&self, handle: RefreshHandle) {
        handle.cancel();
    }
}

impl RefreshHandle {
    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn cancel(self) {
        // Drop does the work.
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        if !self.token.is_cancelled() {
            feed_debug!("Auto-refresh every {:?} cancelled", self.period);
        }
        self.token.cancel();
        self.task.abort();
    }
}
