//! Timer tasks with explicit cancellation.
//!
//! Toast dismissal and the simulated generation progress both run on tokio
//! tasks spawned through a [`Scheduler`]. Every task listens on a child of the
//! scheduler's root token, so [`Scheduler::shutdown`] tears all of them down.

use std::time::Duration;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tokio_util::sync::{CancellationToken, DropGuard};

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    root: CancellationToken,
}

/// Handle to a scheduled task.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    token: CancellationToken,
}

impl TaskHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancel the task when the returned guard is dropped.
    pub fn into_guard(self) -> DropGuard {
        self.token.drop_guard()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once after `delay`.
    pub fn after<F>(&self, delay: Duration, task: F) -> TaskHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let token = self.root.child_token();
        let cancelled = token.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                _ = sleep(delay) => task(),
            }
        });

        TaskHandle { token }
    }

    /// Run `task` every `period`, first run one period from now.
    pub fn every<F>(&self, period: Duration, mut task: F) -> TaskHandle
    where
        F: FnMut() + Send + 'static,
    {
        let token = self.root.child_token();
        let cancelled = token.clone();

        tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticks.tick() => task(),
                }
            }
        });

        TaskHandle { token }
    }

    /// Cancel every task spawned by this scheduler.
    pub fn shutdown(&self) {
        self.root.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.root.is_cancelled()
    }
}
