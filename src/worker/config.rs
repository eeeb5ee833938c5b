//! Worker tuning.

use crate::build::domain::CompatibilityGate;
use std::time::Duration;

/// Pause between polls of an empty queue in live mode.
pub const DEFAULT_SLEEP: Duration = Duration::from_secs(60);

/// How many jobs to run, whether to wait for more and which gate rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerConfig {
    limit: Option<u32>,
    live: bool,
    sleep: Duration,
    gate: CompatibilityGate,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            limit: None,
            live: false,
            sleep: DEFAULT_SLEEP,
            gate: CompatibilityGate::default(),
        }
    }
}

impl WorkerConfig {
    /// Creates the default configuration: unlimited, not live.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of jobs; `None` means unlimited.
    #[must_use]
    pub const fn with_limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }

    /// Reads a command-line limit where zero or less means unlimited.
    #[must_use]
    pub fn with_cli_limit(self, limit: i64) -> Self {
        self.with_limit(u32::try_from(limit).ok().filter(|value| *value > 0))
    }

    /// Keeps polling once the queue is empty.
    #[must_use]
    pub const fn live(mut self, live: bool) -> Self {
        self.live = live;
        self
    }

    /// Sets the pause between empty-queue polls.
    #[must_use]
    pub const fn with_sleep(mut self, sleep: Duration) -> Self {
        self.sleep = sleep;
        self
    }

    /// Sets the gate rules.
    #[must_use]
    pub const fn with_gate(mut self, gate: CompatibilityGate) -> Self {
        self.gate = gate;
        self
    }

    /// Returns the job cap.
    #[must_use]
    pub const fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Returns `true` in live mode.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.live
    }

    /// Returns the pause between empty-queue polls.
    #[must_use]
    pub const fn sleep(&self) -> Duration {
        self.sleep
    }

    /// Returns the gate rules.
    #[must_use]
    pub const fn gate(&self) -> CompatibilityGate {
        self.gate
    }
}
