//! Pacing strategies and the system clock
//!
//! The upstream tolerates roughly one member's call group per 700 ms.
//! `FixedInterval` enforces that in production; `NoPacing` keeps tests fast.

use std::time::Duration;

use chrono::{DateTime, Utc};
use faction_core::{Clock, PacingStrategy};

/// Default pause after each member's call group
pub const DEFAULT_PACING_INTERVAL: Duration = Duration::from_millis(700);

/// Same pause after every member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedInterval {
    interval: Duration,
}

impl FixedInterval {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for FixedInterval {
    fn default() -> Self {
        Self::new(DEFAULT_PACING_INTERVAL)
    }
}

impl PacingStrategy for FixedInterval {
    fn delay_after(&self, _member_index: usize) -> Duration {
        self.interval
    }
}

/// No pause at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl PacingStrategy for NoPacing {
    fn delay_after(&self, _member_index: usize) -> Duration {
        Duration::ZERO
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
