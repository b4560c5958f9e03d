use serde::{Deserialize, Serialize};

/// Remaining time below which the discussion is considered to be running out.
pub const URGENT_SECONDS: u32 = 60;

/// Pre-tick values that produce a warning, covering the last ten seconds.
const WARNING_RANGE: std::ops::RangeInclusive<u32> = 2..=11;

/// Result of delivering one elapsed second to a [`Countdown`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tick {
    Running { remaining: u32, warning: bool },
    Expired,
}

/// A seconds counter for the discussion phase.
///
/// The countdown holds no clock of its own, something else has to call [`Countdown::tick`] once
/// per elapsed second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: u32,
    expired: bool,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            expired: false,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_urgent(&self) -> bool {
        self.remaining < URGENT_SECONDS
    }

    /// Advance by one second. Expiry is reported exactly once, later calls return `None`.
    pub fn tick(&mut self) -> Option<Tick> {
        if self.expired {
            return None;
        }
        if self.remaining <= 1 {
            self.remaining = 0;
            self.expired = true;
            return Some(Tick::Expired);
        }

        let warning = WARNING_RANGE.contains(&self.remaining);
        self.remaining -= 1;
        Some(Tick::Running {
            remaining: self.remaining,
            warning,
        })
    }
}

/// Format seconds as `m:ss`.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
