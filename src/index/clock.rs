//! Time source for header timestamps

#[cfg(test)]
use mockall::automock;

use chrono::{DateTime, FixedOffset, Local};

/// Trait for reading the current wall-clock time
#[cfg_attr(test, automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local system time, keeping the local UTC offset
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}
