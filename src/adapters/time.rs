//! Wall-clock adapter.
//!
//! Local time from the system clock, which on the ESP-IDF target is set
//! by SNTP (with the TZ environment giving local offset). Host builds
//! read the machine clock directly, so simulation behaves the same.

use chrono::{Local, NaiveDateTime};

use crate::app::ports::ClockPort;

/// [`ClockPort`] over the system clock.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
