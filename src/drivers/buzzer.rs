//! Passive buzzer tone driver (LEDC PWM).
//!
//! Blocking: `beep` holds the tone for its full duration, so callers that
//! must not stall (the presentation loop) play through a detached thread.

use std::thread;
use std::time::Duration;

use crate::drivers::hw_init;

pub struct Buzzer;

impl Buzzer {
    pub fn new() -> Self {
        Self
    }

    /// Sound `freq_hz` for `duration_ms`, then silence.
    pub fn beep(&self, freq_hz: u32, duration_ms: u32) {
        hw_init::ledc_tone(freq_hz);
        thread::sleep(Duration::from_millis(duration_ms as u64));
        hw_init::ledc_silence();
    }

    /// Gap between notes.
    pub fn rest(&self, duration_ms: u32) {
        thread::sleep(Duration::from_millis(duration_ms as u64));
    }
}

impl Default for Buzzer {
    fn default() -> Self {
        Self::new()
    }
}
