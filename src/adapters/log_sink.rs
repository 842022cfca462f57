//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A future diagnostics-topic adapter would implement the same trait.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | presentation service up");
            }
            AppEvent::AlarmScheduled { deadline } => {
                info!("ALARM | scheduled for {deadline}");
            }
            AppEvent::AlarmFired { deadline } => {
                info!("ALARM | fired (deadline {deadline})");
            }
            AppEvent::ChimeStruck { hour, minute } => {
                info!("CHIME | {:02}:{:02}", hour, minute);
            }
        }
    }
}
