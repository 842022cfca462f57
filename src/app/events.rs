//! Outbound application events.
//!
//! The [`ClockService`](super::service::ClockService) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them — log to serial, publish on a
//! diagnostics topic, etc.

use chrono::NaiveDateTime;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The presentation service has started.
    Started,

    /// A remote schedule request armed the alarm.
    AlarmScheduled { deadline: NaiveDateTime },

    /// The pending alarm matured and the bell was rung (or attempted).
    AlarmFired { deadline: NaiveDateTime },

    /// A quarter-hour chime was dispatched.
    ChimeStruck { hour: u8, minute: u8 },
}
