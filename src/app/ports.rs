//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ClockService (domain)
//! ```
//!
//! Driven adapters (displays, pub/sub transport, bell endpoint, chime,
//! wall clock) implement these traits. The
//! [`ClockService`](super::service::ClockService) consumes them via
//! generics, so the domain core never touches hardware directly.

use chrono::NaiveDateTime;

use crate::error::CommsError;

// ───────────────────────────────────────────────────────────────
// Display ports (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// The 4-digit 7-segment time display.
pub trait SegmentDisplayPort {
    /// Show four digits, most significant first. Values 0–9; anything
    /// else renders blank.
    fn show_digits(&mut self, digits: [u8; 4]);

    /// Turn the centre colon on or off.
    fn set_colon(&mut self, on: bool);

    /// Blank the display.
    fn clear(&mut self);
}

/// The 2-line fixed-width character display.
pub trait TextDisplayPort {
    /// Write a full line (row 0 or 1). Implementations pad or truncate
    /// to the physical width.
    fn write_line(&mut self, row: u8, text: &str);

    /// Blank both lines.
    fn clear(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Network ports (domain → transport)
// ───────────────────────────────────────────────────────────────

/// Outbound half of the pub/sub channel. Topics are relative to the
/// configured root; the adapter prepends it.
pub trait PublishPort {
    fn publish(&mut self, topic: &str, payload: &str, retain: bool) -> Result<(), CommsError>;
}

/// The remote bell endpoint — one GET, response body of no interest.
pub trait BellPort {
    fn ring(&mut self) -> Result<(), CommsError>;
}

// ───────────────────────────────────────────────────────────────
// Chime port (domain → detached side effect)
// ───────────────────────────────────────────────────────────────

/// Quarter-hour chime trigger. Implementations MUST return immediately
/// (detached thread or task) and swallow their own failures — the
/// presentation loop never waits on a chime.
pub trait ChimePort {
    fn strike(&mut self, channel: u8, hour: u8, minute: u8);
}

// ───────────────────────────────────────────────────────────────
// Clock port (wall-clock time source)
// ───────────────────────────────────────────────────────────────

/// Local wall-clock time. Injected so tests can simulate the clock.
pub trait ClockPort {
    fn now(&self) -> NaiveDateTime;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log, a
/// diagnostics topic, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
