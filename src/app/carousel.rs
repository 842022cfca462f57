//! Weather carousel and calendar line formatting.
//!
//! The second display line rotates through seven fixed slots, advancing
//! one slot every carousel period. Slot text is derived from a
//! [`WeatherStation`] snapshot; the cursor lives with the presentation
//! side and simply wraps modulo the slot count.

use chrono::{Datelike, NaiveDateTime};

use crate::app::state::WeatherStation;
use crate::app::wind;
use crate::error::FormatError;

/// Number of informations the carousel rotates through.
pub const SLOT_COUNT: usize = 7;

/// Weekday abbreviations, Monday first.
const DIAS: [&str; 7] = ["Lun", "Mar", "Mie", "Jue", "Vie", "Sab", "Dom"];

/// Month abbreviations, January first.
const MESES: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Set", "Oct", "Nov", "Dic",
];

// ───────────────────────────────────────────────────────────────
// Cursor
// ───────────────────────────────────────────────────────────────

/// Position in the 7-slot rotation. Always a valid slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarouselCursor(usize);

impl CarouselCursor {
    pub fn new() -> Self {
        Self(0)
    }

    /// Current slot index, in `0..SLOT_COUNT`.
    pub fn index(self) -> usize {
        self.0
    }

    /// Step to the next slot, wrapping after the last.
    pub fn advance(&mut self) {
        self.0 = (self.0 + 1) % SLOT_COUNT;
    }
}

// ───────────────────────────────────────────────────────────────
// Slot rendering
// ───────────────────────────────────────────────────────────────

/// Render one carousel slot from the current weather state.
///
/// Slot 6 needs parsed sunrise/sunset times and fails with
/// [`FormatError::SunTimesUnknown`] while either still carries the
/// startup sentinel — callers render a placeholder instead.
pub fn slot_text(state: &WeatherStation, slot: usize) -> Result<String, FormatError> {
    debug_assert!(slot < SLOT_COUNT, "invalid carousel slot: {slot}");
    let text = match slot {
        0 => state.sky.clone(),
        1 => format!("T:{}\u{00b0}C  H:{}%", state.temperature, state.humidity),
        2 => format!("P:{}HPa", state.pressure),
        3 => {
            let (kmh, knots) = wind::kmh_knots(state.wind_speed_mps);
            format!("V:{}km/h - {}Kn", kmh, knots)
        }
        4 => {
            let (_, knots) = wind::kmh_knots(state.wind_speed_mps);
            wind::beaufort(knots).to_owned()
        }
        5 => wind::direction_label(state.wind_dir_deg),
        _ => {
            let (sr_h, sr_m) = parse_hhmm(&state.sunrise)?;
            let (ss_h, ss_m) = parse_hhmm(&state.sunset)?;
            format!("{:02}:{:02} - {:02}:{:02}", sr_h, sr_m, ss_h, ss_m)
        }
    };
    Ok(text)
}

/// First display line: weekday, day, month abbreviation, year.
pub fn date_line(now: NaiveDateTime) -> String {
    let dia = DIAS[now.weekday().num_days_from_monday() as usize];
    let mes = MESES[(now.month() - 1) as usize];
    format!("{}  {}-{}-{} ", dia, now.day(), mes, now.year())
}

/// Parse an `"HH:MM"` string. The startup sentinel has no colon and
/// fails here, which is exactly the guard slot 6 relies on.
fn parse_hhmm(s: &str) -> Result<(u32, u32), FormatError> {
    let (h, m) = s.trim().split_once(':').ok_or(FormatError::SunTimesUnknown)?;
    let h = h.parse().map_err(|_| FormatError::SunTimesUnknown)?;
    let m = m.parse().map_err(|_| FormatError::SunTimesUnknown)?;
    Ok((h, m))
}
