//! Wind derivations: unit conversion, Beaufort force, compass octant.
//!
//! Pure functions over the raw telemetry values. Labels are the local
//! Catalan wind rose and the Spanish Beaufort descriptions, padded the
//! way the 16-column display expects them.

/// Beaufort force descriptions, indexed by force number.
const FUERZAS: [&str; 13] = [
    "F0-Calma",
    "F1-Ventolina",
    "F2-Flojito  ",
    "F3-Flojo",
    "F4-Bonancible",
    "F5-Fresquito",
    "F6-Fresco",
    "F7-Frescacho",
    "F8-Temporal ",
    "F9-T fuerte",
    "F10-T duro",
    "F11-T muy duro",
    "F12-T huracanado",
];

/// Compass octant names, 0° first, clockwise in 45° steps.
const DIRECCIONES: [&str; 8] = [
    "Tramuntana",
    "Gregal",
    "Llevant",
    "Xaloc",
    "Migjorn",
    "Garbi",
    "Ponent",
    "Mestral",
];

/// Convert a wind speed in m/s to whole km/h and knots.
/// Each output is rounded independently.
pub fn kmh_knots(mps: f32) -> (u32, u32) {
    let kmh = (mps * 3.6).round().max(0.0) as u32;
    let knots = (mps * 3.6 / 1.852).round().max(0.0) as u32;
    (kmh, knots)
}

/// Beaufort force label for a wind speed in whole knots.
///
/// Bands follow the published scale. The upstream data source had two
/// boundary defects here (an inverted 44..40 band and `> 64` at the
/// top); both are corrected to the documented 34–40 and ≥64 bands.
pub fn beaufort(knots: u32) -> &'static str {
    let force = match knots {
        0 => 0,
        1..=3 => 1,
        4..=6 => 2,
        7..=10 => 3,
        11..=16 => 4,
        17..=21 => 5,
        22..=27 => 6,
        28..=33 => 7,
        34..=40 => 8,
        41..=47 => 9,
        48..=55 => 10,
        56..=63 => 11,
        _ => 12,
    };
    FUERZAS[force]
}

/// Wind-direction display label: the raw degrees zero-padded to three
/// digits, then the name of the nearest 45° octant. The octant is chosen
/// by a midpoint-up rule (remainder ≥ 22.5° rounds to the next octant)
/// and 360° wraps back to Tramuntana.
pub fn direction_label(degrees: u32) -> String {
    let rem = degrees % 45;
    let base = degrees - rem;
    let snapped = if rem * 2 >= 45 { base + 45 } else { base };
    let octant = ((snapped / 45) % 8) as usize;
    format!("{:03} {}", degrees, DIRECCIONES[octant])
}
