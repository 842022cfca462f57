//! Fuzz target: carousel slot rendering
//!
//! Fills the weather store from arbitrary input and renders every slot,
//! asserting that rendering never panics whatever mix of sentinel and
//! garbage values is present.
//!
//! cargo fuzz run fuzz_carousel

#![no_main]

use libfuzzer_sys::fuzz_target;
use reloj7::app::carousel::{self, SLOT_COUNT};
use reloj7::app::state::WeatherStation;

const TOPICS: [&str; 8] = [
    "tempExt/estado",
    "humedadExt/estado",
    "presion/estado",
    "VientoVel/estado",
    "VientoDir/estado",
    "amanecer/estado",
    "anochecer/estado",
    "detalle/estado",
];

fuzz_target!(|data: &[u8]| {
    let mut station = WeatherStation::new();

    // Each NUL-separated chunk feeds the next topic in rotation.
    for (i, chunk) in data.split(|&b| b == 0).enumerate() {
        let payload = String::from_utf8_lossy(chunk);
        let _ = station.apply_update(TOPICS[i % TOPICS.len()], &payload);
    }

    for slot in 0..SLOT_COUNT {
        // Slot 6 may fail on unparsable sun times; it must never panic.
        let _ = carousel::slot_text(&station, slot);
    }
});
