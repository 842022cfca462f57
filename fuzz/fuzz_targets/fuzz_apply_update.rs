//! Fuzz target: `WeatherStation::apply_update`
//!
//! Drives arbitrary topic/payload pairs into the weather store and
//! asserts that it never panics and that a failed numeric parse leaves
//! the previous numeric values untouched.
//!
//! cargo fuzz run fuzz_apply_update

#![no_main]

use libfuzzer_sys::fuzz_target;
use reloj7::app::state::WeatherStation;

fuzz_target!(|data: &[u8]| {
    // Split the input into a topic and a payload at the first NUL.
    let mut parts = data.splitn(2, |&b| b == 0);
    let topic = String::from_utf8_lossy(parts.next().unwrap_or(&[])).into_owned();
    let payload = String::from_utf8_lossy(parts.next().unwrap_or(&[])).into_owned();

    let mut station = WeatherStation::new();
    let speed_before = station.wind_speed_mps;
    let dir_before = station.wind_dir_deg;

    if station.apply_update(&topic, &payload).is_err() {
        // A decode failure must not corrupt the numeric fields.
        assert_eq!(station.wind_speed_mps, speed_before);
        assert_eq!(station.wind_dir_deg, dir_before);
    }
});
