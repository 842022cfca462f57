//! Rolling weather state store.
//!
//! One field per telemetry topic, each overwritten independently as
//! messages arrive. The store never considers itself "complete": fields
//! keep the startup sentinel until their first message, and the carousel
//! copes with whatever mix is present.

use crate::error::DecodeError;

/// Startup sentinel for every string field ("desconocido").
pub const UNKNOWN: &str = "desc";

/// Latest weather readings, raw units as received.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherStation {
    /// Outdoor temperature, passthrough string (°C as sent).
    pub temperature: String,
    /// Relative humidity, passthrough string (%).
    pub humidity: String,
    /// Pressure, passthrough string (hPa).
    pub pressure: String,
    /// Wind speed in m/s.
    pub wind_speed_mps: f32,
    /// Wind direction in degrees.
    pub wind_dir_deg: u32,
    /// Sunrise "HH:MM".
    pub sunrise: String,
    /// Sunset "HH:MM".
    pub sunset: String,
    /// Sky description, free text.
    pub sky: String,
}

impl Default for WeatherStation {
    fn default() -> Self {
        Self {
            temperature: UNKNOWN.into(),
            humidity: UNKNOWN.into(),
            pressure: UNKNOWN.into(),
            wind_speed_mps: 0.0,
            wind_dir_deg: 0,
            sunrise: UNKNOWN.into(),
            sunset: UNKNOWN.into(),
            sky: UNKNOWN.into(),
        }
    }
}

impl WeatherStation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one telemetry message, keyed by topic suffix (relative to
    /// the weather sub-tree). String fields take the payload verbatim,
    /// with no validation; numeric fields parse, and a parse failure
    /// leaves the previous value untouched. Unrecognized suffixes are
    /// silently ignored.
    pub fn apply_update(&mut self, topic: &str, payload: &str) -> Result<(), DecodeError> {
        match topic {
            "tempExt/estado" => self.temperature = payload.to_owned(),
            "humedadExt/estado" => self.humidity = payload.to_owned(),
            "presion/estado" => self.pressure = payload.to_owned(),
            "VientoVel/estado" => {
                self.wind_speed_mps = payload
                    .trim()
                    .parse()
                    .map_err(|_| DecodeError::BadFloat("VientoVel"))?;
            }
            "VientoDir/estado" => {
                self.wind_dir_deg = payload
                    .trim()
                    .parse()
                    .map_err(|_| DecodeError::BadInt("VientoDir"))?;
            }
            "amanecer/estado" => self.sunrise = payload.to_owned(),
            "anochecer/estado" => self.sunset = payload.to_owned(),
            "detalle/estado" => self.sky = payload.to_owned(),
            _ => {}
        }
        Ok(())
    }
}
