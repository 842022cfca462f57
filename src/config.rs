//! System configuration parameters
//!
//! All tunable parameters for the Reloj7 appliance. Defaults mirror the
//! production deployment; credential loading is the operator's problem
//! (baked in at flash time), so there is no persistence layer here.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Messaging ---
    /// Broker URL, `mqtt://host:port` form.
    pub mqtt_broker_url: String,
    /// Client identifier presented to the broker.
    pub mqtt_client_id: String,
    /// Topic root everything lives under (no trailing slash).
    pub mqtt_root: String,
    /// Sub-tree carrying weather telemetry, relative to the root.
    /// Subscribed as `<root>/<weather_prefix>/#`.
    pub weather_prefix: String,
    /// Alarm schedule-request topic, relative to the root.
    pub alarm_request_topic: String,
    /// Retained alarm announcement topic, relative to the root.
    pub alarm_announce_topic: String,

    // --- Bell ---
    /// Endpoint rung when the alarm fires (response body ignored).
    pub bell_url: String,
    /// Upper bound on the bell HTTP round-trip (seconds).
    pub bell_timeout_secs: u8,

    // --- Timing ---
    /// Presentation loop poll period (milliseconds).
    pub poll_interval_ms: u32,
    /// Seconds between weather carousel advances.
    pub carousel_period_secs: u32,

    // --- Chime ---
    /// Tone/channel id handed to the chime (first positional parameter).
    pub chime_channel: u8,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Messaging
            mqtt_broker_url: "mqtt://localhost:1883".into(),
            mqtt_client_id: "reloj_de_la_cajita".into(),
            mqtt_root: "/torredembarra".into(),
            weather_prefix: "DatosMeteo".into(),
            alarm_request_topic: "reloj7/setalarma".into(),
            alarm_announce_topic: "reloj7/alarma".into(),

            // Bell
            bell_url: "http://mini.local/api/timbre".into(),
            bell_timeout_secs: 4,

            // Timing
            poll_interval_ms: 100, // 10 Hz
            carousel_period_secs: 5,

            // Chime
            chime_channel: 25,
        }
    }
}

impl SystemConfig {
    /// Full broker-side topic for a root-relative topic name.
    pub fn full_topic(&self, relative: &str) -> String {
        format!("{}/{}", self.mqtt_root, relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(c.poll_interval_ms > 0);
        assert!(c.carousel_period_secs > 0);
        assert!(c.bell_timeout_secs > 0);
        assert!(!c.mqtt_root.ends_with('/'));
        assert!(!c.alarm_request_topic.starts_with('/'));
        assert!(!c.alarm_announce_topic.starts_with('/'));
    }

    #[test]
    fn poll_faster_than_carousel() {
        let c = SystemConfig::default();
        assert!(
            c.poll_interval_ms < c.carousel_period_secs * 1000,
            "poll period must resolve the carousel cadence"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.mqtt_root, c2.mqtt_root);
        assert_eq!(c.poll_interval_ms, c2.poll_interval_ms);
        assert_eq!(c.chime_channel, c2.chime_channel);
    }

    #[test]
    fn full_topic_joins_with_root() {
        let c = SystemConfig::default();
        assert_eq!(
            c.full_topic("reloj7/setalarma"),
            "/torredembarra/reloj7/setalarma"
        );
    }
}
