//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                        | Connects to             |
//! |------------|-----------------------------------|-------------------------|
//! | `display`  | SegmentDisplayPort                | TM1637 driver           |
//! |            | TextDisplayPort                   | LCD1602 driver          |
//! | `mqtt`     | PublishPort + receiver thread     | ESP-IDF MQTT client     |
//! | `bell`     | BellPort                          | HTTP GET endpoint       |
//! | `chime`    | ChimePort                         | Buzzer, detached thread |
//! | `time`     | ClockPort                         | System local time       |
//! | `log_sink` | EventSink                         | Serial log output       |
//! | `wifi`     | (station bring-up)                | ESP-IDF WiFi STA        |
//!
//! The MQTT, bell and WiFi adapters only exist on the ESP-IDF target;
//! host tests substitute mock ports instead.

pub mod chime;
pub mod display;
pub mod log_sink;
pub mod time;

#[cfg(target_os = "espidf")]
pub mod bell;
#[cfg(target_os = "espidf")]
pub mod mqtt;
#[cfg(target_os = "espidf")]
pub mod wifi;
