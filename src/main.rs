//! Reloj7 Firmware — Main Entry Point
//!
//! Hexagonal architecture with a fixed-cadence presentation loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  SegmentDisplay  TextDisplay   MqttLink      HttpBell        │
//! │  (TM1637)        (LCD1602)     (PublishPort) (BellPort)      │
//! │  BuzzerChime     SystemClock   LogEventSink                  │
//! │  (ChimePort)     (ClockPort)   (EventSink)                   │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ──────────────────      │
//! │                                                              │
//! │  ┌──────────────────────────────────────────────────────┐    │
//! │  │            ClockService (pure logic)                 │    │
//! │  │  weather state · carousel · alarm · chime gating     │    │
//! │  └──────────────────────────────────────────────────────┘    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The MQTT receiver thread is the only other thread; it feeds inbound
//! messages through an mpsc channel drained once per 100 ms tick.
#![deny(unused_must_use)]

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::prelude::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::sntp::EspSntp;
use log::info;

use reloj7::adapters::bell::HttpBell;
use reloj7::adapters::chime::BuzzerChime;
use reloj7::adapters::display::{SegmentDisplay, TextDisplay};
use reloj7::adapters::log_sink::LogEventSink;
use reloj7::adapters::mqtt::MqttLink;
use reloj7::adapters::time::SystemClock;
use reloj7::adapters::wifi;
use reloj7::app::ports::{ClockPort, TextDisplayPort};
use reloj7::app::service::ClockService;
use reloj7::config::SystemConfig;
use reloj7::drivers::hw_init;

/// Central European Time with the usual DST rule.
const TZ_SPEC: &str = "CET-1CEST,M3.5.0,M10.5.0/3";

const SEGMENT_BRIGHTNESS: u8 = 5;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Reloj7 v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // Local time for the date line and alarm deadlines.
    // SAFETY: called before any other thread exists.
    unsafe { std::env::set_var("TZ", TZ_SPEC) };

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let config = SystemConfig::default();

    // ── 3. Construct displays, show the boot splash ───────────
    let mut segment = SegmentDisplay::new(SEGMENT_BRIGHTNESS);
    let mut text = TextDisplay::new();
    text.write_line(0, "Inicializando");

    // ── 4. Network bring-up ───────────────────────────────────
    let peripherals = Peripherals::take().context("peripherals already taken")?;
    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let ssid = option_env!("WIFI_SSID").unwrap_or("");
    let pass = option_env!("WIFI_PASS").unwrap_or("");
    let _wifi = wifi::connect(peripherals.modem, sys_loop, nvs, ssid, pass)
        .context("wifi bring-up failed")?;

    let _sntp = EspSntp::new_default().context("failed to start SNTP")?;
    info!("SNTP initialized");

    text.write_line(1, "conexion MQTT");
    let (tx, rx) = mpsc::channel();
    let mut mqtt = MqttLink::connect(&config, tx).context("mqtt bring-up failed")?;
    text.clear();

    // ── 5. Construct the remaining adapters ───────────────────
    let mut bell = HttpBell::new(&config);
    let mut chime = BuzzerChime::new();
    let mut sink = LogEventSink::new();
    let clock = SystemClock::new();

    // ── 6. Presentation loop ──────────────────────────────────
    let mut service = ClockService::new(config);
    service.start(&mut segment, &mut sink);

    let poll = Duration::from_millis(u64::from(service.config().poll_interval_ms));
    loop {
        thread::sleep(poll);

        for msg in rx.try_iter() {
            service.handle_message(&msg, clock.now(), &mut mqtt, &mut sink);
        }

        service.tick(
            clock.now(),
            &mut segment,
            &mut text,
            &mut mqtt,
            &mut bell,
            &mut chime,
            &mut sink,
        );
    }
}
