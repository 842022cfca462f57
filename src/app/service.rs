//! Presentation service: the domain core of the clock.
//!
//! Owns all mutable application state and drives the displays, chime and
//! alarm from two entry points: [`ClockService::handle_message`] for each
//! inbound pub/sub message and [`ClockService::tick`] once per poll
//! period. Everything hardware- or network-shaped arrives as a port
//! trait, so the whole service runs unmodified under host tests.

use chrono::{Datelike, NaiveDateTime, Timelike};
use log::{debug, warn};

use crate::app::alarm::AlarmTimer;
use crate::app::carousel::{self, CarouselCursor};
use crate::app::commands::InboundMessage;
use crate::app::events::AppEvent;
use crate::app::ports::{
    BellPort, ChimePort, EventSink, PublishPort, SegmentDisplayPort, TextDisplayPort,
};
use crate::app::state::WeatherStation;
use crate::config::SystemConfig;

/// Rendered on the carousel line while a slot cannot be derived yet.
const SUN_PLACEHOLDER: &str = "--:-- - --:--";

/// Deadline timestamp format used on the announcement topic.
const DEADLINE_FMT: &str = "%Y-%m-%d %H:%M:%S";

pub struct ClockService {
    config: SystemConfig,
    weather: WeatherStation,
    alarm: AlarmTimer,
    cursor: CarouselCursor,

    // Change-detection state. `None` means "never drawn", which forces
    // every section onto the displays on the first tick.
    last_second: Option<u32>,
    last_minute: Option<u32>,
    last_day: Option<u32>,
    /// Set after drawing a carousel slot, cleared when the second leaves
    /// the period boundary. Keeps the 10 Hz loop from redrawing (and
    /// re-advancing) within the same wall-clock second.
    carousel_written: bool,
    /// Same latch for the quarter-hour chime.
    chimed: bool,
}

impl ClockService {
    pub fn new(config: SystemConfig) -> Self {
        Self {
            config,
            weather: WeatherStation::new(),
            alarm: AlarmTimer::new(),
            cursor: CarouselCursor::new(),
            last_second: None,
            last_minute: None,
            last_day: None,
            carousel_written: false,
            chimed: false,
        }
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Lamp test: light every segment plus the colon. The first tick
    /// overwrites it with the real time.
    pub fn start(
        &mut self,
        segment: &mut impl SegmentDisplayPort,
        sink: &mut impl EventSink,
    ) {
        segment.show_digits([8, 8, 8, 8]);
        segment.set_colon(true);
        sink.emit(&AppEvent::Started);
    }

    // ───────────────────────────────────────────────────────────
    // Inbound messages
    // ───────────────────────────────────────────────────────────

    /// Route one inbound message (topic relative to the configured root).
    ///
    /// Malformed payloads are logged and dropped; previous state always
    /// survives.
    pub fn handle_message(
        &mut self,
        msg: &InboundMessage,
        now: NaiveDateTime,
        net: &mut impl PublishPort,
        sink: &mut impl EventSink,
    ) {
        if msg.topic == self.config.alarm_request_topic {
            self.handle_alarm_request(&msg.payload, now, net, sink);
            return;
        }

        if let Some(suffix) = msg
            .topic
            .strip_prefix(&self.config.weather_prefix)
            .and_then(|s| s.strip_prefix('/'))
        {
            if let Err(e) = self.weather.apply_update(suffix, &msg.payload) {
                warn!("dropping weather update on {}: {e}", msg.topic);
            }
            return;
        }

        debug!("ignoring message on unrecognized topic {}", msg.topic);
    }

    fn handle_alarm_request(
        &mut self,
        payload: &str,
        now: NaiveDateTime,
        net: &mut impl PublishPort,
        sink: &mut impl EventSink,
    ) {
        let minutes = match AlarmTimer::parse_request(payload) {
            Ok(m) => m,
            Err(e) => {
                warn!("ignoring alarm request {payload:?}: {e}");
                return;
            }
        };

        let deadline = self.alarm.schedule(now, minutes);
        let announcement = deadline.format(DEADLINE_FMT).to_string();
        if let Err(e) = net.publish(&self.config.alarm_announce_topic, &announcement, true) {
            warn!("could not announce alarm deadline: {e}");
        }
        sink.emit(&AppEvent::AlarmScheduled { deadline });
    }

    // ───────────────────────────────────────────────────────────
    // Poll tick
    // ───────────────────────────────────────────────────────────

    /// One pass of the presentation loop. Call every poll period with the
    /// current local time; each section redraws only when its own clock
    /// component changed.
    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        now: NaiveDateTime,
        segment: &mut impl SegmentDisplayPort,
        text: &mut impl TextDisplayPort,
        net: &mut impl PublishPort,
        bell: &mut impl BellPort,
        chime: &mut impl ChimePort,
        sink: &mut impl EventSink,
    ) {
        self.fire_alarm_if_due(now, net, bell, sink);

        let (hour, minute, second) = (now.hour(), now.minute(), now.second());

        if self.last_second != Some(second) {
            self.last_second = Some(second);
            segment.set_colon(second % 2 == 0);
        }

        if self.last_minute != Some(minute) {
            self.last_minute = Some(minute);
            segment.show_digits(time_digits(hour, minute));
        }

        if self.last_day != Some(now.day()) {
            self.last_day = Some(now.day());
            text.write_line(0, &carousel::date_line(now));
        }

        self.advance_carousel(second, text);
        self.strike_chime(hour, minute, second, chime, sink);
    }

    fn fire_alarm_if_due(
        &mut self,
        now: NaiveDateTime,
        net: &mut impl PublishPort,
        bell: &mut impl BellPort,
        sink: &mut impl EventSink,
    ) {
        let Some(deadline) = self.alarm.check_due(now) else {
            return;
        };

        if let Err(e) = bell.ring() {
            warn!("bell did not ring for alarm {deadline}: {e}");
        }
        // Clear the retained announcement whether or not the bell answered.
        if let Err(e) = net.publish(&self.config.alarm_announce_topic, "", true) {
            warn!("could not clear alarm announcement: {e}");
        }
        sink.emit(&AppEvent::AlarmFired { deadline });
    }

    fn advance_carousel(&mut self, second: u32, text: &mut impl TextDisplayPort) {
        if second % self.config.carousel_period_secs != 0 {
            self.carousel_written = false;
            return;
        }
        if self.carousel_written {
            return;
        }

        let line = carousel::slot_text(&self.weather, self.cursor.index())
            .unwrap_or_else(|_| SUN_PLACEHOLDER.to_owned());
        text.write_line(1, &line);
        self.carousel_written = true;
        self.cursor.advance();
    }

    fn strike_chime(
        &mut self,
        hour: u32,
        minute: u32,
        second: u32,
        chime: &mut impl ChimePort,
        sink: &mut impl EventSink,
    ) {
        if second != 0 {
            self.chimed = false;
            return;
        }
        if minute % 15 != 0 || self.chimed {
            return;
        }

        self.chimed = true;
        chime.strike(self.config.chime_channel, hour as u8, minute as u8);
        sink.emit(&AppEvent::ChimeStruck {
            hour: hour as u8,
            minute: minute as u8,
        });
    }
}

/// Split a wall-clock time into the four display digits, hours first.
fn time_digits(hour: u32, minute: u32) -> [u8; 4] {
    [
        (hour / 10) as u8,
        (hour % 10) as u8,
        (minute / 10) as u8,
        (minute % 10) as u8,
    ]
}
