//! Integration tests: ClockService → ports (displays, net, bell, chime).

use chrono::{NaiveDate, NaiveDateTime};

use reloj7::CommsError;
use reloj7::app::commands::InboundMessage;
use reloj7::app::events::AppEvent;
use reloj7::app::ports::{
    BellPort, ChimePort, EventSink, PublishPort, SegmentDisplayPort, TextDisplayPort,
};
use reloj7::app::service::ClockService;
use reloj7::config::SystemConfig;

// ── Mock implementations ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum SegCall {
    Digits([u8; 4]),
    Colon(bool),
    Clear,
}

struct MockSegment {
    calls: Vec<SegCall>,
}
impl MockSegment {
    fn new() -> Self {
        Self { calls: Vec::new() }
    }
    fn digit_writes(&self) -> Vec<[u8; 4]> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SegCall::Digits(d) => Some(*d),
                _ => None,
            })
            .collect()
    }
}
impl SegmentDisplayPort for MockSegment {
    fn show_digits(&mut self, digits: [u8; 4]) {
        self.calls.push(SegCall::Digits(digits));
    }
    fn set_colon(&mut self, on: bool) {
        self.calls.push(SegCall::Colon(on));
    }
    fn clear(&mut self) {
        self.calls.push(SegCall::Clear);
    }
}

struct MockText {
    writes: Vec<(u8, String)>,
}
impl MockText {
    fn new() -> Self {
        Self { writes: Vec::new() }
    }
    fn row_writes(&self, row: u8) -> Vec<&str> {
        self.writes
            .iter()
            .filter(|(r, _)| *r == row)
            .map(|(_, t)| t.as_str())
            .collect()
    }
}
impl TextDisplayPort for MockText {
    fn write_line(&mut self, row: u8, text: &str) {
        self.writes.push((row, text.to_owned()));
    }
    fn clear(&mut self) {
        self.writes.clear();
    }
}

struct MockNet {
    publishes: Vec<(String, String, bool)>,
    fail: bool,
}
impl MockNet {
    fn new() -> Self {
        Self {
            publishes: Vec::new(),
            fail: false,
        }
    }
}
impl PublishPort for MockNet {
    fn publish(&mut self, topic: &str, payload: &str, retain: bool) -> Result<(), CommsError> {
        if self.fail {
            return Err(CommsError::MqttPublishFailed);
        }
        self.publishes
            .push((topic.to_owned(), payload.to_owned(), retain));
        Ok(())
    }
}

struct MockBell {
    rings: u32,
    fail: bool,
}
impl MockBell {
    fn new() -> Self {
        Self {
            rings: 0,
            fail: false,
        }
    }
}
impl BellPort for MockBell {
    fn ring(&mut self) -> Result<(), CommsError> {
        self.rings += 1;
        if self.fail {
            Err(CommsError::BellRequestFailed)
        } else {
            Ok(())
        }
    }
}

struct MockChime {
    strikes: Vec<(u8, u8, u8)>,
}
impl MockChime {
    fn new() -> Self {
        Self {
            strikes: Vec::new(),
        }
    }
}
impl ChimePort for MockChime {
    fn strike(&mut self, channel: u8, hour: u8, minute: u8) {
        self.strikes.push((channel, hour, minute));
    }
}

struct RecordingSink {
    events: Vec<AppEvent>,
}
impl RecordingSink {
    fn new() -> Self {
        Self { events: Vec::new() }
    }
}
impl EventSink for RecordingSink {
    fn emit(&mut self, e: &AppEvent) {
        self.events.push(e.clone());
    }
}

// ── Harness ───────────────────────────────────────────────────

struct Rig {
    service: ClockService,
    segment: MockSegment,
    text: MockText,
    net: MockNet,
    bell: MockBell,
    chime: MockChime,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        Self {
            service: ClockService::new(SystemConfig::default()),
            segment: MockSegment::new(),
            text: MockText::new(),
            net: MockNet::new(),
            bell: MockBell::new(),
            chime: MockChime::new(),
            sink: RecordingSink::new(),
        }
    }

    fn tick(&mut self, now: NaiveDateTime) {
        self.service.tick(
            now,
            &mut self.segment,
            &mut self.text,
            &mut self.net,
            &mut self.bell,
            &mut self.chime,
            &mut self.sink,
        );
    }

    fn message(&mut self, topic: &str, payload: &str, now: NaiveDateTime) {
        self.service.handle_message(
            &InboundMessage::new(topic, payload),
            now,
            &mut self.net,
            &mut self.sink,
        );
    }
}

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 26)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_runs_the_lamp_test() {
    let mut rig = Rig::new();
    rig.service.start(&mut rig.segment, &mut rig.sink);

    assert_eq!(
        rig.segment.calls,
        vec![SegCall::Digits([8, 8, 8, 8]), SegCall::Colon(true)]
    );
    assert_eq!(rig.sink.events, vec![AppEvent::Started]);
}

#[test]
fn first_tick_draws_time_and_date() {
    let mut rig = Rig::new();
    rig.tick(at(9, 41, 7));

    assert_eq!(rig.segment.digit_writes(), vec![[0, 9, 4, 1]]);
    // 2026-08-26 is a Wednesday.
    assert_eq!(rig.text.row_writes(0), vec!["Mie  26-Ago-2026 "]);
}

// ── Change-driven redraws ─────────────────────────────────────

#[test]
fn digits_redraw_only_on_minute_change() {
    let mut rig = Rig::new();
    rig.tick(at(9, 41, 7));
    rig.tick(at(9, 41, 8));
    rig.tick(at(9, 41, 9));
    assert_eq!(rig.segment.digit_writes().len(), 1);

    rig.tick(at(9, 42, 1));
    assert_eq!(rig.segment.digit_writes(), vec![[0, 9, 4, 1], [0, 9, 4, 2]]);
}

#[test]
fn colon_follows_second_parity() {
    let mut rig = Rig::new();
    rig.tick(at(9, 41, 6));
    rig.tick(at(9, 41, 7));
    // Same second again: no extra colon write.
    rig.tick(at(9, 41, 7));

    let colons: Vec<bool> = rig
        .segment
        .calls
        .iter()
        .filter_map(|c| match c {
            SegCall::Colon(on) => Some(*on),
            _ => None,
        })
        .collect();
    assert_eq!(colons, vec![true, false]);
}

#[test]
fn date_line_redraws_only_on_day_change() {
    let mut rig = Rig::new();
    rig.tick(at(23, 59, 58));
    rig.tick(at(23, 59, 59));
    assert_eq!(rig.text.row_writes(0).len(), 1);

    let midnight = NaiveDate::from_ymd_opt(2026, 8, 27)
        .unwrap()
        .and_hms_opt(0, 0, 1)
        .unwrap();
    rig.tick(midnight);
    assert_eq!(
        rig.text.row_writes(0),
        vec!["Mie  26-Ago-2026 ", "Jue  27-Ago-2026 "]
    );
}

// ── Carousel ──────────────────────────────────────────────────

#[test]
fn carousel_writes_once_per_period_bucket() {
    let mut rig = Rig::new();
    // Several 100 ms polls land inside the same wall-clock second.
    rig.tick(at(9, 41, 10));
    rig.tick(at(9, 41, 10));
    rig.tick(at(9, 41, 10));
    assert_eq!(rig.text.row_writes(1).len(), 1);

    // Off-boundary seconds release the latch, next boundary writes again.
    rig.tick(at(9, 41, 12));
    rig.tick(at(9, 41, 15));
    assert_eq!(rig.text.row_writes(1).len(), 2);
}

#[test]
fn carousel_cycles_through_all_seven_slots() {
    let mut rig = Rig::new();
    rig.message("DatosMeteo/tempExt/estado", "21.4", at(9, 40, 0));
    rig.message("DatosMeteo/humedadExt/estado", "63", at(9, 40, 0));
    rig.message("DatosMeteo/presion/estado", "1013", at(9, 40, 0));
    rig.message("DatosMeteo/VientoVel/estado", "10", at(9, 40, 0));
    rig.message("DatosMeteo/VientoDir/estado", "90", at(9, 40, 0));
    rig.message("DatosMeteo/amanecer/estado", "7:08", at(9, 40, 0));
    rig.message("DatosMeteo/anochecer/estado", "20:41", at(9, 40, 0));
    rig.message("DatosMeteo/detalle/estado", "nubes dispersas", at(9, 40, 0));

    for s in 0..40 {
        rig.tick(at(9, 41, s));
    }

    assert_eq!(
        rig.text.row_writes(1),
        vec![
            "nubes dispersas",
            "T:21.4\u{00b0}C  H:63%",
            "P:1013HPa",
            "V:36km/h - 19Kn",
            "F5-Fresquito",
            "090 Llevant",
            "07:08 - 20:41",
            // Slot 0 again: the cursor wrapped.
            "nubes dispersas",
        ]
    );
}

#[test]
fn sun_slot_renders_placeholder_until_times_arrive() {
    let mut rig = Rig::new();
    // Advance the cursor to slot 6 without sunrise/sunset data.
    for s in 0..31 {
        rig.tick(at(9, 41, s));
    }
    assert_eq!(rig.text.row_writes(1)[6], "--:-- - --:--");
}

// ── Chime ─────────────────────────────────────────────────────

#[test]
fn chime_strikes_exactly_once_per_quarter() {
    let mut rig = Rig::new();
    rig.tick(at(10, 15, 0));
    rig.tick(at(10, 15, 0));
    rig.tick(at(10, 15, 0));
    assert_eq!(rig.chime.strikes, vec![(25, 10, 15)]);
    assert!(
        rig.sink
            .events
            .iter()
            .filter(|e| matches!(e, AppEvent::ChimeStruck { .. }))
            .count()
            == 1
    );

    // Latch released once the second moves on; next quarter strikes again.
    rig.tick(at(10, 15, 1));
    rig.tick(at(10, 30, 0));
    assert_eq!(rig.chime.strikes, vec![(25, 10, 15), (25, 10, 30)]);
}

#[test]
fn no_chime_outside_quarter_minutes() {
    let mut rig = Rig::new();
    rig.tick(at(10, 7, 0));
    rig.tick(at(10, 14, 0));
    rig.tick(at(10, 16, 0));
    assert!(rig.chime.strikes.is_empty());
}

// ── Alarm ─────────────────────────────────────────────────────

#[test]
fn alarm_schedules_and_fires_end_to_end() {
    let mut rig = Rig::new();
    rig.message("reloj7/setalarma", "1", at(12, 0, 30));

    assert_eq!(
        rig.net.publishes,
        vec![("reloj7/alarma".into(), "2026-08-26 12:01:30".into(), true)]
    );
    assert_eq!(
        rig.sink.events,
        vec![AppEvent::AlarmScheduled {
            deadline: at(12, 1, 30)
        }]
    );

    // Before the deadline: nothing.
    rig.tick(at(12, 1, 29));
    assert_eq!(rig.bell.rings, 0);

    // First tick past the deadline: one ring, one retained clear.
    rig.tick(at(12, 1, 31));
    assert_eq!(rig.bell.rings, 1);
    assert_eq!(rig.net.publishes.len(), 2);
    assert_eq!(
        rig.net.publishes[1],
        ("reloj7/alarma".into(), String::new(), true)
    );
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::AlarmFired {
                deadline: at(12, 1, 30)
            })
    );

    // No refire on later ticks.
    rig.tick(at(12, 1, 32));
    rig.tick(at(12, 2, 31));
    assert_eq!(rig.bell.rings, 1);
    assert_eq!(rig.net.publishes.len(), 2);
}

#[test]
fn rescheduling_replaces_the_pending_alarm() {
    let mut rig = Rig::new();
    rig.message("reloj7/setalarma", "1", at(12, 0, 0));
    rig.message("reloj7/setalarma", "10", at(12, 0, 30));

    // The first deadline passes silently.
    rig.tick(at(12, 1, 2));
    assert_eq!(rig.bell.rings, 0);

    rig.tick(at(12, 10, 31));
    assert_eq!(rig.bell.rings, 1);
}

#[test]
fn bell_failure_still_clears_the_announcement() {
    let mut rig = Rig::new();
    rig.message("reloj7/setalarma", "0", at(12, 0, 30));
    rig.bell.fail = true;

    rig.tick(at(12, 0, 31));
    assert_eq!(rig.bell.rings, 1);
    assert_eq!(rig.net.publishes.last().unwrap().1, "");
    assert!(
        rig.sink
            .events
            .iter()
            .any(|e| matches!(e, AppEvent::AlarmFired { .. }))
    );
}

#[test]
fn malformed_alarm_request_is_dropped() {
    let mut rig = Rig::new();
    rig.message("reloj7/setalarma", "mañana", at(12, 0, 0));

    assert!(rig.net.publishes.is_empty());
    assert!(rig.sink.events.is_empty());
    rig.tick(at(23, 59, 59));
    assert_eq!(rig.bell.rings, 0);
}

// ── Weather robustness ────────────────────────────────────────

#[test]
fn malformed_wind_payload_keeps_previous_value() {
    let mut rig = Rig::new();
    rig.message("DatosMeteo/VientoVel/estado", "10", at(9, 40, 0));
    rig.message("DatosMeteo/VientoVel/estado", "vendaval", at(9, 40, 1));

    // Walk the carousel to slot 3 (wind speed).
    for s in 0..16 {
        rig.tick(at(9, 41, s));
    }
    assert_eq!(rig.text.row_writes(1)[3], "V:36km/h - 19Kn");
}

#[test]
fn unknown_topics_are_ignored() {
    let mut rig = Rig::new();
    rig.message("DatosMeteo/lluvia/estado", "4", at(9, 40, 0));
    rig.message("otracosa/estado", "x", at(9, 40, 0));
    assert!(rig.net.publishes.is_empty());
    assert!(rig.sink.events.is_empty());
}
