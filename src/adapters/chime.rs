//! Quarter-hour chime adapter.
//!
//! [`ChimePort::strike`] builds the note sequence for the given quarter
//! and hands it to a detached playback thread, so a chime never stalls
//! the presentation loop. Playback failures (thread spawn, missing
//! buzzer) are logged and swallowed.
//!
//! Pattern: one high ping per elapsed quarter (four at the top of the
//! hour), then `hour % 12` low strikes (midnight and noon ring twelve).

use std::thread;

use heapless::Vec;
use log::warn;

use crate::app::ports::ChimePort;
use crate::drivers::buzzer::Buzzer;

/// 4 quarter pings + 12 hour strikes.
const MAX_NOTES: usize = 16;

const QUARTER_MS: u32 = 250;
const STRIKE_MS: u32 = 600;
const GAP_MS: u32 = 350;

#[derive(Debug, Clone, Copy)]
struct Note {
    freq_hz: u32,
    duration_ms: u32,
}

pub struct BuzzerChime;

impl BuzzerChime {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuzzerChime {
    fn default() -> Self {
        Self::new()
    }
}

impl ChimePort for BuzzerChime {
    fn strike(&mut self, channel: u8, hour: u8, minute: u8) {
        let notes = build_sequence(channel, hour, minute);
        let spawned = thread::Builder::new()
            .name("chime".into())
            .stack_size(4 * 1024)
            .spawn(move || {
                let buzzer = Buzzer::new();
                for note in &notes {
                    buzzer.beep(note.freq_hz, note.duration_ms);
                    buzzer.rest(GAP_MS);
                }
            });

        if let Err(e) = spawned {
            warn!("chime thread did not start: {e}");
        }
    }
}

/// Strike pitch from the channel id, as a semitone index above A2
/// (110 Hz). The deployed channel 25 lands near A#4.
fn strike_freq(channel: u8) -> u32 {
    let freq = 110.0_f32 * 2.0_f32.powf(f32::from(channel) / 12.0);
    freq.round() as u32
}

fn build_sequence(channel: u8, hour: u8, minute: u8) -> Vec<Note, MAX_NOTES> {
    let strike = strike_freq(channel);
    let quarter = strike * 2;

    let quarters = match minute / 15 {
        0 => 4,
        q => u32::from(q),
    };
    let strikes = if minute == 0 {
        match hour % 12 {
            0 => 12,
            h => u32::from(h),
        }
    } else {
        0
    };

    let mut notes = Vec::new();
    for _ in 0..quarters {
        let _ = notes.push(Note {
            freq_hz: quarter,
            duration_ms: QUARTER_MS,
        });
    }
    for _ in 0..strikes {
        let _ = notes.push(Note {
            freq_hz: strike,
            duration_ms: STRIKE_MS,
        });
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_past_plays_one_ping() {
        let notes = build_sequence(25, 10, 15);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].duration_ms, QUARTER_MS);
    }

    #[test]
    fn quarter_to_plays_three_pings() {
        assert_eq!(build_sequence(25, 10, 45).len(), 3);
    }

    #[test]
    fn top_of_hour_plays_four_pings_plus_strikes() {
        let notes = build_sequence(25, 10, 0);
        assert_eq!(notes.len(), 4 + 10);
        assert_eq!(notes[3].duration_ms, QUARTER_MS);
        assert_eq!(notes[4].duration_ms, STRIKE_MS);
    }

    #[test]
    fn midnight_and_noon_ring_twelve() {
        assert_eq!(build_sequence(25, 0, 0).len(), 4 + 12);
        assert_eq!(build_sequence(25, 12, 0).len(), 4 + 12);
    }

    #[test]
    fn afternoon_hours_wrap_to_twelve_hour_count() {
        // 17:00 rings five.
        assert_eq!(build_sequence(25, 17, 0).len(), 4 + 5);
    }

    #[test]
    fn channel_sets_the_pitch() {
        assert_eq!(strike_freq(0), 110);
        assert_eq!(strike_freq(12), 220);
        assert_eq!(strike_freq(25), 466);
    }
}
