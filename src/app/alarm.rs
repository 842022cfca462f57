//! One-shot deferred alarm.
//!
//! A remote request carries a number of minutes; the timer arms for
//! `now + minutes` and fires exactly once when the wall clock reaches the
//! deadline. A new request before the deadline simply re-arms.

use chrono::{Duration, NaiveDateTime};

use crate::error::DecodeError;

/// Alarm timer state machine: either idle or holding one pending deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlarmTimer {
    #[default]
    Idle,
    Pending {
        deadline: NaiveDateTime,
    },
}

impl AlarmTimer {
    pub fn new() -> Self {
        Self::Idle
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Arm the timer for `minutes` from `now`, replacing any pending
    /// deadline. Returns the new deadline.
    pub fn schedule(&mut self, now: NaiveDateTime, minutes: i64) -> NaiveDateTime {
        let deadline = now + Duration::minutes(minutes);
        *self = Self::Pending { deadline };
        deadline
    }

    /// Parse a schedule-request payload: a decimal number of minutes.
    pub fn parse_request(payload: &str) -> Result<i64, DecodeError> {
        payload
            .trim()
            .parse()
            .map_err(|_| DecodeError::BadInt("setalarma"))
    }

    /// If the deadline has been reached, disarm and return it. At most
    /// one tick ever observes `Some` per scheduled alarm.
    pub fn check_due(&mut self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match *self {
            Self::Pending { deadline } if now >= deadline => {
                *self = Self::Idle;
                Some(deadline)
            }
            _ => None,
        }
    }
}
