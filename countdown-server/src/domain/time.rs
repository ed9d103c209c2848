//! Timetable clock times.
//!
//! Timetables publish departures as "HH:MM" strings. This module provides a
//! strict parser for them and the conversion into service offsets, which
//! handles lists that run past civil midnight.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Seconds in one civil day.
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid clock time {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// A published departure time of day, `00:00` to `23:59`.
///
/// # Examples
///
/// ```
/// use countdown_server::domain::ClockTime;
///
/// let t = ClockTime::parse_hhmm("07:30").unwrap();
/// assert_eq!(t.seconds_since_midnight(), 7 * 3600 + 30 * 60);
/// assert_eq!(t.to_string(), "07:30");
///
/// assert!(ClockTime::parse_hhmm("7:30").is_err());
/// assert!(ClockTime::parse_hhmm("24:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Build a clock time from hour and minute, if both are in range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// The input must be exactly five characters with a colon in the
    /// middle. Nothing is coerced: "7:30", "07:30:00" and "24:00" are all
    /// rejected.
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        if s.len() != 5 {
            return Err(TimeError::new(s, "expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeError::new(s, "expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new(s, "invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new(s, "hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new(s, "invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new(s, "minute must be 0-59"));
        }

        Self::from_hm(hour, minute).ok_or_else(|| TimeError::new(s, "invalid time"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Seconds since civil midnight, 0 to 86399.
    pub fn seconds_since_midnight(&self) -> u32 {
        self.0.num_seconds_from_midnight()
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl std::str::FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hhmm(s)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_hhmm(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// A departure placed on its service day.
///
/// `offset` counts seconds from the start of the service day the list was
/// published for. Continuation trips after midnight have offsets of 86400
/// and above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduledDeparture {
    pub time: ClockTime,
    pub offset: u32,
}

/// Threshold for detecting midnight rollover in a published list.
///
/// If a time appears more than 6 hours before the previous one, the list
/// has run past midnight.
const ROLLOVER_THRESHOLD_HOURS: i64 = 6;

/// Parse one day's published list into service offsets.
///
/// Lists are published in service-day order, so a list that runs past
/// midnight continues with small clock values ("23:30", "00:15"). Such
/// entries are moved onto the following civil day.
///
/// Parsing is strict: the first malformed entry fails the whole list.
///
/// # Examples
///
/// ```
/// use countdown_server::domain::parse_service_sequence;
///
/// let list = parse_service_sequence(&["23:00", "23:30", "00:15"]).unwrap();
/// assert_eq!(list[1].offset, 23 * 3600 + 30 * 60);
/// assert_eq!(list[2].offset, 86_400 + 15 * 60);
/// ```
pub fn parse_service_sequence<S: AsRef<str>>(
    times: &[S],
) -> Result<Vec<ScheduledDeparture>, TimeError> {
    let mut result = Vec::with_capacity(times.len());
    let mut day: u32 = 0;
    let mut prev: Option<ClockTime> = None;

    for raw in times {
        let time = ClockTime::parse_hhmm(raw.as_ref())?;

        if let Some(prev) = prev {
            let prev_minutes = prev.hour() as i64 * 60 + prev.minute() as i64;
            let curr_minutes = time.hour() as i64 * 60 + time.minute() as i64;
            if curr_minutes - prev_minutes < -(ROLLOVER_THRESHOLD_HOURS * 60) {
                day += 1;
            }
        }

        result.push(ScheduledDeparture {
            time,
            offset: day * SECONDS_PER_DAY + time.seconds_since_midnight(),
        });
        prev = Some(time);
    }

    Ok(result)
}

/// Seconds since midnight of a wall-clock time, ignoring sub-second parts.
pub fn seconds_of_day(time: NaiveTime) -> u32 {
    time.num_seconds_from_midnight()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_time()(hour in 0u32..24, minute in 0u32..60) -> String {
            format!("{:02}:{:02}", hour, minute)
        }
    }

    proptest! {
        /// Any valid HH:MM string parses successfully
        #[test]
        fn valid_hhmm_parses(time_str in valid_time()) {
            prop_assert!(ClockTime::parse_hhmm(&time_str).is_ok());
        }

        /// Parse then display roundtrips
        #[test]
        fn parse_display_roundtrip(time_str in valid_time()) {
            let parsed = ClockTime::parse_hhmm(&time_str).unwrap();
            prop_assert_eq!(parsed.to_string(), time_str);
        }

        #[test]
        fn invalid_hour_rejected(hour in 24u32..100, minute in 0u32..60) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(ClockTime::parse_hhmm(&s).is_err());
        }

        #[test]
        fn invalid_minute_rejected(hour in 0u32..24, minute in 60u32..100) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(ClockTime::parse_hhmm(&s).is_err());
        }

        /// Ascending lists keep offsets equal to seconds since midnight
        #[test]
        fn ascending_list_not_rolled(mut minutes in proptest::collection::vec(0u32..1440, 0..30)) {
            minutes.sort_unstable();
            minutes.dedup();
            let times: Vec<String> = minutes
                .iter()
                .map(|m| format!("{:02}:{:02}", m / 60, m % 60))
                .collect();

            let parsed = parse_service_sequence(&times).unwrap();
            for (d, m) in parsed.iter().zip(&minutes) {
                prop_assert_eq!(d.offset, m * 60);
            }
        }

        /// A list crossing midnight once is strictly increasing in offset
        #[test]
        fn midnight_crossing_is_increasing(
            evening in 20u32..24,
            early in 0u32..4,
        ) {
            let times = vec![
                format!("{:02}:00", evening),
                format!("{:02}:30", evening),
                format!("{:02}:00", early),
                format!("{:02}:30", early),
            ];
            let parsed = parse_service_sequence(&times).unwrap();
            for pair in parsed.windows(2) {
                prop_assert!(pair[0].offset < pair[1].offset);
            }
            prop_assert!(parsed[2].offset >= SECONDS_PER_DAY);
        }
    }
}
