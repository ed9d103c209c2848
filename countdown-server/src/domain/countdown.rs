//! The countdown to the next departure.

use serde::Serialize;

use super::badge::Badge;
use super::time::ClockTime;

/// Time remaining until the next departure.
///
/// `minutes` is the total whole minutes remaining and may exceed 59;
/// `seconds` is the remainder (0-59).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub minutes: u32,
    pub seconds: u32,
    pub target: Option<ClockTime>,
    pub available: bool,
    pub badges: Vec<Badge>,
    /// Offset of the target from the start of now's service day.
    pub target_offset: Option<u32>,
    /// 0 when the target is on now's service day, 1 for tomorrow, ...
    pub day_offset: u32,
}

impl Countdown {
    /// A countdown for when no departure can be found.
    pub fn unavailable() -> Self {
        Self {
            minutes: 0,
            seconds: 0,
            target: None,
            available: false,
            badges: Vec::new(),
            target_offset: None,
            day_offset: 0,
        }
    }

    /// A countdown to `target`, `remaining_secs` from now.
    pub fn until(
        target: ClockTime,
        target_offset: u32,
        day_offset: u32,
        remaining_secs: u32,
        badges: Vec<Badge>,
    ) -> Self {
        Self {
            minutes: remaining_secs / 60,
            seconds: remaining_secs % 60,
            target: Some(target),
            available: true,
            badges,
            target_offset: Some(target_offset),
            day_offset,
        }
    }

    /// Total seconds remaining, or `None` when unavailable.
    pub fn remaining_secs(&self) -> Option<u32> {
        self.available.then_some(self.minutes * 60 + self.seconds)
    }

    /// The display tier: hours and minutes past the hour mark, minutes and
    /// seconds below it, bare seconds in the final minute.
    ///
    /// # Examples
    ///
    /// ```
    /// use countdown_server::domain::{ClockTime, Countdown, CountdownDisplay};
    ///
    /// let target = ClockTime::parse_hhmm("07:00").unwrap();
    /// let c = Countdown::until(target, 25_200, 1, 1350 * 60, vec![]);
    /// assert_eq!(c.display(), CountdownDisplay::Hours { hours: 22, minutes: 30 });
    /// ```
    pub fn display(&self) -> CountdownDisplay {
        if !self.available {
            CountdownDisplay::Unavailable
        } else if self.minutes >= 60 {
            CountdownDisplay::Hours {
                hours: self.minutes / 60,
                minutes: self.minutes % 60,
            }
        } else if self.minutes >= 1 {
            CountdownDisplay::Minutes {
                minutes: self.minutes,
                seconds: self.seconds,
            }
        } else {
            CountdownDisplay::Seconds {
                seconds: self.seconds,
            }
        }
    }

    pub fn urgency(&self) -> Urgency {
        if !self.available {
            Urgency::None
        } else if self.minutes < 1 {
            Urgency::Imminent
        } else if self.minutes < 5 {
            Urgency::Soon
        } else {
            Urgency::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum CountdownDisplay {
    Hours { hours: u32, minutes: u32 },
    Minutes { minutes: u32, seconds: u32 },
    Seconds { seconds: u32 },
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Imminent,
    Soon,
    Normal,
    None,
}
