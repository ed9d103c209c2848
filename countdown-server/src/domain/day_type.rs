//! Day-type tags and the manual schedule override.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which timetable variant governs a service day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Weekday,
    Saturday,
    SundayOrHoliday,
}

impl DayType {
    pub const ALL: [DayType; 3] = [DayType::Weekday, DayType::Saturday, DayType::SundayOrHoliday];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Weekday => "weekday",
            DayType::Saturday => "saturday",
            DayType::SundayOrHoliday => "sunday_or_holiday",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown override mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown schedule override {0:?}: expected auto, weekday, saturday or sunday")]
pub struct InvalidOverride(pub String);

/// User-selected schedule mode.
///
/// `Auto` lets the calendar decide; every other mode pins the day-type for
/// the whole session regardless of the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleOverride {
    #[default]
    Auto,
    Weekday,
    Saturday,
    Sunday,
}

impl ScheduleOverride {
    /// The day-type this mode pins, or `None` for `Auto`.
    pub fn pinned(&self) -> Option<DayType> {
        match self {
            ScheduleOverride::Auto => None,
            ScheduleOverride::Weekday => Some(DayType::Weekday),
            ScheduleOverride::Saturday => Some(DayType::Saturday),
            ScheduleOverride::Sunday => Some(DayType::SundayOrHoliday),
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, ScheduleOverride::Auto)
    }

    /// The next mode in toggle order: auto, weekday, saturday, sunday, auto.
    pub fn next(&self) -> Self {
        match self {
            ScheduleOverride::Auto => ScheduleOverride::Weekday,
            ScheduleOverride::Weekday => ScheduleOverride::Saturday,
            ScheduleOverride::Saturday => ScheduleOverride::Sunday,
            ScheduleOverride::Sunday => ScheduleOverride::Auto,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleOverride::Auto => "auto",
            ScheduleOverride::Weekday => "weekday",
            ScheduleOverride::Saturday => "saturday",
            ScheduleOverride::Sunday => "sunday",
        }
    }
}

impl FromStr for ScheduleOverride {
    type Err = InvalidOverride;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ScheduleOverride::Auto),
            "weekday" => Ok(ScheduleOverride::Weekday),
            "saturday" => Ok(ScheduleOverride::Saturday),
            "sunday" => Ok(ScheduleOverride::Sunday),
            _ => Err(InvalidOverride(s.to_string())),
        }
    }
}

impl fmt::Display for ScheduleOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
