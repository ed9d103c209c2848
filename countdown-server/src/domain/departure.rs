//! Departures as shown in the upcoming list.

use chrono::NaiveDate;
use serde::Serialize;

use super::badge::Badge;
use super::day_type::DayType;
use super::time::ClockTime;

/// Service day relative to now's service day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeDay {
    Today,
    Tomorrow,
    DayAfterTomorrow,
    Later(u32),
}

impl RelativeDay {
    pub fn from_offset(day_offset: u32) -> Self {
        match day_offset {
            0 => RelativeDay::Today,
            1 => RelativeDay::Tomorrow,
            2 => RelativeDay::DayAfterTomorrow,
            n => RelativeDay::Later(n),
        }
    }
}

/// Which service day a departure belongs to, for date-boundary display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DayLabel {
    pub relative: RelativeDay,
    pub date: NaiveDate,
    pub day_type: DayType,
}

/// One entry in the upcoming-departures list.
///
/// Built fresh on every query and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartureItem {
    pub time: ClockTime,
    /// Seconds from the start of now's service day.
    pub offset: u32,
    pub badges: Vec<Badge>,
    pub day_label: DayLabel,
    /// Only set in full-schedule lists, for entries already gone.
    pub departed: bool,
}
