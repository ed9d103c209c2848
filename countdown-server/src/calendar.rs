//! Calendar classification of service dates.
//!
//! The engine never decides on its own whether a date is a holiday. It asks
//! a [`CalendarClassifier`], which lets tests and hosts supply their own.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::domain::DayType;

/// Maps a calendar date to the day-type whose timetable applies.
///
/// Implementations must be pure: the same date always yields the same tag.
pub trait CalendarClassifier {
    fn classify(&self, date: NaiveDate) -> DayType;
}

impl<F> CalendarClassifier for F
where
    F: Fn(NaiveDate) -> DayType,
{
    fn classify(&self, date: NaiveDate) -> DayType {
        self(date)
    }
}

/// Weekend rules plus an explicit list of public holidays.
///
/// Saturdays are `Saturday`, Sundays and listed holidays are
/// `SundayOrHoliday`, everything else is `Weekday`. A holiday falling on a
/// Saturday is treated as a holiday.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    holidays: HashSet<NaiveDate>,
}

impl HolidayCalendar {
    /// A calendar with no public holidays.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_holidays(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Number of listed holidays.
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

impl CalendarClassifier for HolidayCalendar {
    fn classify(&self, date: NaiveDate) -> DayType {
        if self.is_holiday(date) {
            return DayType::SundayOrHoliday;
        }
        match date.weekday() {
            Weekday::Sat => DayType::Saturday,
            Weekday::Sun => DayType::SundayOrHoliday,
            _ => DayType::Weekday,
        }
    }
}
