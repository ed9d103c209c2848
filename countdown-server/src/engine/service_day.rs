//! Service-day resolution.
//!
//! Timetables are published against a service day that runs past civil
//! midnight. Before the configured start hour (06:00 by default), "now"
//! still belongs to the previous day's service, so a late-night trip is read
//! from the same list as the evening before it.

use chrono::{Days, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::calendar::CalendarClassifier;
use crate::domain::{
    DayLabel, DayType, DirectionIndex, RelativeDay, RouteId, SECONDS_PER_DAY,
    ScheduleOverride, ScheduledDeparture, seconds_of_day,
};
use crate::timetable::TimetableStore;

use super::config::EngineConfig;

/// The service day that governs lookups for a given "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceDay {
    pub day_type: DayType,
    pub date: NaiveDate,
    /// True when "now" is in the early hours and was moved onto the
    /// previous calendar day.
    pub was_shifted_back: bool,
    /// Seconds from the start of this service day to "now".
    pub now_offset: u32,
    pub mode: ScheduleOverride,
}

impl ServiceDay {
    /// Resolve the service day for `now`.
    ///
    /// A manual override pins the day-type and never shifts the date. In
    /// auto mode the date moves back one day before the start hour and the
    /// calendar classifies the result.
    pub fn resolve<C>(
        now: NaiveDateTime,
        mode: ScheduleOverride,
        calendar: &C,
        config: &EngineConfig,
    ) -> Self
    where
        C: CalendarClassifier + ?Sized,
    {
        let today = now.date();
        let time_offset = seconds_of_day(now.time());

        if let Some(day_type) = mode.pinned() {
            return Self {
                day_type,
                date: today,
                was_shifted_back: false,
                now_offset: time_offset,
                mode,
            };
        }

        let shifted = if now.hour() < config.service_day_start_hour {
            today.checked_sub_days(Days::new(1))
        } else {
            None
        };

        match shifted {
            Some(date) => Self {
                day_type: calendar.classify(date),
                date,
                was_shifted_back: true,
                now_offset: time_offset + SECONDS_PER_DAY,
                mode,
            },
            None => Self {
                day_type: calendar.classify(today),
                date: today,
                was_shifted_back: false,
                now_offset: time_offset,
                mode,
            },
        }
    }

    /// Label for the service day `day_offset` days after this one.
    ///
    /// Auto mode reclassifies each date; a manual override repeats the
    /// pinned day-type. `None` only if the date leaves chrono's range.
    pub fn label_for<C>(&self, day_offset: u32, calendar: &C) -> Option<DayLabel>
    where
        C: CalendarClassifier + ?Sized,
    {
        let date = self.date.checked_add_days(Days::new(day_offset as u64))?;
        let day_type = match self.mode.pinned() {
            Some(pinned) => pinned,
            None if day_offset == 0 => self.day_type,
            None => calendar.classify(date),
        };
        Some(DayLabel {
            relative: RelativeDay::from_offset(day_offset),
            date,
            day_type,
        })
    }
}

/// One service day's departures with the label describing that day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayDepartures {
    pub day_offset: u32,
    pub departures: Vec<ScheduledDeparture>,
    pub label: DayLabel,
}

impl DayDepartures {
    /// Offset of an entry from the start of now's service day.
    pub fn absolute_offset(&self, departure: &ScheduledDeparture) -> u32 {
        self.day_offset * SECONDS_PER_DAY + departure.offset
    }
}

/// Reads successive service days for one (route, direction).
pub struct ServiceDayAccessor<'a, S: ?Sized, C: ?Sized> {
    pub store: &'a S,
    pub calendar: &'a C,
    pub route: &'a RouteId,
    pub direction: DirectionIndex,
    pub day: ServiceDay,
}

impl<S, C> ServiceDayAccessor<'_, S, C>
where
    S: TimetableStore + ?Sized,
    C: CalendarClassifier + ?Sized,
{
    /// Departures for the service day `day_offset` days after now's.
    ///
    /// A list that fails to parse is logged and treated as empty.
    pub fn departures(&self, day_offset: u32) -> Option<DayDepartures> {
        let label = self.day.label_for(day_offset, self.calendar)?;

        let departures = match self.store.lookup(self.route, self.direction, label.day_type) {
            Ok(list) => list,
            Err(error) => {
                tracing::warn!(
                    route = %self.route,
                    direction = %self.direction,
                    day_type = %label.day_type,
                    %error,
                    "skipping malformed timetable list"
                );
                Vec::new()
            }
        };

        Some(DayDepartures {
            day_offset,
            departures,
            label,
        })
    }
}
