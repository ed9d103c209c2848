//! Next-departure lookup with day rollover.

use crate::calendar::CalendarClassifier;
use crate::domain::{SECONDS_PER_DAY, ScheduledDeparture};
use crate::timetable::TimetableStore;

use super::service_day::{DayDepartures, ServiceDayAccessor};

/// Index of the first departure strictly after `now_offset`.
///
/// A departure at exactly `now_offset` is already gone. `departures` must be
/// strictly increasing in offset, which the store guarantees.
pub fn find_next(departures: &[ScheduledDeparture], now_offset: u32) -> Option<usize> {
    let idx = departures.partition_point(|d| d.offset <= now_offset);
    (idx < departures.len()).then_some(idx)
}

/// The departure a countdown points at, with the day it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextDeparture {
    pub day: DayDepartures,
    pub index: usize,
}

impl NextDeparture {
    pub fn departure(&self) -> &ScheduledDeparture {
        &self.day.departures[self.index]
    }

    /// Offset from the start of now's service day.
    pub fn absolute_offset(&self) -> u32 {
        self.day.absolute_offset(self.departure())
    }

    pub fn is_last_in_day(&self) -> bool {
        self.index + 1 == self.day.departures.len()
    }
}

/// Find the next departure on now's service day, rolling forward over at
/// most `max_days` following days when today is exhausted.
///
/// On a later day the first departure is taken, provided it is still after
/// now; `None` means no service within the search bound.
pub fn find_next_departure<S, C>(
    accessor: &ServiceDayAccessor<'_, S, C>,
    max_days: u32,
) -> Option<NextDeparture>
where
    S: TimetableStore + ?Sized,
    C: CalendarClassifier + ?Sized,
{
    let now_offset = accessor.day.now_offset;

    let today = accessor.departures(0)?;
    if let Some(index) = find_next(&today.departures, now_offset) {
        return Some(NextDeparture { day: today, index });
    }

    for day_offset in 1..=max_days {
        let Some(day) = accessor.departures(day_offset) else {
            break;
        };
        let threshold = now_offset.saturating_sub(day_offset * SECONDS_PER_DAY);
        let found = if now_offset >= day_offset * SECONDS_PER_DAY {
            find_next(&day.departures, threshold)
        } else {
            (!day.departures.is_empty()).then_some(0)
        };
        if let Some(index) = found {
            tracing::debug!(
                route = %accessor.route,
                day_offset,
                time = %day.departures[index].time,
                "rolled over to a later service day"
            );
            return Some(NextDeparture { day, index });
        }
    }

    None
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn departures(mut minutes: Vec<u32>) -> Vec<ScheduledDeparture> {
        minutes.sort_unstable();
        minutes.dedup();
        let times: Vec<String> = minutes
            .iter()
            .map(|m| format!("{:02}:{:02}", m / 60, m % 60))
            .collect();
        crate::domain::parse_service_sequence(&times).unwrap()
    }

    proptest! {
        /// Binary search agrees with a linear scan
        #[test]
        fn matches_linear_scan(
            minutes in proptest::collection::vec(0u32..1440, 0..40),
            now in 0u32..SECONDS_PER_DAY,
        ) {
            let deps = departures(minutes);
            let linear = deps.iter().position(|d| d.offset > now);
            prop_assert_eq!(find_next(&deps, now), linear);
        }

        /// The found departure is strictly after now and nothing earlier is
        #[test]
        fn found_is_earliest_strictly_after(
            minutes in proptest::collection::vec(0u32..1440, 1..40),
            now in 0u32..SECONDS_PER_DAY,
        ) {
            let deps = departures(minutes);
            if let Some(idx) = find_next(&deps, now) {
                prop_assert!(deps[idx].offset > now);
                for d in &deps[..idx] {
                    prop_assert!(d.offset <= now);
                }
            }
        }
    }
}
