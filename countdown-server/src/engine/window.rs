//! Window aggregation across consecutive service days.
//!
//! Extendable routes show departures beyond the end of the current service
//! day. The aggregator reads every service day that can overlap the upper
//! bound, places every entry on a single axis (seconds from the start of now's
//! service day) and keeps those inside the requested bounds.

use crate::calendar::CalendarClassifier;
use crate::domain::{DayLabel, SECONDS_PER_DAY, ScheduledDeparture};
use crate::timetable::TimetableStore;

use super::service_day::{DayDepartures, ServiceDayAccessor};

/// A departure placed on the multi-day axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowEntry {
    pub departure: ScheduledDeparture,
    /// Seconds from the start of now's service day.
    pub offset: u32,
    pub label: DayLabel,
    /// Whether this is the final entry of its own day's list.
    pub is_last_in_day: bool,
}

/// Every entry of one service day, in published order.
pub fn day_entries(day: &DayDepartures) -> impl Iterator<Item = WindowEntry> + '_ {
    let last = day.departures.len().saturating_sub(1);
    day.departures
        .iter()
        .enumerate()
        .map(move |(idx, departure)| WindowEntry {
            departure: *departure,
            offset: day.absolute_offset(departure),
            label: day.label,
            is_last_in_day: idx == last,
        })
}

/// Departures with `lower < offset <= upper` across every service day that
/// overlaps the bound.
///
/// Day `d` only holds offsets from `d * SECONDS_PER_DAY` upwards, so days
/// `0..=upper / SECONDS_PER_DAY` are read. The result is strictly
/// increasing in offset. When two day lists publish
/// the same instant (an after-midnight tail and the next day's first trip),
/// the earlier day's entry is kept.
pub fn rolling_window<S, C>(
    accessor: &ServiceDayAccessor<'_, S, C>,
    lower: u32,
    upper: u32,
) -> Vec<WindowEntry>
where
    S: TimetableStore + ?Sized,
    C: CalendarClassifier + ?Sized,
{
    let mut entries: Vec<WindowEntry> = (0..=upper / SECONDS_PER_DAY)
        .filter_map(|day_offset| accessor.departures(day_offset))
        .flat_map(|day| {
            day_entries(&day)
                .filter(|e| e.offset > lower && e.offset <= upper)
                .collect::<Vec<_>>()
        })
        .collect();

    // Stable sort keeps the earlier day first among equal offsets.
    entries.sort_by_key(|e| e.offset);
    entries.dedup_by_key(|e| e.offset);
    entries
}

/// The rest of now's service day after `lower`; when nothing remains, the
/// whole of the next service day after `lower`.
pub fn rest_of_day<S, C>(accessor: &ServiceDayAccessor<'_, S, C>, lower: u32) -> Vec<WindowEntry>
where
    S: TimetableStore + ?Sized,
    C: CalendarClassifier + ?Sized,
{
    for day_offset in 0..=1 {
        let Some(day) = accessor.departures(day_offset) else {
            break;
        };
        let remaining: Vec<WindowEntry> = day_entries(&day).filter(|e| e.offset > lower).collect();
        if !remaining.is_empty() {
            return remaining;
        }
    }
    Vec::new()
}
