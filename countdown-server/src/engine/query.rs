//! Board evaluation: countdown plus upcoming list for one selection.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::calendar::CalendarClassifier;
use crate::domain::{
    Countdown, DepartureItem, DirectionIndex, DisplayPolicy, RouteId, ScheduleOverride,
    TransportKind,
};
use crate::rules::RuleTable;
use crate::timetable::{RouteInfo, TimetableStore};

use super::badges::BadgeAnnotator;
use super::config::EngineConfig;
use super::finder::{NextDeparture, find_next_departure};
use super::service_day::{ServiceDay, ServiceDayAccessor};
use super::window::{WindowEntry, day_entries, rest_of_day, rolling_window};

/// Error from board evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("unknown route {0}")]
    UnknownRoute(RouteId),

    #[error("route {route} has no direction {direction}")]
    UnknownDirection {
        route: RouteId,
        direction: DirectionIndex,
    },
}

/// What the rider is looking at.
///
/// Selections are values: every change produces a new one. Switching route
/// or direction always comes back in compact view, since the extended flag
/// only means something for the (route, direction) it was set on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    pub route: RouteId,
    pub direction: DirectionIndex,
    pub mode: ScheduleOverride,
    pub extended: bool,
}

impl Selection {
    /// Outbound, auto mode, compact view.
    pub fn new(route: RouteId) -> Self {
        Self {
            route,
            direction: DirectionIndex::OUTBOUND,
            mode: ScheduleOverride::Auto,
            extended: false,
        }
    }

    /// A different route, starting outbound. The override mode carries over.
    pub fn with_route(&self, route: RouteId) -> Self {
        Self {
            route,
            direction: DirectionIndex::OUTBOUND,
            mode: self.mode,
            extended: false,
        }
    }

    pub fn with_direction(&self, direction: DirectionIndex) -> Self {
        Self {
            route: self.route.clone(),
            direction,
            mode: self.mode,
            extended: false,
        }
    }

    pub fn with_mode(&self, mode: ScheduleOverride) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    pub fn toggle_extended(&self) -> Self {
        Self {
            extended: !self.extended,
            ..self.clone()
        }
    }
}

/// Everything a display needs for one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub service_day: ServiceDay,
    pub countdown: Countdown,
    pub upcoming: Vec<DepartureItem>,
    /// The upcoming list is a whole day's schedule rather than a window.
    pub is_full_list: bool,
    pub is_extended_view: bool,
}

/// Evaluates boards against a timetable, calendar and rule table.
///
/// Evaluation is a pure function of `now` and the selection. Nothing is
/// cached between calls.
pub struct DepartureBoard<'a, S: ?Sized, C: ?Sized> {
    store: &'a S,
    calendar: &'a C,
    rules: &'a RuleTable,
    config: &'a EngineConfig,
}

impl<'a, S, C> DepartureBoard<'a, S, C>
where
    S: TimetableStore + ?Sized,
    C: CalendarClassifier + ?Sized,
{
    pub fn new(
        store: &'a S,
        calendar: &'a C,
        rules: &'a RuleTable,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            store,
            calendar,
            rules,
            config,
        }
    }

    /// Evaluate the board for `selection` at local civil time `now`.
    pub fn evaluate(
        &self,
        now: NaiveDateTime,
        selection: &Selection,
    ) -> Result<BoardSnapshot, QueryError> {
        let route = self
            .store
            .route(&selection.route)
            .ok_or_else(|| QueryError::UnknownRoute(selection.route.clone()))?;
        if !route.has_direction(selection.direction) {
            return Err(QueryError::UnknownDirection {
                route: selection.route.clone(),
                direction: selection.direction,
            });
        }

        let day = ServiceDay::resolve(now, selection.mode, self.calendar, self.config);
        let accessor = ServiceDayAccessor {
            store: self.store,
            calendar: self.calendar,
            route: &route.id,
            direction: selection.direction,
            day,
        };
        let annotator = BadgeAnnotator::new(self.rules);

        let next = find_next_departure(&accessor, self.config.rollover_max_days);
        let countdown = match &next {
            Some(next) => {
                let target = next.departure().time;
                let offset = next.absolute_offset();
                let badges = annotator.annotate(
                    &route.id,
                    selection.direction,
                    target,
                    next.is_last_in_day(),
                );
                Countdown::until(
                    target,
                    offset,
                    next.day.day_offset,
                    offset.saturating_sub(day.now_offset),
                    badges,
                )
            }
            None => Countdown::unavailable(),
        };

        let is_extended_view = selection.extended && route.policy.is_extendable();
        let threshold = countdown.target_offset.unwrap_or(day.now_offset);
        let (entries, is_full_list) = match route.policy {
            DisplayPolicy::Standard => self.standard_list(route, next.as_ref(), day.now_offset),
            DisplayPolicy::SingleHorizon if !is_extended_view => {
                (rest_of_day(&accessor, threshold), false)
            }
            DisplayPolicy::SingleHorizon | DisplayPolicy::Continuous => {
                let horizon = if is_extended_view {
                    self.config.extended_horizon()
                } else {
                    self.config.compact_horizon()
                };
                let upper = day.now_offset + horizon.num_seconds() as u32;
                (rolling_window(&accessor, threshold, upper), false)
            }
        };

        let upcoming: Vec<DepartureItem> = entries
            .into_iter()
            .map(|entry| DepartureItem {
                time: entry.departure.time,
                offset: entry.offset,
                badges: annotator.annotate(
                    &route.id,
                    selection.direction,
                    entry.departure.time,
                    entry.is_last_in_day,
                ),
                day_label: entry.label,
                departed: entry.offset <= day.now_offset,
            })
            .collect();

        tracing::debug!(
            route = %route.id,
            direction = %selection.direction,
            day_type = %day.day_type,
            available = countdown.available,
            upcoming = upcoming.len(),
            is_full_list,
            is_extended_view,
            "evaluated board"
        );

        Ok(BoardSnapshot {
            service_day: day,
            countdown,
            upcoming,
            is_full_list,
            is_extended_view,
        })
    }

    /// The upcoming list for a non-extendable route.
    ///
    /// Ferries, long waits and rollovers show the whole day's schedule;
    /// otherwise a short run of today's next departures follows the
    /// countdown.
    fn standard_list(
        &self,
        route: &RouteInfo,
        next: Option<&NextDeparture>,
        now_offset: u32,
    ) -> (Vec<WindowEntry>, bool) {
        let Some(next) = next else {
            return (Vec::new(), false);
        };

        let gap = next.absolute_offset().saturating_sub(now_offset);
        let full = next.day.day_offset > 0
            || route.kind == TransportKind::Ferry
            || gap > self.config.large_gap_secs;

        if full {
            let entries = day_entries(&next.day)
                .enumerate()
                .filter(|(idx, _)| *idx != next.index)
                .map(|(_, entry)| entry)
                .collect();
            (entries, true)
        } else {
            let entries = day_entries(&next.day)
                .skip(next.index + 1)
                .take(self.config.standard_list_len)
                .collect();
            (entries, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(s: &str) -> RouteId {
        RouteId::parse(s).unwrap()
    }

    #[test]
    fn route_change_resets_view() {
        let sel = Selection::new(route("NR330"))
            .with_direction(DirectionIndex::INBOUND)
            .with_mode(ScheduleOverride::Saturday)
            .toggle_extended();
        assert!(sel.extended);

        let switched = sel.with_route(route("NR334"));
        assert_eq!(switched.route, route("NR334"));
        assert_eq!(switched.direction, DirectionIndex::OUTBOUND);
        assert_eq!(switched.mode, ScheduleOverride::Saturday);
        assert!(!switched.extended);

        // The source selection is untouched
        assert!(sel.extended);
    }

    #[test]
    fn direction_change_resets_view() {
        let sel = Selection::new(route("NR330")).toggle_extended();
        let flipped = sel.with_direction(DirectionIndex::INBOUND);
        assert!(!flipped.extended);
        assert_eq!(flipped.route, sel.route);
    }

    #[test]
    fn mode_change_keeps_view() {
        let sel = Selection::new(route("NR330")).toggle_extended();
        let pinned = sel.with_mode(ScheduleOverride::Weekday);
        assert!(pinned.extended);
        assert!(!pinned.toggle_extended().extended);
    }

    #[test]
    fn error_messages() {
        let err = QueryError::UnknownRoute(route("X1"));
        assert_eq!(err.to_string(), "unknown route X1");

        let err = QueryError::UnknownDirection {
            route: route("X1"),
            direction: DirectionIndex::INBOUND,
        };
        assert_eq!(err.to_string(), "route X1 has no direction 1");
    }
}
