//! In-memory timetable store.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{
    DayType, DirectionIndex, DisplayPolicy, RouteId, ScheduledDeparture, TransportKind,
    parse_service_sequence,
};

use super::error::{DataAnomaly, LookupError};

/// Static description of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub id: RouteId,
    pub kind: TransportKind,
    pub policy: DisplayPolicy,
    pub directions: Vec<DirectionInfo>,
}

impl RouteInfo {
    pub fn new(id: RouteId, kind: TransportKind, policy: DisplayPolicy) -> Self {
        Self {
            id,
            kind,
            policy,
            directions: Vec::new(),
        }
    }

    pub fn has_direction(&self, direction: DirectionIndex) -> bool {
        self.directions.iter().any(|d| d.index == direction)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectionInfo {
    pub index: DirectionIndex,
    /// Display name such as "To Airport"; passed through untouched.
    pub name: Option<String>,
}

/// Read-only access to published timetables.
///
/// This abstraction allows the engine to be tested with hand-built data.
pub trait TimetableStore {
    /// Static information about a route, if it exists.
    fn route(&self, id: &RouteId) -> Option<&RouteInfo>;

    /// All routes, in published order.
    fn routes(&self) -> Vec<&RouteInfo>;

    /// The published list for one (route, direction, day-type).
    ///
    /// Missing data is not an error: it yields an empty list, meaning no
    /// service that day.
    fn lookup(
        &self,
        route: &RouteId,
        direction: DirectionIndex,
        day_type: DayType,
    ) -> Result<Vec<ScheduledDeparture>, LookupError>;
}

/// Timetables held in memory as published "HH:MM" strings.
///
/// Strings are kept as loaded and parsed strictly on every lookup, so a bad
/// entry only ever affects its own list.
#[derive(Debug, Clone, Default)]
pub struct StaticTimetable {
    routes: Vec<RouteInfo>,
    lists: HashMap<(RouteId, DirectionIndex, DayType), Vec<String>>,
}

impl StaticTimetable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route, replacing any existing route with the same id.
    pub fn add_route(&mut self, route: RouteInfo) {
        if let Some(existing) = self.routes.iter_mut().find(|r| r.id == route.id) {
            *existing = route;
        } else {
            self.routes.push(route);
        }
    }

    /// Set the published list for one (route, direction, day-type).
    pub fn set_departures<S: Into<String>>(
        &mut self,
        route: &RouteId,
        direction: DirectionIndex,
        day_type: DayType,
        times: impl IntoIterator<Item = S>,
    ) {
        self.lists.insert(
            (route.clone(), direction, day_type),
            times.into_iter().map(Into::into).collect(),
        );
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Check every published list, returning each problem found.
    pub fn validate(&self) -> Vec<DataAnomaly> {
        let mut anomalies: Vec<DataAnomaly> = self
            .lists
            .keys()
            .filter_map(|(route, direction, day_type)| {
                self.lookup(route, *direction, *day_type)
                    .err()
                    .map(|error| DataAnomaly {
                        route: route.clone(),
                        direction: *direction,
                        day_type: *day_type,
                        error,
                    })
            })
            .collect();
        anomalies.sort_by(|a, b| {
            (&a.route, a.direction, a.day_type.as_str())
                .cmp(&(&b.route, b.direction, b.day_type.as_str()))
        });
        anomalies
    }
}

impl TimetableStore for StaticTimetable {
    fn route(&self, id: &RouteId) -> Option<&RouteInfo> {
        self.routes.iter().find(|r| &r.id == id)
    }

    fn routes(&self) -> Vec<&RouteInfo> {
        self.routes.iter().collect()
    }

    fn lookup(
        &self,
        route: &RouteId,
        direction: DirectionIndex,
        day_type: DayType,
    ) -> Result<Vec<ScheduledDeparture>, LookupError> {
        let Some(raw) = self.lists.get(&(route.clone(), direction, day_type)) else {
            return Ok(Vec::new());
        };

        let departures = parse_service_sequence(raw)?;

        if let Some(pair) = departures.windows(2).find(|w| w[1].offset <= w[0].offset) {
            return Err(LookupError::Unordered { time: pair[1].time });
        }

        Ok(departures)
    }
}
