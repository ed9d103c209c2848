//! Timetable store error types.

use std::path::PathBuf;

use crate::domain::{ClockTime, DayType, DirectionIndex, RouteId, TimeError};

/// A published list that cannot be used for lookups.
///
/// Lookup errors abort a single (route, direction, day-type) lookup. The
/// engine treats them as "no departures" for that day and logs them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// An entry is not a valid "HH:MM" time
    #[error(transparent)]
    Malformed(#[from] TimeError),

    /// An entry does not come strictly after its predecessor
    #[error("departure {time} is not after the previous entry")]
    Unordered { time: ClockTime },
}

/// A data problem found while validating a whole store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataAnomaly {
    pub route: RouteId,
    pub direction: DirectionIndex,
    pub day_type: DayType,
    pub error: LookupError,
}

/// Errors from loading the timetable data file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid timetable JSON
    #[error("failed to parse timetable data: {0}")]
    Json(#[from] serde_json::Error),

    /// The same route id appears twice
    #[error("duplicate route {0}")]
    DuplicateRoute(RouteId),

    /// A route has no directions, or more than two
    #[error("route {route} has {count} directions, expected 1 or 2")]
    DirectionCount { route: RouteId, count: usize },

    /// A badge rule refers to something that cannot exist
    #[error("invalid badge rule for {route}/{direction}: {reason}")]
    InvalidRule {
        route: RouteId,
        direction: DirectionIndex,
        reason: String,
    },
}
