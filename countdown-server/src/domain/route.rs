//! Route and direction identity types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Error returned when parsing an invalid route id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route id: {reason}")]
pub struct InvalidRouteId {
    reason: &'static str,
}

/// Maximum length of a route id.
const MAX_ROUTE_ID_LEN: usize = 16;

/// A stable route identifier such as `NR334`.
///
/// Route ids are 1 to 16 characters of uppercase ASCII letters, digits or
/// `-`. This type guarantees that any `RouteId` value is valid by
/// construction.
///
/// # Examples
///
/// ```
/// use countdown_server::domain::RouteId;
///
/// let id = RouteId::parse("NR334").unwrap();
/// assert_eq!(id.as_str(), "NR334");
///
/// assert!(RouteId::parse("nr334").is_err());
/// assert_eq!(RouteId::parse_normalized(" nr334 ").unwrap(), id);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(String);

impl RouteId {
    /// Parse a route id. The input must already be uppercase.
    pub fn parse(s: &str) -> Result<Self, InvalidRouteId> {
        if s.is_empty() {
            return Err(InvalidRouteId {
                reason: "must not be empty",
            });
        }

        if s.len() > MAX_ROUTE_ID_LEN {
            return Err(InvalidRouteId {
                reason: "must be at most 16 characters",
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'-')
        {
            return Err(InvalidRouteId {
                reason: "must be uppercase ASCII letters, digits or '-'",
            });
        }

        Ok(RouteId(s.to_string()))
    }

    /// Parse user input: trims whitespace and uppercases before validating.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidRouteId> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the route id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for RouteId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RouteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Error returned for a direction index other than 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction index {0}: must be 0 or 1")]
pub struct InvalidDirection(pub u8);

/// Which way along a route: 0 is outbound, 1 is inbound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DirectionIndex(u8);

impl DirectionIndex {
    pub const OUTBOUND: DirectionIndex = DirectionIndex(0);
    pub const INBOUND: DirectionIndex = DirectionIndex(1);

    pub fn new(index: u8) -> Result<Self, InvalidDirection> {
        match index {
            0 | 1 => Ok(DirectionIndex(index)),
            other => Err(InvalidDirection(other)),
        }
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for DirectionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for DirectionIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for DirectionIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u8::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// The kind of vehicle serving a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    Bus,
    Ferry,
}

/// How a route's upcoming-departure list is built.
///
/// This is a fixed, per-route classification taken from the timetable data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayPolicy {
    /// Not extendable: a short "later departures" list, or the full day.
    #[default]
    Standard,
    /// Extendable, compact view shows the rest of the current service day.
    SingleHorizon,
    /// Extendable, compact view is a rolling 24-hour window.
    Continuous,
}

impl DisplayPolicy {
    /// Whether the route supports the compact/extended toggle.
    pub fn is_extendable(&self) -> bool {
        !matches!(self, DisplayPolicy::Standard)
    }
}
