//! Domain types for the departure countdown engine.
//!
//! This module contains the core value types: clock times, route identity,
//! day-types, badges and the derived countdown and departure entries. All
//! identity types enforce their invariants at construction time, so code
//! that receives them can trust their validity.

mod badge;
mod countdown;
mod day_type;
mod departure;
mod error;
mod route;
mod time;

pub use badge::{Badge, BadgeKind, Severity};
pub use countdown::{Countdown, CountdownDisplay, Urgency};
pub use day_type::{DayType, InvalidOverride, ScheduleOverride};
pub use departure::{DayLabel, DepartureItem, RelativeDay};
pub use error::DomainError;
pub use route::{
    DirectionIndex, DisplayPolicy, InvalidDirection, InvalidRouteId, RouteId, TransportKind,
};
pub use time::{
    ClockTime, SECONDS_PER_DAY, ScheduledDeparture, TimeError, parse_service_sequence,
    seconds_of_day,
};
