//! Domain error types.
//!
//! Validation failures for the identity and selection types. They are
//! distinct from data-file and HTTP errors.

use super::day_type::InvalidOverride;
use super::route::{InvalidDirection, InvalidRouteId};
use super::time::TimeError;

/// Any value that failed domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    RouteId(#[from] InvalidRouteId),

    #[error(transparent)]
    Direction(#[from] InvalidDirection),

    #[error(transparent)]
    Override(#[from] InvalidOverride),

    #[error(transparent)]
    Time(#[from] TimeError),
}
