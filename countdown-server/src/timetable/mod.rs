//! Timetable store: the static, read-only published departure lists.
//!
//! Lists are loaded once at startup from a JSON data file and never
//! mutated. Lookups parse strictly, so a malformed entry only disables its
//! own (route, direction, day-type) list.

mod error;
mod file;
mod store;

pub use error::{DataAnomaly, LoadError, LookupError};
pub use file::{TimetableData, load_from_path, load_from_str};
pub use store::{DirectionInfo, RouteInfo, StaticTimetable, TimetableStore};
