//! Departure countdown engine.
//!
//! Given "now", a route, a direction and a schedule mode, the engine
//! answers two questions: how long until the next departure, and what
//! comes after it.
//!
//! The pipeline runs fresh on every evaluation:
//!
//! 1. resolve the service day (early hours belong to the previous day);
//! 2. find the next departure, rolling over to later days when today is
//!    exhausted;
//! 3. build the upcoming list from the route's display policy;
//! 4. badge every departure from the declarative rule table.

mod badges;
mod config;
mod finder;
mod query;
mod service_day;
mod window;


pub use badges::BadgeAnnotator;
pub use config::EngineConfig;
pub use finder::{NextDeparture, find_next, find_next_departure};
pub use query::{BoardSnapshot, DepartureBoard, QueryError, Selection};
pub use service_day::{DayDepartures, ServiceDay, ServiceDayAccessor};
pub use window::{WindowEntry, day_entries, rest_of_day, rolling_window};
