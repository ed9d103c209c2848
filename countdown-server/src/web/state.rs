//! Application state for the web layer.

use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::engine::EngineConfig;
use crate::timetable::TimetableData;

/// Shared application state.
///
/// Everything is read-only after startup; each request evaluates the board
/// from scratch.
#[derive(Clone)]
pub struct AppState {
    /// Timetables, holiday calendar and badge rules
    pub data: Arc<TimetableData>,

    /// Engine tunables
    pub engine: Arc<EngineConfig>,

    /// Civil time zone the timetables are published in
    pub timezone: Tz,
}

impl AppState {
    pub fn new(data: TimetableData, engine: EngineConfig, timezone: Tz) -> Self {
        Self {
            data: Arc::new(data),
            engine: Arc::new(engine),
            timezone,
        }
    }

    /// Current local civil time in the configured zone.
    pub fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.timezone).naive_local()
    }
}
