//! Engine configuration.

use chrono::Duration;

/// Tunables for departure queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Local hour before which "now" still belongs to the previous service day.
    pub service_day_start_hour: u32,

    /// How many following service days the countdown may roll over into.
    pub rollover_max_days: u32,

    /// Rolling window length for compact continuous views (hours).
    pub compact_horizon_hours: u32,

    /// Rolling window length for extended views (hours).
    pub extended_horizon_hours: u32,

    /// Number of later departures listed for standard routes.
    pub standard_list_len: usize,

    /// A wait longer than this switches standard bus routes to the full
    /// schedule (seconds).
    pub large_gap_secs: u32,
}

impl EngineConfig {
    pub fn compact_horizon(&self) -> Duration {
        Duration::hours(self.compact_horizon_hours as i64)
    }

    pub fn extended_horizon(&self) -> Duration {
        Duration::hours(self.extended_horizon_hours as i64)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            service_day_start_hour: 6,
            rollover_max_days: 1,
            compact_horizon_hours: 24,
            extended_horizon_hours: 48,
            standard_list_len: 5,
            large_gap_secs: 3600, // 1 hour
        }
    }
}
