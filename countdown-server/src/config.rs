//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono_tz::Tz;

use crate::engine::EngineConfig;

pub const DEFAULT_TIMETABLE_PATH: &str = "data/timetable.json";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Hong_Kong;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid BIND_ADDR {value:?}: {reason}")]
    BindAddr { value: String, reason: String },

    #[error("invalid TIMEZONE {value:?}: {reason}")]
    Timezone { value: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Timetable data file
    pub timetable_path: PathBuf,

    pub bind_addr: SocketAddr,

    /// Civil time zone the timetables are published in
    pub timezone: Tz,

    pub engine: EngineConfig,
}

impl ServerConfig {
    /// Read `TIMETABLE_PATH`, `BIND_ADDR` and `TIMEZONE`, falling back to
    /// defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timetable_path = lookup("TIMETABLE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TIMETABLE_PATH));

        let bind = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::BindAddr {
                value: bind.clone(),
                reason: e.to_string(),
            })?;

        let timezone = match lookup("TIMEZONE") {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(|e| ConfigError::Timezone {
                    value: name.clone(),
                    reason: e.to_string(),
                })?,
            None => DEFAULT_TIMEZONE,
        };

        Ok(Self {
            timetable_path,
            bind_addr,
            timezone,
            engine: EngineConfig::default(),
        })
    }
}
