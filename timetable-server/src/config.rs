//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::timetable::TimetableConfig;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Errors in the environment configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No timetable source configured
    #[error("set TIMETABLE_BASE_URL or TIMETABLE_FIXTURES")]
    NoTimetable,

    /// A variable has an unusable value
    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Where timetable data comes from.
#[derive(Debug, Clone)]
pub enum TimetableSource {
    /// Live HTTP provider
    Http(TimetableConfig),
    /// Fixture directory
    Fixtures(PathBuf),
}

/// Top-level server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// Timetable data source
    pub timetable: TimetableSource,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`.
    ///
    /// Variables:
    /// - `BIND_ADDR` (default `127.0.0.1:3000`)
    /// - `TIMETABLE_FIXTURES`: fixture directory; takes precedence
    /// - `TIMETABLE_BASE_URL`: HTTP provider base URL
    /// - `TIMETABLE_API_KEY`, `TIMETABLE_TIMEOUT_SECS`, `TIMETABLE_MAX_CONCURRENT`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind.parse().map_err(|_| ConfigError::Invalid {
            name: "BIND_ADDR",
            value: bind.clone(),
        })?;

        let timetable = if let Some(dir) = get("TIMETABLE_FIXTURES") {
            TimetableSource::Fixtures(PathBuf::from(dir))
        } else if let Some(url) = get("TIMETABLE_BASE_URL") {
            let mut config = TimetableConfig::new(url);
            if let Some(key) = get("TIMETABLE_API_KEY") {
                config = config.with_api_key(key);
            }
            if let Some(secs) = get("TIMETABLE_TIMEOUT_SECS") {
                config = config.with_timeout(parse_number("TIMETABLE_TIMEOUT_SECS", &secs)?);
            }
            if let Some(n) = get("TIMETABLE_MAX_CONCURRENT") {
                config = config.with_max_concurrent(parse_number("TIMETABLE_MAX_CONCURRENT", &n)?);
            }
            TimetableSource::Http(config)
        } else {
            return Err(ConfigError::NoTimetable);
        };

        Ok(Self {
            bind_addr,
            timetable,
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}
