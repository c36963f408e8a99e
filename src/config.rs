//! Configuration loader for the `landslide-monitor` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). Nothing else in the crate reads `env::var`.
//!
use std::env;

use anyhow::{anyhow, Result};

use crate::report::SystemInfo;

/// Parse an optional numeric environment variable with a default value.
macro_rules! parse_env {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Read an optional string environment variable, treating blank as unset.
macro_rules! optional_env {
    ($var_name:expr) => {
        env::var($var_name).ok().filter(|v| !v.trim().is_empty())
    };
}

/// Default station label used in exported reports.
pub const DEFAULT_LOCATION: &str = "Monitoring Station Alpha";

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// TCP port the HTTP server binds on all interfaces.
    pub port: u16,

    /// Endpoint returning the station's latest snapshot as JSON. When unset,
    /// snapshots only arrive through `POST /readings`.
    pub feed_url: Option<String>,

    /// Seconds between feed polls.
    pub feed_poll_secs: u32,

    /// Station label written into reports.
    pub location: String,
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `SERVER_PORT` – HTTP port (default: 8080)
/// - `SENSOR_FEED_URL` – latest-snapshot endpoint to poll (default: none)
/// - `FEED_POLL_SECS` – poll interval in seconds, at least 1 (default: 5)
/// - `STATION_LOCATION` – station label (default: `Monitoring Station Alpha`)
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let port = parse_env!("SERVER_PORT", u16, 8080);
    let feed_url = optional_env!("SENSOR_FEED_URL");
    let feed_poll_secs = parse_env!("FEED_POLL_SECS", u32, 5);
    let location = optional_env!("STATION_LOCATION").unwrap_or_else(|| DEFAULT_LOCATION.into());

    let cfg = Config {
        port,
        feed_url,
        feed_poll_secs,
        location,
    };
    cfg.validate()?;
    Ok(cfg)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            feed_url: None,
            feed_poll_secs: 5,
            location: DEFAULT_LOCATION.to_string(),
        }
    }
}

impl Config {
    /// Reject values that parse but cannot be used.
    pub fn validate(&self) -> Result<()> {
        // ---
        if self.feed_poll_secs == 0 {
            return Err(anyhow!("FEED_POLL_SECS must be at least 1"));
        }
        if let Some(url) = &self.feed_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow!("SENSOR_FEED_URL must be an http(s) URL, got '{}'", url));
            }
        }
        Ok(())
    }

    pub fn system_info(&self) -> SystemInfo {
        SystemInfo::new(self.location.clone())
    }

    /// Log the loaded configuration for debugging purposes.
    ///
    /// Query strings on the feed URL are masked since realtime-database
    /// endpoints commonly carry an auth token there.
    pub fn log_config(&self) {
        // ---
        let masked_feed_url = match &self.feed_url {
            Some(url) => match url.find('?') {
                Some(q) => format!("{}?****", &url[..q]),
                None => url.clone(),
            },
            None => "(disabled)".to_string(),
        };

        tracing::info!("Configuration loaded:");
        tracing::info!("  SERVER_PORT      : {}", self.port);
        tracing::info!("  SENSOR_FEED_URL  : {}", masked_feed_url);
        tracing::info!("  FEED_POLL_SECS   : {}", self.feed_poll_secs);
        tracing::info!("  STATION_LOCATION : {}", self.location);
    }
}
