//! TOML-backed configuration with validation and logging setup.

use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

/// Default config file looked up next to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "helmsman.toml";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub limits: LimitsConfig,
    pub queue: QueueConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Card-search API base URL.
    pub scryfall_url: String,
    /// Recommendation site base URL.
    pub edhrec_url: String,
    /// CORS relay used to fetch recommendation pages.
    pub relay_url: String,
    /// User-Agent sent with every outbound request.
    pub user_agent: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Minimum spacing between consecutive card API requests.
    pub request_spacing_ms: u64,
    /// Time-to-live for cached commanders.
    pub cache_ttl_secs: u64,
    /// Entry count above which an insert sweeps expired entries.
    pub cache_capacity: usize,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// How many ready commanders a refill aims for.
    pub target_size: usize,
    /// Queue length at or below which a background refill starts.
    pub low_water_mark: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, from `helmsman.toml` if present,
    /// or fall back to defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.network.scryfall_url.is_empty() {
            return Err(invalid("network.scryfall_url", "cannot be empty"));
        }
        if self.network.edhrec_url.is_empty() {
            return Err(invalid("network.edhrec_url", "cannot be empty"));
        }
        if self.network.relay_url.is_empty() {
            return Err(invalid("network.relay_url", "cannot be empty"));
        }
        if self.limits.request_spacing_ms == 0 {
            return Err(invalid("limits.request_spacing_ms", "must be positive"));
        }
        if self.limits.cache_ttl_secs == 0 {
            return Err(invalid("limits.cache_ttl_secs", "must be positive"));
        }
        if self.queue.target_size == 0 {
            return Err(invalid("queue.target_size", "must be at least 1"));
        }
        if self.queue.low_water_mark >= self.queue.target_size {
            return Err(invalid(
                "queue.low_water_mark",
                "must be below queue.target_size",
            ));
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            scryfall_url: "https://api.scryfall.com".into(),
            edhrec_url: "https://edhrec.com".into(),
            relay_url: "https://api.allorigins.win/get".into(),
            user_agent: "helmsman/0.1 (github.com/usealtoal/helmsman)".into(),
            request_timeout_secs: 30,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            // Scryfall asks for 50-100ms between requests.
            request_spacing_ms: 75,
            cache_ttl_secs: 600,
            cache_capacity: 100,
        }
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            target_size: 10,
            low_water_mark: 3,
        }
    }
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}
