//! # tally-config
//!
//! Layered configuration loading for tally using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TALLY_*` prefix, `__` as separator)
//! 2. Project-level `tally.toml`
//! 3. User-level `~/.config/tally/config.toml`
//!
//! `interval_secs`, `live_data_path`, and `sqlite_path` have no defaults;
//! loading fails if any source chain leaves one of them unset.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TALLY_SQLITE_PATH` -> `sqlite_path`, `TALLY_LOG__FILTER` -> `log.filter`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use tally_config::TallyConfig;
//!
//! let config = TallyConfig::load_with_dotenv().expect("config");
//! println!("tailing {}", config.live_data_path.display());
//! ```

mod chart;
mod error;
mod log;

pub use chart::{ChartConfig, MIN_CHART_HEIGHT};
pub use error::ConfigError;
pub use log::LogConfig;

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::{Deserialize, Serialize};

/// Name of the project-level config file, resolved against the working directory.
pub const PROJECT_CONFIG_FILE: &str = "tally.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "TALLY_";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TallyConfig {
    /// Seconds to wait after draining the live data file before checking again.
    pub interval_secs: u64,

    /// Line-delimited JSON file appended to by the producer.
    pub live_data_path: PathBuf,

    /// SQLite store, deleted and recreated at every start.
    pub sqlite_path: PathBuf,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub chart: ChartConfig,
}

impl TallyConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required value is missing, a value has the
    /// wrong type, or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `.env` from the working directory (if present) before building
    /// the figment. This is the entry point used by the binary.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::new();

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Polling interval as a `Duration`.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_secs == 0 {
            return Err(invalid("interval_secs", "must be at least 1 second"));
        }
        if self.live_data_path.as_os_str().is_empty() {
            return Err(invalid("live_data_path", "must not be empty"));
        }
        if self.sqlite_path.as_os_str().is_empty() {
            return Err(invalid("sqlite_path", "must not be empty"));
        }
        if self.chart.height < MIN_CHART_HEIGHT {
            return Err(invalid(
                "chart.height",
                &format!("must be at least {MIN_CHART_HEIGHT} rows"),
            ));
        }
        if self.log.filter.trim().is_empty() {
            return Err(invalid("log.filter", "must not be empty"));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tally").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
