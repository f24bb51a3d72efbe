//! # sage-config
//!
//! Layered configuration loading for Sage using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SAGE_*` prefix, `__` as separator)
//! 2. Project-level `.sage/config.toml`
//! 3. User-level `~/.config/sage/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SAGE_DATABASE__PATH` -> `database.path`,
//! `SAGE_REWARDS__CORRECT_PRACTICE_POINTS` -> `rewards.correct_practice_points`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use sage_config::SageConfig;
//!
//! let config = SageConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod database;
mod error;
mod general;
mod rewards;

pub use database::{DatabaseConfig, IN_MEMORY};
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use rewards::RewardsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use sage_core::policy::LEADERBOARD_SIZE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SageConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub rewards: RewardsConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl SageConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading a `.env` file from the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".sage/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("SAGE_").split("__"))
    }

    /// Reject values the workflow cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.rewards.correct_practice_points < 0 {
            return Err(ConfigError::InvalidValue {
                field: "rewards.correct_practice_points".into(),
                reason: format!(
                    "must be non-negative, got {}",
                    self.rewards.correct_practice_points
                ),
            });
        }
        if !(1..=LEADERBOARD_SIZE).contains(&self.general.leaderboard_size) {
            return Err(ConfigError::InvalidValue {
                field: "general.leaderboard_size".into(),
                reason: format!(
                    "must be between 1 and {LEADERBOARD_SIZE}, got {}",
                    self.general.leaderboard_size
                ),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sage").join("config.toml"))
    }
}
