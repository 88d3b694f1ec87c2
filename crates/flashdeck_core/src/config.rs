//! Runtime configuration for embedding the store.
//!
//! # Responsibility
//! - Collect database path, logging settings and slot key from the
//!   environment with stable defaults.
//!
//! # Invariants
//! - `slot_key` is never blank.
//! - `log_level` is one of `trace|debug|info|warn|error`.

use crate::logging::{default_log_level, normalize_level};
use crate::repo::state_repo::DEFAULT_SLOT_KEY;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "FLASHDECK_DB";
pub const ENV_LOG_DIR: &str = "FLASHDECK_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "FLASHDECK_LOG_LEVEL";
pub const ENV_SLOT_KEY: &str = "FLASHDECK_SLOT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    BlankSlotKey,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{ENV_LOG_LEVEL}: {message}"),
            Self::BlankSlotKey => write!(f, "{ENV_SLOT_KEY} must not be blank"),
        }
    }
}

impl Error for ConfigError {}

/// Settings for one store session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file; `None` keeps state in memory for this process only.
    pub db_path: Option<PathBuf>,
    /// Directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
    pub slot_key: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_dir: None,
            log_level: default_log_level().to_string(),
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

impl CoreConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`; unset or blank paths keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        config.db_path = non_blank(lookup(ENV_DB_PATH)).map(PathBuf::from);
        config.log_dir = non_blank(lookup(ENV_LOG_DIR)).map(PathBuf::from);

        if let Some(level) = non_blank(lookup(ENV_LOG_LEVEL)) {
            config.log_level = normalize_level(&level)
                .map_err(ConfigError::InvalidLogLevel)?
                .to_string();
        }

        if let Some(slot) = lookup(ENV_SLOT_KEY) {
            let trimmed = slot.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::BlankSlotKey);
            }
            config.slot_key = trimmed.to_string();
        }

        Ok(config)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
