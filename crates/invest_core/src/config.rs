//! Runtime configuration read from the process environment.
//!
//! # Responsibility
//! - Resolve database location, pool sizing, and logging settings.
//! - Report malformed values with the offending key.
//!
//! # Invariants
//! - Missing variables fall back to documented defaults; only malformed
//!   values are errors.

use crate::db::DbLocation;
use crate::logging::{default_log_level, LogSink};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "INVEST_DB_PATH";
pub const ENV_DB_MAX_IDLE: &str = "INVEST_DB_MAX_IDLE";
pub const ENV_LOG_LEVEL: &str = "INVEST_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "INVEST_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "invest.sqlite3";
const DEFAULT_MAX_IDLE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid { key, value, reason } => {
                write!(f, "invalid value `{value}` for {key}: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_location: DbLocation,
    pub db_max_idle: usize,
    pub log_level: String,
    pub log_sink: LogSink,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_location: DbLocation::File(PathBuf::from(DEFAULT_DB_FILE_NAME)),
            db_max_idle: DEFAULT_MAX_IDLE,
            log_level: default_log_level().to_string(),
            log_sink: LogSink::Stderr,
        }
    }
}

impl Config {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = read(ENV_DB_PATH) {
            config.db_location = DbLocation::parse(&path);
        }

        if let Some(raw) = read(ENV_DB_MAX_IDLE) {
            config.db_max_idle = parse_max_idle(&raw)?;
        }

        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level.trim().to_string();
        }

        if let Some(dir) = read(ENV_LOG_DIR) {
            config.log_sink = LogSink::directory(&dir).map_err(|reason| ConfigError::Invalid {
                key: ENV_LOG_DIR,
                value: dir.clone(),
                reason,
            })?;
        }

        Ok(config)
    }
}

fn parse_max_idle(raw: &str) -> Result<usize, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        key: ENV_DB_MAX_IDLE,
        value: raw.to_string(),
        reason: reason.to_string(),
    };
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(invalid("must be at least 1")),
        Ok(value) => Ok(value),
        Err(_) => Err(invalid("expected a positive integer")),
    }
}
