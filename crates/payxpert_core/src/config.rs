//! Runtime configuration.
//!
//! # Responsibility
//! - Resolve database location and logging settings from the environment.
//! - Load an optional `.env` file before reading variables.
//!
//! # Invariants
//! - A missing `.env` file is not an error.
//! - `log_dir`, when set, is an absolute path.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "PAYXPERT_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "PAYXPERT_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "PAYXPERT_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "payxpert.sqlite3";

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
    /// `.env` exists but could not be read or parsed.
    EnvFile(dotenvy::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value, reason } => {
                write!(f, "invalid value `{value}` for {key}: {reason}")
            }
            Self::EnvFile(err) => write!(f, "failed to load .env file: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidValue { .. } => None,
            Self::EnvFile(err) => Some(err),
        }
    }
}

/// Settings needed to start the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Logging stays disabled when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        accept_env_file(dotenvy::dotenv())?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = non_blank(lookup(DB_PATH_VAR)) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(level) = non_blank(lookup(LOG_LEVEL_VAR)) {
            config.log_level = level;
        }

        if let Some(dir) = non_blank(lookup(LOG_DIR_VAR)) {
            let path = PathBuf::from(&dir);
            if !path.is_absolute() {
                return Err(ConfigError::InvalidValue {
                    key: LOG_DIR_VAR,
                    value: dir,
                    reason: "log directory must be an absolute path",
                });
            }
            config.log_dir = Some(path);
        }

        Ok(config)
    }
}

/// A missing `.env` file is fine; any other load failure is reported.
fn accept_env_file<T>(result: Result<T, dotenvy::Error>) -> Result<(), ConfigError> {
    match result {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ConfigError::EnvFile(err)),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}
