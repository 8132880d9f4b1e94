//! Process configuration read from the environment.
//!
//! # Responsibility
//! - Resolve storage backend, HTTP port and logging settings.
//! - Keep environment access behind a lookup function so parsing is testable.
//!
//! # Invariants
//! - Mongo backend requires both `MONGO_URI` and `DB`.
//! - Values are trimmed; blank values count as missing.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_BACKEND: &str = "GRAPHMUSIC_BACKEND";
pub const ENV_MONGO_URI: &str = "MONGO_URI";
pub const ENV_MONGO_DB: &str = "DB";
pub const ENV_SQLITE_PATH: &str = "GRAPHMUSIC_SQLITE_PATH";
pub const ENV_PORT: &str = "GRAPHMUSIC_PORT";
pub const ENV_LOG_LEVEL: &str = "GRAPHMUSIC_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "GRAPHMUSIC_LOG_DIR";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SQLITE_FILE: &str = "graphmusic.sqlite3";

/// Configuration error raised at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required variable is absent or blank.
    Missing(&'static str),
    /// Variable is present but cannot be parsed.
    Invalid { var: &'static str, value: String },
    /// A `.env` file exists but could not be read or parsed.
    EnvFile(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(var) => write!(f, "missing required environment variable `{var}`"),
            Self::Invalid { var, value } => {
                write!(f, "invalid value `{value}` for environment variable `{var}`")
            }
            Self::EnvFile(message) => write!(f, "failed to load `.env` file: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Storage backend selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Mongo { uri: String, database: String },
    Sqlite { path: PathBuf },
}

impl StorageConfig {
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Mongo { .. } => "mongo",
            Self::Sqlite { .. } => "sqlite",
        }
    }
}

/// Full server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub storage: StorageConfig,
    pub port: u16,
    pub log_level: String,
    /// `None` logs to stderr only.
    pub log_dir: Option<String>,
}

impl ServerConfig {
    /// Loads an optional `.env` file, then reads the process environment.
    ///
    /// # Errors
    /// - [`ConfigError::EnvFile`] when a `.env` file exists but is unreadable
    ///   or malformed. An absent file is not an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        env_file_outcome(dotenvy::dotenv())?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let storage = match get(ENV_BACKEND).map(|value| value.to_ascii_lowercase()) {
            None => mongo_storage(&get)?,
            Some(backend) if backend == "mongo" => mongo_storage(&get)?,
            Some(backend) if backend == "sqlite" => StorageConfig::Sqlite {
                path: get(ENV_SQLITE_PATH)
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_SQLITE_FILE)),
            },
            Some(backend) => {
                return Err(ConfigError::Invalid {
                    var: ENV_BACKEND,
                    value: backend,
                })
            }
        };

        let port = match get(ENV_PORT) {
            None => DEFAULT_PORT,
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: ENV_PORT,
                value,
            })?,
        };

        Ok(Self {
            storage,
            port,
            log_level: get(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: get(ENV_LOG_DIR),
        })
    }
}

fn env_file_outcome<T>(result: dotenvy::Result<T>) -> Result<(), ConfigError> {
    match result {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ConfigError::EnvFile(err.to_string())),
    }
}

fn mongo_storage(get: &impl Fn(&str) -> Option<String>) -> Result<StorageConfig, ConfigError> {
    Ok(StorageConfig::Mongo {
        uri: get(ENV_MONGO_URI).ok_or(ConfigError::Missing(ENV_MONGO_URI))?,
        database: get(ENV_MONGO_DB).ok_or(ConfigError::Missing(ENV_MONGO_DB))?,
    })
}
