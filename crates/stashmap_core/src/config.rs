//! Process configuration read from the environment.
//!
//! | Variable              | Meaning                          | Default                      |
//! |-----------------------|----------------------------------|------------------------------|
//! | `STASHMAP_DB_PATH`    | inventory database file          | `<temp>/stashmap.sqlite3`    |
//! | `STASHMAP_LOG_LEVEL`  | `trace..error`                   | [`default_log_level`]        |
//! | `STASHMAP_LOG_DIR`    | absolute directory for log files | unset: file logging disabled |
//!
//! Blank values count as unset. Values that are not valid UTF-8 are an
//! error, never a silent fallback to the default.

use crate::logging::default_log_level;
use std::env::VarError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "STASHMAP_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "STASHMAP_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "STASHMAP_LOG_DIR";
const DEFAULT_DB_FILE_NAME: &str = "stashmap.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Variable is set but its value is not valid UTF-8.
    NotUnicode { key: &'static str },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotUnicode { key } => write!(f, "{key} is not valid UTF-8"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key))
    }

    /// Builds configuration from a `std::env::var`-shaped lookup.
    pub fn from_vars(
        lookup: impl Fn(&str) -> Result<String, VarError>,
    ) -> Result<Self, ConfigError> {
        for key in [DB_PATH_ENV, LOG_LEVEL_ENV, LOG_DIR_ENV] {
            if let Err(VarError::NotUnicode(_)) = lookup(key) {
                return Err(ConfigError::NotUnicode { key });
            }
        }
        Ok(Self::from_lookup(|key| lookup(key).ok()))
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|trimmed| !trimmed.is_empty())
        };

        Self {
            db_path: value(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: value(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: value(LOG_DIR_ENV).map(PathBuf::from),
        }
    }
}
