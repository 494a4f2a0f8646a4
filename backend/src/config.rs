use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

const DEFAULT_DATA_DIR: &str = "./data";
// Browsers cap local storage at roughly 5 MB per origin.
const DEFAULT_STORAGE_QUOTA_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_VOTE_MAX_ATTEMPTS: u32 = 30;
const DEFAULT_VOTE_WINDOW_MINUTES: i64 = 1;
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost";

#[derive(Debug, Error)]
#[error("Invalid value for {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage_quota_bytes: usize,
    pub vote_max_attempts: u32,
    pub vote_window_minutes: i64,
    pub allowed_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_quota_bytes: DEFAULT_STORAGE_QUOTA_BYTES,
            vote_max_attempts: DEFAULT_VOTE_MAX_ATTEMPTS,
            vote_window_minutes: DEFAULT_VOTE_WINDOW_MINUTES,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from `lookup`, which maps a variable name to its raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            data_dir: try_load(&lookup, "THEEND_DATA_DIR", defaults.data_dir)?,
            storage_quota_bytes: try_load(&lookup, "THEEND_STORAGE_QUOTA_BYTES", defaults.storage_quota_bytes)?,
            vote_max_attempts: try_load(&lookup, "THEEND_VOTE_MAX_ATTEMPTS", defaults.vote_max_attempts)?,
            vote_window_minutes: try_load(&lookup, "THEEND_VOTE_WINDOW_MINUTES", defaults.vote_window_minutes)?,
            allowed_origin: try_load(&lookup, "THEEND_ALLOWED_ORIGIN", defaults.allowed_origin)?,
        };

        if config.vote_max_attempts == 0 {
            return Err(ConfigError { key: "THEEND_VOTE_MAX_ATTEMPTS", reason: "must be at least 1".into() });
        }
        if config.vote_window_minutes <= 0 {
            return Err(ConfigError { key: "THEEND_VOTE_WINDOW_MINUTES", reason: "must be at least 1".into() });
        }
        Ok(config)
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into(), ..Self::default() }
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + std::fmt::Debug,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError { key, reason: e.to_string() }
        }),
        None => {
            info!("{key} not set, using default: {default:?}");
            Ok(default)
        }
    }
}
