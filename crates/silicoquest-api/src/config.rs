//! Server configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_AUTOSAVE_SECS: u64 = 30;
const DEFAULT_NOTICE_SECS: u64 = 8;
const NOTICE_SECS_RANGE: std::ops::RangeInclusive<u64> = 5..=10;
const DEFAULT_PROGRESS_PATH: &str = "silicoquest_progress.json";

/// Runtime settings for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Progress file. `None` (an empty `SILICOQUEST_PROGRESS_PATH`) keeps
    /// progress in memory only.
    pub progress_path: Option<PathBuf>,
    /// Catalog YAML; the built-in catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
    /// `None` disables the periodic save.
    pub autosave_interval: Option<Duration>,
    pub notice_ttl: Duration,
}

impl ServerConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`.
    ///
    /// Recognised keys: `HOST`, `PORT`, `SILICOQUEST_PROGRESS_PATH`,
    /// `SILICOQUEST_CATALOG_PATH`, `SILICOQUEST_AUTOSAVE_SECS` and
    /// `SILICOQUEST_NOTICE_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a numeric variable does not parse or the
    /// notice lifetime is outside 5 to 10 seconds.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let autosave_secs = parse_or(&lookup, "SILICOQUEST_AUTOSAVE_SECS", DEFAULT_AUTOSAVE_SECS)?;
        let notice_secs = parse_or(&lookup, "SILICOQUEST_NOTICE_SECS", DEFAULT_NOTICE_SECS)?;
        if !NOTICE_SECS_RANGE.contains(&notice_secs) {
            return Err(AppError::Config(format!(
                "SILICOQUEST_NOTICE_SECS must be between {} and {}, got {notice_secs}",
                NOTICE_SECS_RANGE.start(),
                NOTICE_SECS_RANGE.end()
            )));
        }
        let progress_path = match lookup("SILICOQUEST_PROGRESS_PATH") {
            None => Some(PathBuf::from(DEFAULT_PROGRESS_PATH)),
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(PathBuf::from(raw)),
        };

        Ok(Self {
            host,
            port,
            progress_path,
            catalog_path: lookup("SILICOQUEST_CATALOG_PATH").map(PathBuf::from),
            autosave_interval: (autosave_secs > 0).then_some(Duration::from_secs(autosave_secs)),
            notice_ttl: Duration::from_secs(notice_secs),
        })
    }

    /// Notice lifetime in milliseconds.
    #[must_use]
    pub fn notice_ttl_ms(&self) -> i64 {
        i64::try_from(self.notice_ttl.as_millis()).unwrap_or(i64::MAX)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be a valid number: {e}"))),
    }
}
