//! Connection configuration and environment loading
//!
//! The connection config is built once at process start from environment
//! variables (optionally seeded from a `.env` file) and shared read-only by
//! every component afterwards.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lnms_core::config::{load_environment, ConnectionConfig};
//!
//! load_environment();
//! let config = ConnectionConfig::from_env().expect("invalid environment");
//! config.validate().expect("invalid LibreNMS configuration");
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const ENV_URL: &str = "LIBRENMS_URL";
pub const ENV_TOKEN: &str = "LIBRENMS_TOKEN";
pub const ENV_VERIFY_SSL: &str = "LIBRENMS_VERIFY_SSL";
pub const ENV_TIMEOUT: &str = "LIBRENMS_TIMEOUT";
pub const ENV_READ_ONLY: &str = "READ_ONLY_MODE";
pub const ENV_RATE_LIMIT_ENABLED: &str = "RATE_LIMIT_ENABLED";
pub const ENV_RATE_LIMIT_MAX: &str = "RATE_LIMIT_MAX_REQUESTS";
pub const ENV_RATE_LIMIT_WINDOW: &str = "RATE_LIMIT_WINDOW_MINUTES";

/// Variable naming an alternative env file
pub const ENV_FILE_VAR: &str = "LIBRENMS_ENV_FILE";

/// Default env file, relative to the working directory
pub const DEFAULT_ENV_FILE: &str = ".env";

fn default_verify_ssl() -> bool { true }
fn default_timeout() -> u64 { 30 }
fn default_max_requests() -> u32 { 60 }
fn default_window_minutes() -> u32 { 1 }

/// Connection and policy settings for one LibreNMS instance
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL, e.g. `https://librenms.example.net:8443`
    pub base_url: String,

    /// LibreNMS API token
    pub token: String,

    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default)]
    pub read_only_mode: bool,

    #[serde(default)]
    pub rate_limit_enabled: bool,

    #[serde(default = "default_max_requests")]
    pub rate_limit_max_requests: u32,

    #[serde(default = "default_window_minutes")]
    pub rate_limit_window_minutes: u32,
}

impl ConnectionConfig {
    /// Config with defaults for everything except endpoint and token
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            verify_ssl: default_verify_ssl(),
            timeout_seconds: default_timeout(),
            read_only_mode: false,
            rate_limit_enabled: false,
            rate_limit_max_requests: default_max_requests(),
            rate_limit_window_minutes: default_window_minutes(),
        }
    }

    /// Read the config from process environment variables.
    ///
    /// Missing URL or token are left empty here and reported by
    /// [`ConnectionConfig::validate`]; malformed numbers are reported now.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let config = Self {
            base_url: get(ENV_URL).unwrap_or_default(),
            token: get(ENV_TOKEN).unwrap_or_default(),
            verify_ssl: parse_bool(ENV_VERIFY_SSL, get(ENV_VERIFY_SSL), default_verify_ssl())?,
            timeout_seconds: parse_number(ENV_TIMEOUT, get(ENV_TIMEOUT), default_timeout())?,
            read_only_mode: parse_bool(ENV_READ_ONLY, get(ENV_READ_ONLY), false)?,
            rate_limit_enabled: parse_bool(
                ENV_RATE_LIMIT_ENABLED,
                get(ENV_RATE_LIMIT_ENABLED),
                false,
            )?,
            rate_limit_max_requests: parse_number(
                ENV_RATE_LIMIT_MAX,
                get(ENV_RATE_LIMIT_MAX),
                default_max_requests(),
            )?,
            rate_limit_window_minutes: parse_number(
                ENV_RATE_LIMIT_WINDOW,
                get(ENV_RATE_LIMIT_WINDOW),
                default_window_minutes(),
            )?,
        };

        debug!(config = ?config, "Connection config read from environment");
        Ok(config)
    }

    /// Check the invariants that must hold before any gateway call.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::config(format!("{} is not set", ENV_URL)));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::config(format!(
                "{} must start with http:// or https:// (got '{}')",
                ENV_URL, self.base_url
            )));
        }
        if self.token.trim().is_empty() {
            return Err(Error::config(format!("{} is not set", ENV_TOKEN)));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::config(format!("{} must be at least 1", ENV_TIMEOUT)));
        }
        if self.rate_limit_enabled {
            if self.rate_limit_max_requests < 1 {
                return Err(Error::config(format!("{} must be at least 1", ENV_RATE_LIMIT_MAX)));
            }
            if self.rate_limit_window_minutes < 1 {
                return Err(Error::config(format!(
                    "{} must be at least 1",
                    ENV_RATE_LIMIT_WINDOW
                )));
            }
        }
        Ok(())
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Length of the rate-limit window
    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(u64::from(self.rate_limit_window_minutes) * 60)
    }

    /// Base URL of the v0 REST API
    pub fn api_root(&self) -> String {
        format!("{}/api/v0", self.base_url.trim_end_matches('/'))
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("base_url", &self.base_url)
            .field("token", &"***")
            .field("verify_ssl", &self.verify_ssl)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("read_only_mode", &self.read_only_mode)
            .field("rate_limit_enabled", &self.rate_limit_enabled)
            .field("rate_limit_max_requests", &self.rate_limit_max_requests)
            .field("rate_limit_window_minutes", &self.rate_limit_window_minutes)
            .finish()
    }
}

fn parse_bool(key: &str, value: Option<String>, default: bool) -> Result<bool> {
    match value {
        None => Ok(default),
        Some(v) => match v.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            other => Err(Error::config(format!("{} must be a boolean (got '{}')", key, other))),
        },
    }
}

fn parse_number<T>(key: &str, value: Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
{
    match value {
        None => Ok(default),
        Some(v) => v
            .parse()
            .map_err(|_| Error::config(format!("{} must be a non-negative integer (got '{}')", key, v))),
    }
}

/// Load variables from the env file into the process environment.
///
/// Checks `LIBRENMS_ENV_FILE` first, then `.env` in the working directory.
/// Variables already present in the environment are never overridden.
/// Returns the path that was loaded, or None if no file was found.
pub fn load_environment() -> Option<String> {
    if let Ok(custom_path) = std::env::var(ENV_FILE_VAR) {
        if let Some(path) = try_load_env_file(&custom_path) {
            return Some(path);
        }
        warn!("Environment file {} not found", custom_path);
    }

    if let Some(path) = try_load_env_file(DEFAULT_ENV_FILE) {
        return Some(path);
    }

    debug!("No environment file found, using existing environment");
    None
}

fn try_load_env_file(path: &str) -> Option<String> {
    if !Path::new(path).exists() {
        return None;
    }

    match dotenvy::from_filename(path) {
        Ok(_) => {
            info!("Loaded environment from {}", path);
            Some(path.to_string())
        }
        Err(e) => {
            warn!("Failed to read environment file {}: {}", path, e);
            None
        }
    }
}
