//! Dashboard configuration parsed from environment variables.

use std::collections::HashMap;
use std::env::VarError;
use std::time::Duration;

use crate::page::CreatePolicy;

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000/v1/";

pub const ENV_API_BASE_URL: &str = "BACKOFFICE_API_BASE_URL";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "BACKOFFICE_REQUEST_TIMEOUT_SECS";
pub const ENV_CREATE_POLICY: &str = "BACKOFFICE_CREATE_POLICY";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive number of seconds, got `{value}`")]
    InvalidTimeout { var: &'static str, value: String },
    #[error("{var}: unsupported create policy `{value}` (expected `append` or `append_then_reload`)")]
    InvalidCreatePolicy { var: &'static str, value: String },
    #[error("{var} must not be blank")]
    BlankBaseUrl { var: &'static str },
    #[error("{var} is set but is not valid UTF-8")]
    NotUnicode { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout: Option<Duration>,
    pub create_policy: CreatePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout: None,
            create_policy: CreatePolicy::Append,
        }
    }
}

impl Config {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `BACKOFFICE_API_BASE_URL`: default `http://127.0.0.1:5000/v1/`
    /// - `BACKOFFICE_REQUEST_TIMEOUT_SECS`: no timeout when absent
    /// - `BACKOFFICE_CREATE_POLICY`: `append` (default) or `append_then_reload`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut vars = HashMap::new();
        for key in [ENV_API_BASE_URL, ENV_REQUEST_TIMEOUT_SECS, ENV_CREATE_POLICY] {
            if let Some(value) = env_var(key)? {
                vars.insert(key, value);
            }
        }
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Same as [`Config::from_env`] with an explicit variable source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url = match lookup(ENV_API_BASE_URL) {
            Some(raw) if raw.trim().is_empty() => {
                return Err(ConfigError::BlankBaseUrl { var: ENV_API_BASE_URL });
            }
            Some(raw) => raw.trim().to_owned(),
            None => DEFAULT_API_BASE_URL.to_owned(),
        };
        let request_timeout = parse_timeout(lookup(ENV_REQUEST_TIMEOUT_SECS).as_deref())?;
        let create_policy = parse_create_policy(lookup(ENV_CREATE_POLICY).as_deref())?;
        Ok(Self { api_base_url, request_timeout, create_policy })
    }
}

/// Read one variable. Unset is `None`; a value that is not UTF-8 is an
/// error rather than silently unset.
fn env_var(key: &'static str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { var: key }),
    }
}

fn parse_timeout(raw: Option<&str>) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(ConfigError::InvalidTimeout { var: ENV_REQUEST_TIMEOUT_SECS, value: raw.to_owned() }),
    }
}

/// Parse a create policy name. Absent means [`CreatePolicy::Append`].
///
/// # Errors
///
/// Returns [`ConfigError::InvalidCreatePolicy`] for unknown names.
pub fn parse_create_policy(raw: Option<&str>) -> Result<CreatePolicy, ConfigError> {
    match raw.map(str::trim).unwrap_or("append") {
        "" | "append" => Ok(CreatePolicy::Append),
        "append_then_reload" => Ok(CreatePolicy::AppendThenReload),
        other => Err(ConfigError::InvalidCreatePolicy { var: ENV_CREATE_POLICY, value: other.to_owned() }),
    }
}
