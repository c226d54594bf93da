//! Process configuration, read once from the environment at startup.

use std::str::FromStr;
use std::time::Duration;

use erpreport_reporting::{DocumentFailurePolicy, UnknownPolicy};
use erpreport_upstream::{UpstreamConfig, Url};
use thiserror::Error;

pub const HOST_VAR: &str = "REPORTING_HOST";
pub const PORT_VAR: &str = "REPORTING_PORT";
pub const FINANCE_URL_VAR: &str = "FINANCE_SERVICE_URL";
pub const HR_URL_VAR: &str = "HR_SERVICE_URL";
pub const INVENTORY_URL_VAR: &str = "INVENTORY_SERVICE_URL";
pub const TIMEOUT_VAR: &str = "UPSTREAM_TIMEOUT_MS";
pub const DOCUMENT_POLICY_VAR: &str = "DOCUMENT_FAILURE_POLICY";
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_FINANCE_URL: &str = "http://localhost:5001";
const DEFAULT_HR_URL: &str = "http://localhost:5002";
const DEFAULT_INVENTORY_URL: &str = "http://localhost:5003";
const DEFAULT_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid port {0:?}: must be a number between 1 and 65535")]
    InvalidPort(String),

    #[error("{var} is not a valid URL ({value:?}): {message}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        message: String,
    },

    #[error("{var} must use http:// ({value:?})")]
    UnsupportedScheme { var: &'static str, value: String },

    #[error("invalid upstream timeout {0:?}: must be a positive number of milliseconds")]
    InvalidTimeout(String),

    #[error("host must not be empty")]
    EmptyHost,

    #[error(transparent)]
    Policy(#[from] UnknownPolicy),

    #[error("unknown log format {0:?}: expected \"json\" or \"pretty\"")]
    UnknownLogFormat(String),
}

/// How log lines are written to stdout.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event, filtered by `RUST_LOG`.
    #[default]
    Json,
    /// Human-readable lines at `debug`, for local runs.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(ConfigError::UnknownLogFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub upstreams: UpstreamConfig,
    pub document_failure_policy: DocumentFailurePolicy,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup(HOST_VAR).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup(PORT_VAR) {
            Some(raw) => match raw.trim().parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(ConfigError::InvalidPort(raw)),
            },
            None => DEFAULT_PORT,
        };

        let timeout_ms = match lookup(TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => DEFAULT_TIMEOUT_MS,
        };

        let document_failure_policy = match lookup(DOCUMENT_POLICY_VAR) {
            Some(raw) => raw.parse()?,
            None => DocumentFailurePolicy::default(),
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        let upstreams = UpstreamConfig {
            finance_url: base_url(&lookup, FINANCE_URL_VAR, DEFAULT_FINANCE_URL)?,
            hr_url: base_url(&lookup, HR_URL_VAR, DEFAULT_HR_URL)?,
            inventory_url: base_url(&lookup, INVENTORY_URL_VAR, DEFAULT_INVENTORY_URL)?,
            timeout: Duration::from_millis(timeout_ms),
        };

        let config = Self {
            host,
            port,
            upstreams,
            document_failure_policy,
            log_format,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port.to_string()));
        }
        if self.upstreams.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout("0".to_string()));
        }
        Ok(())
    }

    /// `host:port` as passed to the listener.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn base_url(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: &str,
) -> Result<Url, ConfigError> {
    let value = lookup(var).unwrap_or_else(|| default.to_string());
    let url = Url::parse(value.trim()).map_err(|e| ConfigError::InvalidUrl {
        var,
        value: value.clone(),
        message: e.to_string(),
    })?;

    // The HTTP client is built without TLS support.
    if url.scheme() != "http" {
        return Err(ConfigError::UnsupportedScheme { var, value });
    }
    Ok(url)
}
