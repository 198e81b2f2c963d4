//! Configuration schema types.
//!
//! This module defines the structure of all configuration sections.

use probe_telemetry::LogConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP client section, used to build the real-network executor.
///
/// # Example
///
/// ```
/// use probe_config::ClientConfig;
///
/// let config = ClientConfig {
///     timeout_ms: Some(5_000),
///     follow_redirects: false,
///     ..Default::default()
/// };
/// assert_eq!(config.timeout().map(|t| t.as_secs()), Some(5));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Total request timeout in milliseconds. `None` disables the timeout.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: Option<u64>,

    /// Follow redirect responses.
    #[serde(default = "default_true")]
    pub follow_redirects: bool,

    /// Maximum redirects followed when `follow_redirects` is set.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Keep cookies set by responses and send them on later requests.
    #[serde(default)]
    pub cookie_store: bool,

    /// `User-Agent` sent when a request does not set one.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            follow_redirects: true,
            max_redirects: default_max_redirects(),
            cookie_store: false,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Returns the timeout as a duration.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[allow(clippy::unnecessary_wraps)]
fn default_timeout_ms() -> Option<u64> {
    Some(30_000)
}

fn default_max_redirects() -> usize {
    10
}

fn default_true() -> bool {
    true
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable pretty format (local runs).
    #[default]
    Pretty,
    /// JSON formatted logs (CI).
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive (e.g. "info" or "probe_core=debug").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl From<&LoggingConfig> for LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            enabled: config.enabled,
            level: config.level.clone(),
            json_format: config.format == LogFormat::Json,
            file_line_info: config.include_location,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_ms, Some(30_000));
        assert!(config.follow_redirects);
        assert_eq!(config.max_redirects, 10);
        assert!(!config.cookie_store);
        assert_eq!(config.user_agent, None);
    }

    #[test]
    fn test_client_config_partial_deserialize() {
        let config: ClientConfig = serde_json::from_str(r#"{"cookie_store": true}"#).unwrap();
        assert!(config.cookie_store);
        assert_eq!(config.timeout_ms, Some(30_000));
    }

    #[test]
    fn test_client_config_null_timeout() {
        let config: ClientConfig = serde_json::from_str(r#"{"timeout_ms": null}"#).unwrap();
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_client_config_rejects_unknown_field() {
        let result: Result<ClientConfig, _> = serde_json::from_str(r#"{"retries": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_format_deserialize() {
        let format: LogFormat = serde_json::from_str(r#""json""#).unwrap();
        assert_eq!(format, LogFormat::Json);

        let format: LogFormat = serde_json::from_str(r#""pretty""#).unwrap();
        assert_eq!(format, LogFormat::Pretty);
    }

    #[test]
    fn test_logging_config_into_log_config() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: LogFormat::Json,
            include_location: true,
            ..Default::default()
        };
        let log = LogConfig::from(&config);
        assert!(log.enabled);
        assert_eq!(log.level, "debug");
        assert!(log.json_format);
        assert!(log.file_line_info);
    }
}
