//! Main configuration type.

use serde::{Deserialize, Serialize};

use crate::{ClientConfig, ConfigError, LogFormat, LoggingConfig};

/// Most redirects a client may be configured to follow.
pub const MAX_REDIRECT_LIMIT: usize = 100;

/// Complete Probe configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use probe_config::ProbeConfig;
///
/// let config = ProbeConfig::default();
/// assert_eq!(config.client.max_redirects, 10);
/// assert_eq!(config.logging.level, "info");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    /// HTTP client configuration.
    #[serde(default)]
    pub client: ClientConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ProbeConfig {
    /// Preset for local runs: debug logging, pretty output with locations.
    #[must_use]
    pub fn development() -> Self {
        Self {
            client: ClientConfig::default(),
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
                include_location: true,
                ..LoggingConfig::default()
            },
        }
    }

    /// Preset for CI runs: JSON logs, no redirects, tighter timeout.
    #[must_use]
    pub fn ci() -> Self {
        Self {
            client: ClientConfig {
                timeout_ms: Some(10_000),
                follow_redirects: false,
                ..ClientConfig::default()
            },
            logging: LoggingConfig {
                format: LogFormat::Json,
                ..LoggingConfig::default()
            },
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `client.timeout_ms` is zero
    /// - `client.max_redirects` exceeds [`MAX_REDIRECT_LIMIT`] while redirects are followed
    /// - `logging.level` is not a valid filter directive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client.timeout_ms == Some(0) {
            return Err(ConfigError::invalid(
                "client.timeout_ms",
                "must be greater than zero",
            ));
        }

        if self.client.follow_redirects && self.client.max_redirects > MAX_REDIRECT_LIMIT {
            return Err(ConfigError::invalid(
                "client.max_redirects",
                format!("must be at most {MAX_REDIRECT_LIMIT}"),
            ));
        }

        if let Some(agent) = &self.client.user_agent {
            if agent.chars().any(char::is_control) {
                return Err(ConfigError::invalid(
                    "client.user_agent",
                    "must not contain control characters",
                ));
            }
        }

        if self.logging.enabled {
            probe_telemetry::create_env_filter(&self.logging.level)
                .map_err(|e| ConfigError::invalid("logging.level", e.to_string()))?;
        }

        Ok(())
    }
}
