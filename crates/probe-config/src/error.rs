//! Errors raised while loading and validating a [`ProbeConfig`](crate::ProbeConfig).

use std::path::PathBuf;
use thiserror::Error;

/// Why a configuration could not be produced.
///
/// Source errors from `toml`, `serde_json` and `dotenvy` are kept so callers
/// can report the exact line that failed.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `with_file` was given a path that does not exist.
    #[error("config file {path} does not exist")]
    NotFound {
        /// The requested path.
        path: PathBuf,
    },

    /// The file exists but reading it failed.
    #[error("cannot read config file {path}")]
    Read {
        /// The file being read.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid TOML for [`ProbeConfig`](crate::ProbeConfig).
    #[error("invalid toml config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The document is not valid JSON for [`ProbeConfig`](crate::ProbeConfig).
    #[error("invalid json config: {0}")]
    Json(#[from] serde_json::Error),

    /// The format name was neither `toml` nor `json`.
    #[error("config format {0:?} is not toml or json")]
    Format(String),

    /// A `.env` file exists but is malformed.
    #[error("cannot load .env: {0}")]
    Dotenv(#[from] dotenvy::Error),

    /// A loaded value failed validation.
    #[error("{key} is invalid: {reason}")]
    Invalid {
        /// Dotted key such as `client.timeout_ms`.
        key: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A `PREFIX__SECTION__KEY` variable could not be applied.
    #[error("environment variable {name}: {reason}")]
    EnvVar {
        /// Full variable name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn env_var(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvVar {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_missing_file_names_path() {
        let err = ConfigError::not_found("ci/probe.toml");
        assert_eq!(err.to_string(), "config file ci/probe.toml does not exist");
    }

    #[test]
    fn test_read_keeps_io_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ConfigError::read("probe.toml", io);
        assert_eq!(err.to_string(), "cannot read config file probe.toml");
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("denied"));
    }

    #[test]
    fn test_invalid_key_message() {
        let err = ConfigError::invalid("client.max_redirects", "must be at least 1 when following redirects");
        assert_eq!(
            err.to_string(),
            "client.max_redirects is invalid: must be at least 1 when following redirects"
        );
    }

    #[test]
    fn test_env_var_message() {
        let err = ConfigError::env_var("PROBE__CLIENT__COOKIE_STORE", "expected boolean");
        assert_eq!(
            err.to_string(),
            "environment variable PROBE__CLIENT__COOKIE_STORE: expected boolean"
        );
    }

    #[test]
    fn test_unknown_format_is_quoted() {
        assert_eq!(
            ConfigError::Format("yaml".into()).to_string(),
            "config format \"yaml\" is not toml or json"
        );
    }
}
