//! Errors raised while building requests and URLs.

use std::sync::Arc;
use thiserror::Error;

/// Errors produced by the builders and helpers of this crate.
#[derive(Error, Debug)]
pub enum BuildError {
    /// A header name is not a valid HTTP token.
    #[error("invalid header name {name:?}: {source}")]
    InvalidHeaderName {
        /// The rejected name.
        name: String,
        /// Underlying parse error.
        #[source]
        source: http::header::InvalidHeaderName,
    },

    /// A header value contains bytes not allowed in a header.
    #[error("invalid value for header {name:?}: {source}")]
    InvalidHeaderValue {
        /// The header the value was meant for.
        name: String,
        /// Underlying parse error.
        #[source]
        source: http::header::InvalidHeaderValue,
    },

    /// A value could not be serialized as JSON.
    ///
    /// Shared so a builder holding the failure can report it on every apply.
    #[error("failed to serialize json: {0}")]
    Json(#[source] Arc<serde_json::Error>),

    /// A URL could not be parsed.
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// A URL option cannot apply to the URL it was given.
    #[error("cannot set {part} on url {url:?}")]
    UrlPart {
        /// The part that could not be set.
        part: &'static str,
        /// The URL at the time.
        url: String,
    },
}

impl From<serde_json::Error> for BuildError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(Arc::new(err))
    }
}
