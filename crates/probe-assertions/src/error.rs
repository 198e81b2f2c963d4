//! Assertion failure types.

use probe_core::BoxError;
use std::fmt;
use std::io;
use thiserror::Error;

/// Failure reported by one of the assertions of this crate.
///
/// Each variant carries a stable prefix naming the kind of check that failed.
#[derive(Error, Debug)]
pub enum AssertionError {
    /// The response status differs from the expected one.
    #[error("status: returned status ({actual}) not equal to expected status ({expected})")]
    Status {
        /// Status code of the response.
        actual: u16,
        /// Status code the assertion expected.
        expected: u16,
    },

    /// The response status is outside the 2xx range.
    #[error("status: returned status ({actual}) is not a success")]
    NotSuccess {
        /// Status code of the response.
        actual: u16,
    },

    /// A header handler rejected the response.
    #[error("header: {0}")]
    Header(#[source] BoxError),

    /// A cookie handler rejected the response.
    #[error("cookie: {0}")]
    Cookie(#[source] BoxError),

    /// The body could not be read.
    #[error("body: failed to read response body: {0}")]
    BodyRead(#[source] io::Error),

    /// A body handler rejected the response.
    #[error("body: {0}")]
    Body(#[source] BoxError),

    /// The body is not valid JSON for the expected type.
    #[error("json: failed to decode response body: {0}")]
    JsonDecode(#[source] serde_json::Error),

    /// A JSON handler rejected the decoded value.
    #[error("json: {0}")]
    Json(#[source] BoxError),
}

/// Several failures combined by [`multiple`](crate::multiple).
#[derive(Debug)]
pub struct MultipleErrors {
    messages: Vec<String>,
}

impl MultipleErrors {
    pub(crate) fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    /// Returns the combined messages, in order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl fmt::Display for MultipleErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("multiple errors: \n")?;
        for message in &self.messages {
            writeln!(f, "- {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for MultipleErrors {}
