//! Error types for Probe.
//!
//! This module provides [`ProbeError`], the error surfaced by a pipeline run,
//! together with the narrower errors raised while constructing a request or
//! checking its context.
//!
//! # Categories
//!
//! Every [`ProbeError`] belongs to exactly one [`ErrorCategory`]:
//!
//! | `ErrorCategory` | Raised by | Effect on the run |
//! |---|---|---|
//! | `Construction` | factory, request builders | abort |
//! | `Execution` | executor, body capture | abort |
//! | `Assertion` | a single assertion | recorded, run continues |

use crate::pipeline::Stage;
use std::io;
use thiserror::Error;

/// Type-erased error returned by factories, builders, executors and assertions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias using [`ProbeError`].
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Failure classes of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The request could not be created or customised.
    Construction,
    /// The request could not be executed or its body could not be captured.
    Execution,
    /// A check against the captured response did not hold.
    Assertion,
}

impl ErrorCategory {
    /// Returns `true` if errors of this category abort the run.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Construction | Self::Execution)
    }
}

/// Error surfaced by a pipeline run.
///
/// The `Display` output of each variant is the exact message handed to
/// [`Reporter::record_failure`](crate::Reporter::record_failure).
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The request factory failed.
    #[error("failed to create request: {0}")]
    Factory(#[source] BoxError),

    /// A request builder failed.
    #[error("builder: {0}")]
    Builder(#[source] BoxError),

    /// The executor failed to produce a response.
    #[error("failed to execute request: {0}")]
    Execution(#[source] BoxError),

    /// The response body could not be read to completion.
    #[error("failed to read response body: {0}")]
    BodyRead(#[source] io::Error),

    /// The response body was read but releasing it failed.
    #[error("failed to close response body: {0}")]
    BodyClose(#[source] io::Error),

    /// An assertion reported a failure.
    #[error("assertion: {0}")]
    Assertion(#[source] BoxError),
}

impl ProbeError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Factory(_) | Self::Builder(_) => ErrorCategory::Construction,
            Self::Execution(_) | Self::BodyRead(_) | Self::BodyClose(_) => {
                ErrorCategory::Execution
            }
            Self::Assertion(_) => ErrorCategory::Assertion,
        }
    }

    /// Returns the pipeline stage this error was raised in.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Factory(_) | Self::Builder(_) => Stage::Building,
            Self::Execution(_) => Stage::Executing,
            Self::BodyRead(_) | Self::BodyClose(_) => Stage::Buffering,
            Self::Assertion(_) => Stage::Asserting,
        }
    }

    /// Returns `true` if this error aborts the run.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        self.category().is_fatal()
    }
}

/// Errors raised by [`Request::new`](crate::Request::new).
#[derive(Error, Debug)]
pub enum ConstructionError {
    /// The method is not a valid HTTP token.
    #[error("invalid method {method:?}: {source}")]
    InvalidMethod {
        /// The rejected method.
        method: String,
        /// Underlying parse error.
        #[source]
        source: http::method::InvalidMethod,
    },

    /// The target could not be parsed as a URI.
    #[error("invalid url {url:?}: {source}")]
    InvalidUri {
        /// The rejected target.
        url: String,
        /// Underlying parse error.
        #[source]
        source: http::uri::InvalidUri,
    },
}

/// Errors raised when a request's context no longer permits dispatch.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    /// The request's cancel token was triggered.
    #[error("request cancelled")]
    Cancelled,

    /// The request's deadline has passed.
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_mapping() {
        assert_eq!(
            ProbeError::Factory("x".into()).category(),
            ErrorCategory::Construction
        );
        assert_eq!(
            ProbeError::Builder("x".into()).category(),
            ErrorCategory::Construction
        );
        assert_eq!(
            ProbeError::Execution("x".into()).category(),
            ErrorCategory::Execution
        );
        assert_eq!(
            ProbeError::BodyRead(io::Error::other("x")).category(),
            ErrorCategory::Execution
        );
        assert_eq!(
            ProbeError::BodyClose(io::Error::other("x")).category(),
            ErrorCategory::Execution
        );
        assert_eq!(
            ProbeError::Assertion("x".into()).category(),
            ErrorCategory::Assertion
        );
    }

    #[test]
    fn test_fatality() {
        assert!(ErrorCategory::Construction.is_fatal());
        assert!(ErrorCategory::Execution.is_fatal());
        assert!(!ErrorCategory::Assertion.is_fatal());
        assert!(!ProbeError::Assertion("x".into()).is_fatal());
    }

    #[test]
    fn test_stage_mapping() {
        assert_eq!(ProbeError::Builder("x".into()).stage(), Stage::Building);
        assert_eq!(ProbeError::Execution("x".into()).stage(), Stage::Executing);
        assert_eq!(
            ProbeError::BodyRead(io::Error::other("x")).stage(),
            Stage::Buffering
        );
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ProbeError::Builder("bad header".into()).to_string(),
            "builder: bad header"
        );
        assert_eq!(
            ProbeError::Execution("connection refused".into()).to_string(),
            "failed to execute request: connection refused"
        );
        assert_eq!(
            ProbeError::Assertion("mismatch".into()).to_string(),
            "assertion: mismatch"
        );
        assert_eq!(ContextError::Cancelled.to_string(), "request cancelled");
    }
}
