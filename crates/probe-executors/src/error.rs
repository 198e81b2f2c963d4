//! Executor error types.

use probe_core::ContextError;
use thiserror::Error;

/// Errors raised by the executors in this crate.
///
/// The pipeline reports each of them as an execution failure.
#[derive(Error, Debug)]
pub enum ExecutorError {
    /// The HTTP client could not be built.
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The request could not be sent or its response head received.
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    /// The host override is not a valid header value.
    #[error("invalid host override {0:?}")]
    InvalidHost(String),

    /// The runtime driving an async handler could not be started.
    #[error("failed to start handler runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The request was cancelled or its deadline passed.
    #[error(transparent)]
    Context(#[from] ContextError),
}

impl ExecutorError {
    /// Returns `true` if the failure was a timeout, either the request's own
    /// deadline or the client's.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout(),
            Self::Context(e) => *e == ContextError::DeadlineExceeded,
            Self::ClientBuild(_) | Self::InvalidHost(_) | Self::Runtime(_) => false,
        }
    }
}
