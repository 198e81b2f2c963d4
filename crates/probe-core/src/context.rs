//! Cancellation and deadline context carried by every request.
//!
//! The context is created together with the request and travels with it into
//! the executor, which must check it before dispatch and bound the call by the
//! remaining time.
//!
//! # Example
//!
//! ```rust
//! use probe_core::{CancelToken, RequestContext};
//! use std::time::Duration;
//!
//! let token = CancelToken::new();
//! let mut ctx = RequestContext::new().with_timeout(Duration::from_secs(5));
//! ctx.set_cancel_token(token.clone());
//! assert!(ctx.check().is_ok());
//!
//! token.cancel();
//! assert!(ctx.check().is_err());
//! ```

use crate::error::ContextError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A shareable cancellation flag.
///
/// Clones observe the same flag. Cancelling is idempotent.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the token and every clone of it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns `true` if the token has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Deadline and cancellation state of a single request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancel: CancelToken,
}

impl RequestContext {
    /// Creates a context with no deadline and a fresh cancel token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the deadline to `deadline`.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the deadline to `timeout` from now.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.set_timeout(timeout);
        self
    }

    /// Replaces the deadline.
    pub fn set_deadline(&mut self, deadline: Option<Instant>) {
        self.deadline = deadline;
    }

    /// Sets the deadline to `timeout` from now.
    ///
    /// A timeout too large to be represented leaves the request without a deadline.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.deadline = Instant::now().checked_add(timeout);
    }

    /// Replaces the cancel token.
    pub fn set_cancel_token(&mut self, token: CancelToken) {
        self.cancel = token;
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns the cancel token.
    #[must_use]
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Checks that the request may still be dispatched.
    ///
    /// Cancellation takes precedence over an expired deadline.
    pub fn check(&self) -> Result<(), ContextError> {
        if self.cancel.is_cancelled() {
            return Err(ContextError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if deadline <= Instant::now() => Err(ContextError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Returns the time left before the deadline, or `None` without one.
    pub fn remaining(&self) -> Result<Option<Duration>, ContextError> {
        self.check()?;
        Ok(self
            .deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now())))
    }
}
