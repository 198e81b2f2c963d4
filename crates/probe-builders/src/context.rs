//! Deadline and cancellation builders.

use probe_core::{builder, BoxedBuilder, CancelToken, Request};
use std::time::{Duration, Instant};

/// Bounds the request by `timeout`, measured from when the builder runs.
pub fn with_timeout(timeout: Duration) -> BoxedBuilder {
    builder(move |request: &mut Request| {
        request.context_mut().set_timeout(timeout);
        Ok(())
    })
}

/// Bounds the request by an absolute `deadline`.
pub fn with_deadline(deadline: Instant) -> BoxedBuilder {
    builder(move |request: &mut Request| {
        request.context_mut().set_deadline(Some(deadline));
        Ok(())
    })
}

/// Ties the request to `token`; cancelling it fails the execution.
pub fn with_cancel_token(token: CancelToken) -> BoxedBuilder {
    builder(move |request: &mut Request| {
        request.context_mut().set_cancel_token(token.clone());
        Ok(())
    })
}
