//! Applies assertions to a captured response.

use crate::assertion::Assertion;
use crate::buffer::BufferedResponse;
use crate::error::{BoxError, ProbeError};
use crate::reporter::Reporter;

/// Runs assertions in order against one captured response.
///
/// Every assertion runs, whatever the outcome of the previous ones; each
/// failure is recorded with the reporter as it happens.
#[derive(Debug, Clone, Copy)]
pub struct AssertionRunner<'a> {
    response: &'a BufferedResponse,
}

impl<'a> AssertionRunner<'a> {
    /// Creates a runner over `response`.
    #[must_use]
    pub fn new(response: &'a BufferedResponse) -> Self {
        Self { response }
    }

    /// Runs a single assertion against a fresh view.
    pub fn check<A>(&self, assertion: &A) -> Result<(), BoxError>
    where
        A: Assertion + ?Sized,
    {
        let mut view = self.response.view();
        assertion.check(&mut view)
    }

    /// Runs every assertion and returns how many failed.
    pub fn run<R, I>(&self, reporter: &mut R, assertions: I) -> usize
    where
        R: Reporter + ?Sized,
        I: IntoIterator,
        I::Item: Assertion,
    {
        let mut failed = 0;
        for (index, assertion) in assertions.into_iter().enumerate() {
            match self.check(&assertion) {
                Ok(()) => tracing::trace!(index, "Assertion passed"),
                Err(source) => {
                    let error = ProbeError::Assertion(source);
                    tracing::debug!(index, error = %error, "Assertion failed");
                    reporter.record_failure(&error.to_string());
                    failed += 1;
                }
            }
        }
        failed
    }
}
