//! Assertions.

use crate::buffer::ResponseView;
use crate::error::BoxError;

/// Checks a captured response.
///
/// Each invocation receives its own [`ResponseView`] positioned at the start
/// of the body; an assertion may read as much of it as it likes without
/// affecting any other assertion.
///
/// Any `Fn(&mut ResponseView<'_>) -> Result<(), BoxError>` is an assertion.
pub trait Assertion {
    /// Runs the check, returning the failure if it does not hold.
    fn check(&self, response: &mut ResponseView<'_>) -> Result<(), BoxError>;
}

impl<F> Assertion for F
where
    F: Fn(&mut ResponseView<'_>) -> Result<(), BoxError>,
{
    fn check(&self, response: &mut ResponseView<'_>) -> Result<(), BoxError> {
        self(response)
    }
}

/// A type-erased assertion, so assertions of different kinds can share a list.
pub type BoxedAssertion = Box<dyn Fn(&mut ResponseView<'_>) -> Result<(), BoxError> + Send + Sync>;

/// Boxes a closure as a [`BoxedAssertion`].
pub fn assertion<F>(f: F) -> BoxedAssertion
where
    F: Fn(&mut ResponseView<'_>) -> Result<(), BoxError> + Send + Sync + 'static,
{
    Box::new(f)
}
