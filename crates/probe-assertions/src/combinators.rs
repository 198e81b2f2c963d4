//! Helpers for writing compact assertion handlers.

use crate::error::MultipleErrors;
use probe_core::BoxError;

/// Fails with `message` unless `condition` holds.
///
/// ```rust
/// use probe_assertions::assert_that;
///
/// assert!(assert_that(1 + 1 == 2, "math is broken").is_ok());
/// assert_eq!(assert_that(false, "id is missing").unwrap_err().to_string(), "id is missing");
/// ```
pub fn assert_that(condition: bool, message: impl Into<String>) -> Result<(), BoxError> {
    if condition {
        Ok(())
    } else {
        Err(message.into().into())
    }
}

/// Combines several check results into one.
///
/// Passes when every result passes. A single failure becomes its message
/// followed by a newline; two or more are combined into a [`MultipleErrors`]
/// listing each message.
///
/// ```rust
/// use probe_assertions::{assert_that, multiple};
///
/// let err = multiple([
///     assert_that(false, "name is empty"),
///     assert_that(true, "unused"),
///     assert_that(false, "age is negative"),
/// ])
/// .unwrap_err();
///
/// assert_eq!(err.to_string(), "multiple errors: \n- name is empty\n- age is negative\n");
/// ```
pub fn multiple<I>(results: I) -> Result<(), BoxError>
where
    I: IntoIterator<Item = Result<(), BoxError>>,
{
    let mut failures: Vec<BoxError> = results.into_iter().filter_map(Result::err).collect();
    match failures.len() {
        0 => Ok(()),
        1 => Err(format!("{}\n", failures.remove(0)).into()),
        _ => Err(Box::new(MultipleErrors::new(
            failures.iter().map(ToString::to_string).collect(),
        ))),
    }
}
