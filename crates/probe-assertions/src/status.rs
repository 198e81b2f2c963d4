//! Status code assertions.

use crate::error::AssertionError;
use http::StatusCode;
use probe_core::{assertion, BoxedAssertion, ResponseView};

/// Checks that the response status equals `expected`.
///
/// ```rust
/// use probe_assertions::to_have_status;
///
/// let ok = to_have_status(200);
/// ```
pub fn to_have_status(expected: u16) -> BoxedAssertion {
    assertion(move |response: &mut ResponseView<'_>| {
        let actual = response.status().as_u16();
        if actual == expected {
            Ok(())
        } else {
            Err(AssertionError::Status { actual, expected }.into())
        }
    })
}

/// Checks that the response status equals `expected`.
pub fn to_have_status_code(expected: StatusCode) -> BoxedAssertion {
    to_have_status(expected.as_u16())
}

/// Checks that the response status is in the 2xx range.
pub fn to_be_success() -> BoxedAssertion {
    assertion(|response: &mut ResponseView<'_>| {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AssertionError::NotSuccess {
                actual: status.as_u16(),
            }
            .into())
        }
    })
}
