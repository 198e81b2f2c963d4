//! Header assertions.

use crate::combinators::assert_that;
use crate::error::AssertionError;
use probe_core::{assertion, BoxError, BoxedAssertion, ResponseView};

/// Passes the first value of header `name` to `handler`.
///
/// The handler receives `None` when the header is absent. A value that is
/// not visible ASCII fails before the handler runs.
pub fn with_header<F>(name: impl Into<String>, handler: F) -> BoxedAssertion
where
    F: Fn(Option<&str>) -> Result<(), BoxError> + Send + Sync + 'static,
{
    let name = name.into();
    assertion(move |response: &mut ResponseView<'_>| {
        let value = match response.header(&name) {
            Some(value) => Some(value.to_str().map_err(|e| {
                AssertionError::Header(format!("value of header '{name}' is not text: {e}").into())
            })?),
            None => None,
        };
        handler(value).map_err(|e| AssertionError::Header(e).into())
    })
}

/// Checks that header `name` is present with a non-empty value.
pub fn have_header(name: impl Into<String>) -> BoxedAssertion {
    let name = name.into();
    let message = format!("header with name '{name}' not found");
    with_header(name, move |value| {
        assert_that(value.is_some_and(|v| !v.is_empty()), message.clone())
    })
}
