//! Body assertions.
//!
//! Each assertion reads the body through its own view, so several body
//! assertions on one response all see the complete body.

use crate::error::AssertionError;
use probe_core::{assertion, BoxError, BoxedAssertion, ResponseView};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;

fn read_all(response: &mut ResponseView<'_>) -> Result<Vec<u8>, AssertionError> {
    let mut body = Vec::with_capacity(response.remaining());
    response
        .read_to_end(&mut body)
        .map_err(AssertionError::BodyRead)?;
    Ok(body)
}

/// Passes the raw body to `handler`.
pub fn body_bytes<F>(handler: F) -> BoxedAssertion
where
    F: Fn(&[u8]) -> Result<(), BoxError> + Send + Sync + 'static,
{
    assertion(move |response: &mut ResponseView<'_>| {
        let body = read_all(response)?;
        handler(&body).map_err(|e| AssertionError::Body(e).into())
    })
}

/// Passes the body as UTF-8 text to `handler`.
pub fn body_text<F>(handler: F) -> BoxedAssertion
where
    F: Fn(&str) -> Result<(), BoxError> + Send + Sync + 'static,
{
    assertion(move |response: &mut ResponseView<'_>| {
        let body = read_all(response)?;
        let text = std::str::from_utf8(&body).map_err(|e| AssertionError::Body(Box::new(e)))?;
        handler(text).map_err(|e| AssertionError::Body(e).into())
    })
}

/// Checks that the body is empty.
pub fn body_empty() -> BoxedAssertion {
    assertion(|response: &mut ResponseView<'_>| {
        let body = read_all(response)?;
        if body.is_empty() {
            Ok(())
        } else {
            Err(AssertionError::Body(format!("expected empty body, got {} bytes", body.len()).into()).into())
        }
    })
}

/// Decodes the body as JSON into `T` and passes it to `handler`.
///
/// Only the first JSON value is decoded. Anything after it is ignored, so a
/// stream of newline-delimited documents checks its first document.
///
/// The target type is the handler's argument type:
///
/// ```rust
/// use probe_assertions::{assert_that, body_json};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct User {
///     name: String,
/// }
///
/// let check = body_json(|user: User| assert_that(!user.name.is_empty(), "name is empty"));
/// ```
pub fn body_json<T, F>(handler: F) -> BoxedAssertion
where
    T: DeserializeOwned + 'static,
    F: Fn(T) -> Result<(), BoxError> + Send + Sync + 'static,
{
    assertion(move |response: &mut ResponseView<'_>| {
        let mut decoder = serde_json::Deserializer::from_reader(response);
        let value = T::deserialize(&mut decoder).map_err(AssertionError::JsonDecode)?;
        handler(value).map_err(|e| AssertionError::Json(e).into())
    })
}
