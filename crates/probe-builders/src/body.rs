//! Request body helpers.

use crate::error::BuildError;
use bytes::Bytes;
use http::header::{self, HeaderValue};
use probe_core::{builder, Body, BoxedBuilder, Request};
use serde::Serialize;
use std::sync::Arc;

/// Returns a body with no bytes.
///
/// Equivalent to [`Body::empty`]; reads better inside a factory call.
#[must_use]
pub fn empty_body() -> Body {
    Body::empty()
}

/// Serializes `value` as a JSON body.
///
/// # Example
///
/// ```rust
/// use probe_builders::{post, serialize_json};
/// use serde_json::json;
///
/// let factory = post("http://localhost/users", serialize_json(&json!({"name": "Alice"})).unwrap());
/// ```
pub fn serialize_json<T>(value: &T) -> Result<Body, BuildError>
where
    T: Serialize + ?Sized,
{
    let bytes = serde_json::to_vec(value)?;
    Ok(Body::from(bytes))
}

/// Replaces the request body with `body`.
///
/// The bytes are shared, so the builder can be applied any number of times.
pub fn with_body(body: impl Into<Bytes>) -> BoxedBuilder {
    let body = body.into();
    builder(move |request: &mut Request| {
        request.set_body(body.clone());
        Ok(())
    })
}

/// Replaces the request body with `value` as JSON and sets `Content-Type`.
///
/// Serialization happens once, when the builder is created; a failure is
/// reported when the builder is applied.
pub fn with_json<T>(value: &T) -> BoxedBuilder
where
    T: Serialize + ?Sized,
{
    let encoded: Result<Bytes, Arc<serde_json::Error>> =
        serde_json::to_vec(value).map(Bytes::from).map_err(Arc::new);
    builder(move |request: &mut Request| {
        let body = encoded.clone().map_err(BuildError::Json)?;
        request.set_body(body);
        request.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        Ok(())
    })
}
