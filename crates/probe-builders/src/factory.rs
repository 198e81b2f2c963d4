//! Request factory shorthands.
//!
//! Each function returns a [`NewRequest`] factory; the method and URL are only
//! parsed when the pipeline runs it, so a malformed URL surfaces as a
//! construction failure of the run instead of a panic at the call site.

use probe_core::{Body, NewRequest};

pub use probe_core::new_request;

/// Factory for a `GET` request without a body.
pub fn get(url: impl Into<String>) -> NewRequest {
    NewRequest::new("GET", url, Body::empty())
}

/// Factory for a `HEAD` request without a body.
pub fn head(url: impl Into<String>) -> NewRequest {
    NewRequest::new("HEAD", url, Body::empty())
}

/// Factory for a `DELETE` request without a body.
pub fn delete(url: impl Into<String>) -> NewRequest {
    NewRequest::new("DELETE", url, Body::empty())
}

/// Factory for a `POST` request.
pub fn post(url: impl Into<String>, body: impl Into<Body>) -> NewRequest {
    NewRequest::new("POST", url, body.into())
}

/// Factory for a `PUT` request.
pub fn put(url: impl Into<String>, body: impl Into<Body>) -> NewRequest {
    NewRequest::new("PUT", url, body.into())
}

/// Factory for a `PATCH` request.
pub fn patch(url: impl Into<String>, body: impl Into<Body>) -> NewRequest {
    NewRequest::new("PATCH", url, body.into())
}
