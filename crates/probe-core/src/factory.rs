//! Request factories.

use crate::error::BoxError;
use crate::request::{Body, Request};

/// Produces the initial request of a pipeline run.
///
/// A factory is consumed by [`create`](Self::create), so it runs exactly once
/// per run. Closures returning `Result<Request, BoxError>` are factories, and
/// so is an already-built [`Request`].
pub trait RequestFactory {
    /// Creates the request.
    fn create(self) -> Result<Request, BoxError>;
}

impl<F> RequestFactory for F
where
    F: FnOnce() -> Result<Request, BoxError>,
{
    fn create(self) -> Result<Request, BoxError> {
        self()
    }
}

impl RequestFactory for Request {
    fn create(self) -> Result<Request, BoxError> {
        Ok(self)
    }
}

/// Factory built from a method token, a target URL and a body.
#[derive(Debug)]
pub struct NewRequest {
    method: String,
    url: String,
    body: Body,
}

impl NewRequest {
    /// Creates the factory; parsing is deferred to [`create`](RequestFactory::create).
    pub fn new(method: impl Into<String>, url: impl Into<String>, body: Body) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            body,
        }
    }
}

impl RequestFactory for NewRequest {
    fn create(self) -> Result<Request, BoxError> {
        Ok(Request::new(&self.method, &self.url, self.body)?)
    }
}

/// Shorthand for [`NewRequest::new`].
pub fn new_request(method: impl Into<String>, url: impl Into<String>, body: Body) -> NewRequest {
    NewRequest::new(method, url, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConstructionError;

    #[test]
    fn test_new_request_factory() {
        let request = new_request("PUT", "/items/1", Body::from("x")).create().unwrap();
        assert_eq!(request.method(), "PUT");
        assert_eq!(request.body().len_hint(), Some(1));
    }

    #[test]
    fn test_new_request_factory_rejects_bad_method() {
        let err = new_request("NOT VALID", "/", Body::empty()).create().unwrap_err();
        assert!(err.downcast_ref::<ConstructionError>().is_some());
    }

    #[test]
    fn test_closure_factory() {
        let factory = || -> Result<Request, BoxError> {
            Ok(Request::new("DELETE", "/items/1", Body::empty())?)
        };
        assert_eq!(factory.create().unwrap().method(), "DELETE");
    }

    #[test]
    fn test_request_is_its_own_factory() {
        let request = Request::new("GET", "/", Body::empty()).unwrap();
        assert_eq!(request.create().unwrap().uri().path(), "/");
    }
}
