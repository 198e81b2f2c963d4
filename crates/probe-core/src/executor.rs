//! Executors.

use crate::error::BoxError;
use crate::request::Request;
use crate::response::Response;

/// Turns a request into a response.
///
/// How is up to the implementation: a real network round-trip, a call into an
/// in-process handler, or a stub. The executor owns the request from here on
/// and is responsible for honouring its
/// [`RequestContext`](crate::RequestContext).
///
/// Any `Fn(Request) -> Result<Response, BoxError>` is an executor.
pub trait Executor {
    /// Executes the request.
    fn execute(&self, request: Request) -> Result<Response, BoxError>;
}

impl<F> Executor for F
where
    F: Fn(Request) -> Result<Response, BoxError>,
{
    fn execute(&self, request: Request) -> Result<Response, BoxError> {
        self(request)
    }
}
