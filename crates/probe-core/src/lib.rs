//! # Probe Core
//!
//! Core pipeline and strategy contracts for declarative HTTP endpoint tests.
//!
//! A test is described as data: a factory that creates the request, an
//! ordered chain of builders that customise it, an executor that turns it
//! into a response, and a list of assertions checked against that response.
//! The [`Pipeline`] runs those pieces in order and reports to a [`Reporter`].
//!
//! - [`Request`] / [`Body`] - the outgoing request
//! - [`Response`] / [`BodyStream`] - what an executor produces
//! - [`ResponseBuffer`] - reads the body once, replays it to every assertion
//! - [`RequestFactory`], [`RequestBuilder`], [`Executor`], [`Assertion`] - the strategy contracts
//! - [`Reporter`] - failure sink ([`TestReporter`], [`RecordingReporter`])
//! - [`ProbeError`] - errors surfaced by a run
//!
//! ## Failure model
//!
//! | Stage | On failure |
//! |-------|------------|
//! | factory, builders | one failure recorded, then abort |
//! | executor, body capture | one failure recorded, then abort |
//! | assertions | each failure recorded, run continues |
//!
//! ## Example
//!
//! ```rust
//! use http::{HeaderMap, StatusCode};
//! use probe_core::{
//!     assertion, builder, BoxError, ExecutorExt, RecordingReporter, Request, Response,
//!     ResponseView, Stage,
//! };
//!
//! let executor = |request: Request| -> Result<Response, BoxError> {
//!     let status = if request.headers().contains_key("x-token") {
//!         StatusCode::OK
//!     } else {
//!         StatusCode::UNAUTHORIZED
//!     };
//!     Ok(Response::from_bytes(status, HeaderMap::new(), ""))
//! };
//!
//! let mut t = RecordingReporter::new();
//! let stage = executor
//!     .make_request(
//!         "GET",
//!         "http://localhost/me",
//!         [builder(|r: &mut Request| {
//!             r.headers_mut().insert("x-token", "secret".parse()?);
//!             Ok(())
//!         })],
//!     )
//!     .expect_it(
//!         &mut t,
//!         [assertion(|r: &mut ResponseView<'_>| {
//!             if r.status() == StatusCode::OK {
//!                 Ok(())
//!             } else {
//!                 Err(format!("unexpected status {}", r.status()).into())
//!             }
//!         })],
//!     );
//!
//! assert_eq!(stage, Stage::Done);
//! assert!(!t.has_failed());
//! ```

#![doc(html_root_url = "https://docs.rs/probe-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod assertion;
mod buffer;
mod builder;
mod context;
mod error;
mod executor;
mod factory;
mod pipeline;
mod reporter;
mod request;
mod response;
mod runner;

pub use assertion::{assertion, Assertion, BoxedAssertion};
pub use buffer::{BodyReader, BufferedResponse, ResponseBuffer, ResponseView};
pub use builder::{builder, BoxedBuilder, RequestBuilder};
pub use context::{CancelToken, RequestContext};
pub use error::{
    BoxError, ConstructionError, ContextError, ErrorCategory, ProbeError, ProbeResult,
};
pub use executor::Executor;
pub use factory::{new_request, NewRequest, RequestFactory};
pub use pipeline::{Assertable, ExecutorExt, Pipeline, Stage};
pub use reporter::{RecordingReporter, Reporter, TestReporter};
pub use request::{Body, Request};
pub use response::{BodyStream, Response, ResponseBody, ResponseHead};
pub use runner::AssertionRunner;
