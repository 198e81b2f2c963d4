//! Request/response pipeline.
//!
//! A run flows through a fixed sequence of stages:
//!
//! ```text
//! Building ──► Executing ──► Buffering ──► Asserting ──► Done
//!     │            │             │
//!     └────────────┴─────────────┴──────► Aborted
//! ```
//!
//! 1. **Building** - the factory creates the request, then each builder
//!    customises it in order. The first failure aborts.
//! 2. **Executing** - the executor turns the request into a response.
//! 3. **Buffering** - the response body is read once and released.
//! 4. **Asserting** - every assertion runs against its own view of the body.
//!    Failures are recorded and never abort.
//!
//! Building, executing and buffering happen eagerly and produce an
//! [`Assertable`]. The reporter is only needed once the assertions are known,
//! which keeps call sites fluent:
//!
//! ```rust
//! use probe_core::{assertion, BoxError, ExecutorExt, RecordingReporter, Request, Response, ResponseView, Stage};
//! use http::{HeaderMap, StatusCode};
//!
//! let executor = |_: Request| -> Result<Response, BoxError> {
//!     Ok(Response::from_bytes(StatusCode::OK, HeaderMap::new(), "ok"))
//! };
//!
//! let mut t = RecordingReporter::new();
//! let stage = executor
//!     .make_request("GET", "http://localhost/health", Vec::<probe_core::BoxedBuilder>::new())
//!     .expect_it(&mut t, [assertion(|r: &mut ResponseView<'_>| {
//!         if r.status() == StatusCode::OK { Ok(()) } else { Err("not ok".into()) }
//!     })]);
//!
//! assert_eq!(stage, Stage::Done);
//! assert!(!t.has_failed());
//! ```

use crate::assertion::Assertion;
use crate::buffer::{BufferedResponse, ResponseBuffer};
use crate::builder::RequestBuilder;
use crate::error::ProbeError;
use crate::executor::Executor;
use crate::factory::{new_request, RequestFactory};
use crate::reporter::Reporter;
use crate::request::Body;
use crate::runner::AssertionRunner;
use std::fmt;
use tracing::field;

/// Stage of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Creating and customising the request.
    Building,
    /// Waiting for the executor.
    Executing,
    /// Capturing the response body.
    Buffering,
    /// Running assertions.
    Asserting,
    /// All assertions ran.
    Done,
    /// The run stopped before any assertion ran.
    Aborted,
}

impl Stage {
    /// Returns `true` for `Done` and `Aborted`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }

    /// Returns the stage name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Building => "building",
            Self::Executing => "executing",
            Self::Buffering => "buffering",
            Self::Asserting => "asserting",
            Self::Done => "done",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orchestrates factory, builders, executor, buffer and assertions.
///
/// A pipeline holds no per-run state, so one pipeline can serve any number of
/// runs, including concurrent ones when the executor allows it.
#[derive(Debug, Clone)]
pub struct Pipeline<E> {
    executor: E,
}

impl<E: Executor> Pipeline<E> {
    /// Creates a pipeline around `executor`.
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Returns the executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Builds a request from `method` and `url`, customises and executes it.
    pub fn make_request<I>(&self, method: &str, url: &str, builders: I) -> Assertable
    where
        I: IntoIterator,
        I::Item: RequestBuilder,
    {
        prepare(&self.executor, new_request(method, url, Body::empty()), builders)
    }

    /// Creates a request with `factory`, customises and executes it.
    pub fn call<F, I>(&self, factory: F, builders: I) -> Assertable
    where
        F: RequestFactory,
        I: IntoIterator,
        I::Item: RequestBuilder,
    {
        prepare(&self.executor, factory, builders)
    }

    /// Performs a whole run and returns its terminal stage.
    pub fn run<F, B, A, R>(&self, reporter: &mut R, factory: F, builders: B, assertions: A) -> Stage
    where
        F: RequestFactory,
        B: IntoIterator,
        B::Item: RequestBuilder,
        A: IntoIterator,
        A::Item: Assertion,
        R: Reporter + ?Sized,
    {
        self.call(factory, builders).expect_it(reporter, assertions)
    }
}

/// Pipeline entry points callable on any executor.
pub trait ExecutorExt: Executor {
    /// See [`Pipeline::make_request`].
    fn make_request<I>(&self, method: &str, url: &str, builders: I) -> Assertable
    where
        I: IntoIterator,
        I::Item: RequestBuilder,
    {
        prepare(self, new_request(method, url, Body::empty()), builders)
    }

    /// See [`Pipeline::call`].
    fn call<F, I>(&self, factory: F, builders: I) -> Assertable
    where
        F: RequestFactory,
        I: IntoIterator,
        I::Item: RequestBuilder,
    {
        prepare(self, factory, builders)
    }
}

impl<E: Executor + ?Sized> ExecutorExt for E {}

fn prepare<E, F, I>(executor: &E, factory: F, builders: I) -> Assertable
where
    E: Executor + ?Sized,
    F: RequestFactory,
    I: IntoIterator,
    I::Item: RequestBuilder,
{
    let span = tracing::debug_span!(
        "probe.pipeline",
        http.method = field::Empty,
        http.uri = field::Empty,
        http.status_code = field::Empty,
    );
    let _entered = span.enter();

    tracing::debug!(stage = %Stage::Building, "Stage entered");
    let mut request = match factory.create() {
        Ok(request) => request,
        Err(source) => return Assertable::aborted(ProbeError::Factory(source)),
    };
    span.record("http.method", request.method().as_str());
    span.record("http.uri", field::display(request.uri()));

    for (position, builder) in builders.into_iter().enumerate() {
        if let Err(source) = builder.apply(&mut request) {
            tracing::debug!(position, "Builder failed");
            return Assertable::aborted(ProbeError::Builder(source));
        }
    }

    tracing::debug!(stage = %Stage::Executing, "Stage entered");
    let response = match executor.execute(request) {
        Ok(response) => response,
        Err(source) => return Assertable::aborted(ProbeError::Execution(source)),
    };
    span.record("http.status_code", response.status().as_u16());

    tracing::debug!(stage = %Stage::Buffering, "Stage entered");
    let (head, body) = response.into_parts();
    match ResponseBuffer::capture(body) {
        Ok(buffer) => Assertable::ready(BufferedResponse::new(head, buffer)),
        Err(error) => Assertable::aborted(error),
    }
}

/// Outcome of building, executing and buffering, awaiting its assertions.
#[must_use = "an Assertable reports nothing until `expect_it` is called"]
pub struct Assertable {
    outcome: Result<BufferedResponse, ProbeError>,
}

impl Assertable {
    fn ready(response: BufferedResponse) -> Self {
        Self {
            outcome: Ok(response),
        }
    }

    fn aborted(error: ProbeError) -> Self {
        tracing::warn!(stage = %error.stage(), error = %error, "Pipeline aborted");
        Self {
            outcome: Err(error),
        }
    }

    /// Runs `assertions` and reports to `reporter`; returns the terminal stage.
    ///
    /// If the run already failed, the reporter receives a single failure
    /// followed by an abort request and no assertion runs. Otherwise every
    /// assertion runs and each failing one is recorded.
    pub fn expect_it<R, I>(self, reporter: &mut R, assertions: I) -> Stage
    where
        R: Reporter + ?Sized,
        I: IntoIterator,
        I::Item: Assertion,
    {
        reporter.trace();
        match self.outcome {
            Err(error) => {
                reporter.record_failure(&error.to_string());
                reporter.abort();
                Stage::Aborted
            }
            Ok(response) => {
                tracing::debug!(stage = %Stage::Asserting, "Stage entered");
                let failed = AssertionRunner::new(&response).run(reporter, assertions);
                tracing::debug!(stage = %Stage::Done, failed, "Stage entered");
                Stage::Done
            }
        }
    }

    /// Returns the captured response, if the run got that far.
    #[must_use]
    pub fn response(&self) -> Option<&BufferedResponse> {
        self.outcome.as_ref().ok()
    }

    /// Returns the error that stopped the run, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ProbeError> {
        self.outcome.as_ref().err()
    }

    /// Converts into the underlying result.
    pub fn into_result(self) -> Result<BufferedResponse, ProbeError> {
        self.outcome
    }
}

impl fmt::Debug for Assertable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assertable")
            .field("outcome", &self.outcome)
            .finish()
    }
}
