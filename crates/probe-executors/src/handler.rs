//! In-process executors.
//!
//! Both executors hand the request straight to a handler function and turn
//! its return value into a [`Response`], without any network I/O.

use crate::error::ExecutorError;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use probe_core::{BoxError, ContextError, Executor, Request, Response};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::runtime::{Builder, Handle, Runtime};
use tracing::debug;

/// Calls a synchronous handler.
///
/// Created with [`with_handler`].
pub struct HandlerExecutor<F> {
    handler: F,
}

/// Wraps a synchronous handler as an executor.
///
/// # Example
///
/// ```rust
/// use bytes::Bytes;
/// use probe_core::{Executor, Request, Body};
/// use probe_executors::with_handler;
///
/// let executor = with_handler(|request: Request| {
///     let body = format!("hello from {}", request.uri().path());
///     http::Response::new(Bytes::from(body))
/// });
///
/// let request = Request::new("GET", "/greet", Body::empty()).unwrap();
/// let response = executor.execute(request).unwrap();
/// assert_eq!(response.status(), 200);
/// ```
pub fn with_handler<F>(handler: F) -> HandlerExecutor<F>
where
    F: Fn(Request) -> http::Response<Bytes>,
{
    HandlerExecutor { handler }
}

impl<F> HandlerExecutor<F>
where
    F: Fn(Request) -> http::Response<Bytes>,
{
    /// Calls the handler unless the request was cancelled or timed out.
    pub fn send(&self, request: Request) -> Result<Response, ExecutorError> {
        request.context().check()?;

        debug!(
            http.method = %request.method(),
            http.uri = %request.uri(),
            "Calling handler"
        );
        let response = (self.handler)(request);
        debug!(http.status_code = response.status().as_u16(), "Handler returned");

        Ok(Response::from_http(response))
    }
}

impl<F> Executor for HandlerExecutor<F>
where
    F: Fn(Request) -> http::Response<Bytes>,
{
    fn execute(&self, request: Request) -> Result<Response, BoxError> {
        self.send(request).map_err(Into::into)
    }
}

impl<F> fmt::Debug for HandlerExecutor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerExecutor").finish_non_exhaustive()
    }
}

/// Boxed async handler.
pub type AsyncHandler = Arc<
    dyn Fn(Request) -> Pin<Box<dyn Future<Output = http::Response<Full<Bytes>>> + Send>>
        + Send
        + Sync,
>;

/// Drives an async handler to completion on a private runtime.
///
/// Created with [`with_async_handler`]. The runtime is single-threaded and
/// owned by the executor, so the pipeline stays synchronous. Called from
/// inside another tokio runtime, the handler is driven on a scoped worker
/// thread and the calling thread blocks until it finishes.
pub struct AsyncHandlerExecutor {
    handler: AsyncHandler,
    runtime: Runtime,
}

/// Wraps an async handler as an executor.
///
/// # Example
///
/// ```rust
/// use bytes::Bytes;
/// use http_body_util::Full;
/// use probe_core::{Executor, Request, Body};
/// use probe_executors::with_async_handler;
///
/// let executor = with_async_handler(|_request: Request| async {
///     http::Response::new(Full::new(Bytes::from("pong")))
/// })
/// .unwrap();
///
/// let request = Request::new("GET", "/ping", Body::empty()).unwrap();
/// assert_eq!(executor.execute(request).unwrap().status(), 200);
/// ```
pub fn with_async_handler<F, Fut>(handler: F) -> Result<AsyncHandlerExecutor, ExecutorError>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = http::Response<Full<Bytes>>> + Send + 'static,
{
    AsyncHandlerExecutor::new(handler)
}

impl AsyncHandlerExecutor {
    /// Creates the executor and its runtime.
    pub fn new<F, Fut>(handler: F) -> Result<Self, ExecutorError>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = http::Response<Full<Bytes>>> + Send + 'static,
    {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ExecutorError::Runtime)?;

        Ok(Self {
            handler: Arc::new(move |request| Box::pin(handler(request))),
            runtime,
        })
    }

    /// Runs the handler to completion and collects its body.
    ///
    /// The handler is bounded by the request's remaining time.
    pub fn send(&self, request: Request) -> Result<Response, ExecutorError> {
        let remaining = request.context().remaining()?;

        debug!(
            http.method = %request.method(),
            http.uri = %request.uri(),
            "Calling async handler"
        );
        let future = (self.handler)(request);

        let response = if Handle::try_current().is_ok() {
            thread::scope(|scope| {
                scope
                    .spawn(|| self.drive(future, remaining))
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })?
        } else {
            self.drive(future, remaining)?
        };

        debug!(http.status_code = response.status().as_u16(), "Async handler returned");
        Ok(Response::from_http(response))
    }

    fn drive(
        &self,
        future: Pin<Box<dyn Future<Output = http::Response<Full<Bytes>>> + Send>>,
        remaining: Option<Duration>,
    ) -> Result<http::Response<Bytes>, ExecutorError> {
        self.runtime.block_on(async move {
            let response = match remaining {
                Some(limit) => tokio::time::timeout(limit, future)
                    .await
                    .map_err(|_| ContextError::DeadlineExceeded)?,
                None => future.await,
            };

            let (parts, body) = response.into_parts();
            let body = match body.collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(never) => match never {},
            };
            Ok::<_, ExecutorError>(http::Response::from_parts(parts, body))
        })
    }
}

impl Executor for AsyncHandlerExecutor {
    fn execute(&self, request: Request) -> Result<Response, BoxError> {
        self.send(request).map_err(Into::into)
    }
}

impl fmt::Debug for AsyncHandlerExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncHandlerExecutor").finish_non_exhaustive()
    }
}
