//! Real network executor over a blocking `reqwest` client.

use crate::error::ExecutorError;
use http::header::HOST;
use http::HeaderValue;
use probe_config::ClientConfig;
use probe_core::{Body, BodyStream, BoxError, ContextError, Executor, Request, Response};
use reqwest::blocking::Client;
use reqwest::cookie::Jar;
use reqwest::redirect::Policy;
use std::fmt;
use std::io::{self, Read};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Sends requests over the network.
///
/// The request's [`RequestContext`](probe_core::RequestContext) is checked
/// before dispatch. Its remaining time bounds that one call, and the
/// shorter of it and the executor's own timeout wins.
///
/// # Example
///
/// ```rust,no_run
/// use probe_executors::ClientExecutor;
/// use std::time::Duration;
///
/// let executor = ClientExecutor::builder()
///     .timeout(Duration::from_secs(5))
///     .cookie_store(true)
///     .no_redirect()
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ClientExecutor {
    client: Client,
    timeout: Option<Duration>,
}

impl ClientExecutor {
    /// Creates an executor with default client settings.
    pub fn new() -> Result<Self, ExecutorError> {
        Self::builder().build()
    }

    /// Returns a builder for configuring the client.
    pub fn builder() -> ClientExecutorBuilder {
        ClientExecutorBuilder::default()
    }

    /// Builds an executor from the `client` configuration section.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ExecutorError> {
        let mut builder = Self::builder().cookie_store(config.cookie_store);
        builder.timeout = config.timeout();
        builder = if config.follow_redirects {
            builder.redirect_limit(config.max_redirects)
        } else {
            builder.no_redirect()
        };
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }

    /// Wraps an already configured client.
    ///
    /// The client's own timeout is not visible here, so request deadlines
    /// replace it for the calls they bound.
    pub fn from_client(client: Client) -> Self {
        Self { client, timeout: None }
    }

    /// Returns the underlying client.
    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Sends `request` and returns the response with its body unread.
    pub fn send(&self, mut request: Request) -> Result<Response, ExecutorError> {
        let remaining = request.context().remaining()?;
        let cancel = request.context().cancel_token().clone();

        let method = request.method().clone();
        let uri = request.uri().to_string();

        let mut headers = request.headers().clone();
        if let Some(host) = request.host_override() {
            let value = HeaderValue::from_str(host).map_err(|e| {
                warn!(http.method = %method, http.uri = %uri, error = %e, "Invalid host override");
                ExecutorError::InvalidHost(host.to_string())
            })?;
            headers.insert(HOST, value);
        }

        let mut outgoing = self.client.request(method.clone(), &uri).headers(headers);
        if let Some(timeout) = effective_timeout(remaining, self.timeout) {
            outgoing = outgoing.timeout(timeout);
        }
        match request.take_body() {
            Body::Empty => {}
            Body::Bytes(bytes) => outgoing = outgoing.body(bytes),
            Body::Reader(reader) => outgoing = outgoing.body(reqwest::blocking::Body::new(reader)),
        }

        debug!(http.method = %method, http.uri = %uri, "Dispatching request");
        let start = Instant::now();

        let response = outgoing.send().map_err(|e| {
            warn!(
                http.method = %method,
                http.uri = %uri,
                error = %e,
                timeout = e.is_timeout(),
                "Request failed"
            );
            ExecutorError::Transport(e)
        })?;

        if cancel.is_cancelled() {
            warn!(http.method = %method, http.uri = %uri, "Request cancelled in flight");
            return Err(ContextError::Cancelled.into());
        }

        let status = response.status();
        debug!(
            http.method = %method,
            http.uri = %uri,
            http.status_code = status.as_u16(),
            duration_ms = duration_ms(start.elapsed()),
            "Response received"
        );

        let version = response.version();
        let headers = response.headers().clone();
        Ok(Response::new(status, headers, Box::new(ClientBody(response))).with_version(version))
    }
}

impl Executor for ClientExecutor {
    fn execute(&self, request: Request) -> Result<Response, BoxError> {
        self.send(request).map_err(Into::into)
    }
}

/// Per-call timeout. `reqwest` replaces the client timeout with a
/// per-request one, so the client's limit is folded in here.
fn effective_timeout(remaining: Option<Duration>, client: Option<Duration>) -> Option<Duration> {
    match (remaining, client) {
        (Some(remaining), Some(client)) => Some(remaining.min(client)),
        (Some(remaining), None) => Some(remaining),
        (None, _) => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn duration_ms(elapsed: Duration) -> u64 {
    elapsed.as_millis() as u64
}

/// Streaming body of a network response.
///
/// Dropping it releases the connection.
struct ClientBody(reqwest::blocking::Response);

impl Read for ClientBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl BodyStream for ClientBody {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Redirects {
    #[default]
    Default,
    Never,
    Limit(usize),
}

/// Builder for [`ClientExecutor`].
///
/// Without options the client follows up to ten redirects, keeps no cookies
/// and has no timeout of its own.
#[derive(Default)]
#[must_use]
pub struct ClientExecutorBuilder {
    timeout: Option<Duration>,
    cookie_store: bool,
    cookie_jar: Option<Arc<Jar>>,
    redirects: Redirects,
    user_agent: Option<String>,
    client: Option<Client>,
}

impl ClientExecutorBuilder {
    /// Sets a total timeout for every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Keeps cookies set by responses and sends them on later requests.
    pub fn cookie_store(mut self, enabled: bool) -> Self {
        self.cookie_store = enabled;
        self
    }

    /// Uses `jar` as the cookie store.
    ///
    /// The jar can be shared between executors and inspected by the test.
    pub fn cookie_jar(mut self, jar: Arc<Jar>) -> Self {
        self.cookie_jar = Some(jar);
        self
    }

    /// Returns redirect responses as they are instead of following them.
    pub fn no_redirect(mut self) -> Self {
        self.redirects = Redirects::Never;
        self
    }

    /// Follows at most `max` redirects.
    pub fn redirect_limit(mut self, max: usize) -> Self {
        self.redirects = Redirects::Limit(max);
        self
    }

    /// Sets the `User-Agent` sent when a request does not set one.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Uses `client` as is. Every other option is ignored.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Builds the executor.
    pub fn build(self) -> Result<ClientExecutor, ExecutorError> {
        if let Some(client) = self.client {
            return Ok(ClientExecutor::from_client(client));
        }

        let mut builder = Client::builder().timeout(self.timeout);

        builder = match self.redirects {
            Redirects::Default => builder,
            Redirects::Never => builder.redirect(Policy::none()),
            Redirects::Limit(max) => builder.redirect(Policy::limited(max)),
        };

        if let Some(jar) = self.cookie_jar {
            builder = builder.cookie_provider(jar);
        } else if self.cookie_store {
            builder = builder.cookie_store(true);
        }

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(ExecutorError::ClientBuild)?;
        Ok(ClientExecutor {
            client,
            timeout: self.timeout,
        })
    }
}

impl fmt::Debug for ClientExecutorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientExecutorBuilder")
            .field("timeout", &self.timeout)
            .field("cookie_store", &self.cookie_store)
            .field("cookie_jar", &self.cookie_jar.is_some())
            .field("redirects", &self.redirects)
            .field("user_agent", &self.user_agent)
            .field("client", &self.client.is_some())
            .finish()
    }
}
