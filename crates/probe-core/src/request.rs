//! Outbound request value.

use crate::context::RequestContext;
use crate::error::ConstructionError;
use bytes::{Buf, Bytes};
use http::{HeaderMap, Method, Uri};
use std::fmt;
use std::io::{self, Read};

/// A request owned by the pipeline until it is handed to an executor.
///
/// # Example
///
/// ```rust
/// use probe_core::{Body, Request};
///
/// let request = Request::new("POST", "http://localhost/users", Body::from("{}")).unwrap();
/// assert_eq!(request.method(), "POST");
/// assert_eq!(request.uri().path(), "/users");
/// ```
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    host: Option<String>,
    body: Body,
    context: RequestContext,
}

impl Request {
    /// Creates a request from a method token and a target URL.
    ///
    /// An empty method means `GET`.
    pub fn new(method: &str, url: &str, body: Body) -> Result<Self, ConstructionError> {
        let method = if method.is_empty() {
            Method::GET
        } else {
            Method::from_bytes(method.as_bytes()).map_err(|source| {
                ConstructionError::InvalidMethod {
                    method: method.to_string(),
                    source,
                }
            })?
        };

        let uri = Uri::try_from(url).map_err(|source| ConstructionError::InvalidUri {
            url: url.to_string(),
            source,
        })?;

        Ok(Self::from_parts(method, uri, body))
    }

    /// Creates a request from already-parsed parts.
    pub fn from_parts(method: Method, uri: Uri, body: Body) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            host: None,
            body,
            context: RequestContext::new(),
        }
    }

    /// Returns the method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the target URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the headers for modification.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Returns the host the request is addressed to.
    ///
    /// This is the override set with [`set_host`](Self::set_host), falling back
    /// to the host of the target URI.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref().or_else(|| self.uri.host())
    }

    /// Returns the host override, if one was set.
    #[must_use]
    pub fn host_override(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Overrides the host sent with the request.
    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = Some(host.into());
    }

    /// Returns the body.
    #[must_use]
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Returns the body for reading or replacement.
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Replaces the body.
    pub fn set_body(&mut self, body: impl Into<Body>) {
        self.body = body.into();
    }

    /// Takes the body, leaving an empty one in its place.
    pub fn take_body(&mut self) -> Body {
        std::mem::take(&mut self.body)
    }

    /// Returns the cancellation and deadline context.
    #[must_use]
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Returns the context for modification.
    pub fn context_mut(&mut self) -> &mut RequestContext {
        &mut self.context
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("uri", &self.uri)
            .field("headers", &self.headers)
            .field("host", &self.host)
            .field("body", &self.body)
            .field("context", &self.context)
            .finish()
    }
}

/// Request body.
///
/// A body is read at most once: reading a `Bytes` body advances it, and a
/// `Reader` body is a one-shot stream.
#[derive(Default)]
pub enum Body {
    /// No body.
    #[default]
    Empty,
    /// In-memory bytes.
    Bytes(Bytes),
    /// An arbitrary stream.
    Reader(Box<dyn Read + Send>),
}

impl Body {
    /// Creates an empty body.
    #[must_use]
    pub fn empty() -> Self {
        Self::Empty
    }

    /// Creates a body from in-memory bytes.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Creates a body streamed from `reader`.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self::Reader(Box::new(reader))
    }

    /// Returns `true` if the body is known to carry no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Bytes(bytes) => bytes.is_empty(),
            Self::Reader(_) => false,
        }
    }

    /// Returns the body length when it is known without reading.
    #[must_use]
    pub fn len_hint(&self) -> Option<u64> {
        match self {
            Self::Empty => Some(0),
            Self::Bytes(bytes) => Some(bytes.len() as u64),
            Self::Reader(_) => None,
        }
    }

    /// Reads the remaining body into memory.
    pub fn into_bytes(self) -> io::Result<Bytes> {
        match self {
            Self::Empty => Ok(Bytes::new()),
            Self::Bytes(bytes) => Ok(bytes),
            Self::Reader(mut reader) => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf)?;
                Ok(Bytes::from(buf))
            }
        }
    }
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Empty => Ok(0),
            Self::Bytes(bytes) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                bytes.advance(n);
                Ok(n)
            }
            Self::Reader(reader) => reader.read(buf),
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Body::Empty"),
            Self::Bytes(bytes) => f.debug_tuple("Body::Bytes").field(&bytes.len()).finish(),
            Self::Reader(_) => f.write_str("Body::Reader(..)"),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(bytes))
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::Bytes(Bytes::from(text))
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Self::Bytes(Bytes::from_static(text.as_bytes()))
    }
}
