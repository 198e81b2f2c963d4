//! Response produced by an executor.
//!
//! The body of a [`Response`] is a single-use [`BodyStream`]: it is read once
//! by the [`ResponseBuffer`](crate::ResponseBuffer) and then released with
//! [`BodyStream::close`].

use bytes::Bytes;
use http::{HeaderMap, StatusCode, Version};
use std::fmt;
use std::io::{self, Cursor, Read};

/// A readable response body that must be released after use.
pub trait BodyStream: Read + Send {
    /// Releases the underlying resource.
    ///
    /// Called exactly once, after reading stopped.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl BodyStream for Cursor<Bytes> {}

impl BodyStream for Cursor<Vec<u8>> {}

impl BodyStream for io::Empty {}

/// Owned, type-erased response body.
pub type ResponseBody = Box<dyn BodyStream>;

/// Status line and headers of a response.
#[derive(Debug, Clone)]
pub struct ResponseHead {
    /// HTTP status code.
    pub status: StatusCode,
    /// HTTP version.
    pub version: Version,
    /// Response headers.
    pub headers: HeaderMap,
}

/// A response whose body has not been read yet.
pub struct Response {
    head: ResponseHead,
    body: ResponseBody,
}

impl Response {
    /// Creates a response from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: ResponseBody) -> Self {
        Self {
            head: ResponseHead {
                status,
                version: Version::HTTP_11,
                headers,
            },
            body,
        }
    }

    /// Creates a response with an in-memory body.
    pub fn from_bytes(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self::new(status, headers, Box::new(Cursor::new(body.into())))
    }

    /// Creates a response from an `http::Response` with an in-memory body.
    pub fn from_http(response: http::Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            head: ResponseHead {
                status: parts.status,
                version: parts.version,
                headers: parts.headers,
            },
            body: Box::new(Cursor::new(body)),
        }
    }

    /// Sets the HTTP version.
    pub fn with_version(mut self, version: Version) -> Self {
        self.head.version = version;
        self
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.head.status
    }

    /// Returns the HTTP version.
    #[must_use]
    pub fn version(&self) -> Version {
        self.head.version
    }

    /// Returns the headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.head.headers
    }

    /// Splits the response into its head and its unread body.
    pub fn into_parts(self) -> (ResponseHead, ResponseBody) {
        (self.head, self.body)
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.head.status)
            .field("version", &self.head.version)
            .field("headers", &self.head.headers)
            .finish_non_exhaustive()
    }
}
