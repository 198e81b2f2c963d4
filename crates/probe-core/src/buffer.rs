//! Single-read, multi-view capture of a response body.
//!
//! The executor hands over a [`ResponseBody`] that can be consumed exactly
//! once. [`ResponseBuffer::capture`] drains it into an immutable snapshot and
//! releases it; every assertion then receives its own [`ResponseView`] whose
//! reader starts at offset zero, so no assertion can observe another's reads.
//!
//! # Example
//!
//! ```rust
//! use probe_core::{BufferedResponse, Response};
//! use http::{HeaderMap, StatusCode};
//! use std::io::Read;
//!
//! let response = Response::from_bytes(StatusCode::OK, HeaderMap::new(), "hello");
//! let buffered = BufferedResponse::capture(response).unwrap();
//!
//! let mut first = String::new();
//! buffered.view().read_to_string(&mut first).unwrap();
//!
//! let mut second = String::new();
//! buffered.view().read_to_string(&mut second).unwrap();
//!
//! assert_eq!(first, second);
//! ```

use crate::error::ProbeError;
use crate::response::{Response, ResponseBody, ResponseHead};
use bytes::buf::Reader;
use bytes::{Buf, Bytes};
use http::{HeaderMap, HeaderValue, StatusCode, Version};
use std::fmt;
use std::io::{self, BufRead, Read};

/// Reader over a captured body, positioned independently of all others.
pub type BodyReader = Reader<Bytes>;

/// Immutable snapshot of a response body.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ResponseBuffer {
    bytes: Bytes,
}

impl ResponseBuffer {
    /// Reads `body` to exhaustion and releases it.
    ///
    /// The body is closed exactly once whether or not the read succeeds. A
    /// read failure wins over a close failure; a close failure after a
    /// successful read is surfaced on its own.
    pub fn capture(body: ResponseBody) -> Result<Self, ProbeError> {
        let mut guard = ReleaseGuard::new(body);

        let mut buf = Vec::new();
        let read = guard.stream().read_to_end(&mut buf);
        let released = guard.release();

        match (read, released) {
            (Err(e), _) => Err(ProbeError::BodyRead(e)),
            (Ok(_), Err(e)) => Err(ProbeError::BodyClose(e)),
            (Ok(n), Ok(())) => {
                tracing::trace!(bytes = n, "Response body captured");
                Ok(Self {
                    bytes: Bytes::from(buf),
                })
            }
        }
    }

    /// Wraps bytes that were already captured.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Returns a fresh reader positioned at offset zero.
    #[must_use]
    pub fn reader(&self) -> BodyReader {
        self.bytes.clone().reader()
    }

    /// Returns the captured bytes.
    #[must_use]
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Returns the body length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the body was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for ResponseBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBuffer")
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Closes the body on every exit path, including unwinding.
struct ReleaseGuard {
    stream: ResponseBody,
    released: bool,
}

impl ReleaseGuard {
    fn new(stream: ResponseBody) -> Self {
        Self {
            stream,
            released: false,
        }
    }

    fn stream(&mut self) -> &mut ResponseBody {
        &mut self.stream
    }

    fn release(&mut self) -> io::Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.stream.close()
    }
}

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        if !self.released {
            self.released = true;
            let _ = self.stream.close();
        }
    }
}

/// A response whose body has been captured.
#[derive(Debug, Clone)]
pub struct BufferedResponse {
    head: ResponseHead,
    buffer: ResponseBuffer,
}

impl BufferedResponse {
    /// Captures the body of `response`.
    pub fn capture(response: Response) -> Result<Self, ProbeError> {
        let (head, body) = response.into_parts();
        let buffer = ResponseBuffer::capture(body)?;
        Ok(Self { head, buffer })
    }

    /// Creates a buffered response from a head and a captured body.
    pub fn new(head: ResponseHead, buffer: ResponseBuffer) -> Self {
        Self { head, buffer }
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

    /// Returns the captured body.
    #[must_use]
    pub fn buffer(&self) -> &ResponseBuffer {
        &self.buffer
    }

    /// Returns a view whose body reader starts at offset zero.
    #[must_use]
    pub fn view(&self) -> ResponseView<'_> {
        ResponseView {
            head: &self.head,
            body: self.buffer.reader(),
        }
    }
}

/// What an assertion sees of a response.
///
/// A view reads like the response body itself: it implements [`Read`] and
/// [`BufRead`] over a private cursor into the captured bytes.
pub struct ResponseView<'a> {
    head: &'a ResponseHead,
    body: BodyReader,
}

impl ResponseView<'_> {
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

    /// Gets the first header value by name.
    #[must_use]
    pub fn header(&self, name: impl AsRef<str>) -> Option<&HeaderValue> {
        self.head.headers.get(name.as_ref())
    }

    /// Gets the first header value as a string.
    #[must_use]
    pub fn header_str(&self, name: impl AsRef<str>) -> Option<&str> {
        self.header(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the number of body bytes not yet read through this view.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.body.get_ref().remaining()
    }
}

impl Read for ResponseView<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.body.read(buf)
    }
}

impl BufRead for ResponseView<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.body.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.body.consume(amt);
    }
}

impl fmt::Debug for ResponseView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseView")
            .field("status", &self.head.status)
            .field("headers", &self.head.headers)
            .field("remaining", &self.remaining())
            .finish()
    }
}
