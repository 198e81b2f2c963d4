//! # Probe Assertions
//!
//! Ready-made assertions for Probe endpoint tests.
//!
//! | Assertion | Checks | Failure prefix |
//! |-----------|--------|----------------|
//! | [`to_have_status`] | status code equality | `status:` |
//! | [`with_header`] / [`have_header`] | first header value | `header:` |
//! | [`with_cookie`] / [`have_cookie`] | last `Set-Cookie` with a name | `cookie:` |
//! | [`body_bytes`] / [`body_text`] / [`body_empty`] | raw body | `body:` |
//! | [`body_json`] | body decoded as JSON | `json:` |
//!
//! Handlers return `Result<(), BoxError>`; [`assert_that`] and [`multiple`]
//! keep them short.
//!
//! ```rust
//! use probe_assertions::{assert_that, body_json, have_header, multiple, to_have_status};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! let assertions = [
//!     to_have_status(200),
//!     have_header("content-type"),
//!     body_json(|user: User| {
//!         multiple([
//!             assert_that(user.id == 42, "wrong id"),
//!             assert_that(!user.name.is_empty(), "name is empty"),
//!         ])
//!     }),
//! ];
//! # let _ = assertions;
//! ```

#![doc(html_root_url = "https://docs.rs/probe-assertions/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod body;
mod combinators;
mod cookie;
mod error;
mod header;
mod status;

pub use body::{body_bytes, body_empty, body_json, body_text};
pub use combinators::{assert_that, multiple};
pub use cookie::{have_cookie, with_cookie, SameSite, SetCookie};
pub use error::{AssertionError, MultipleErrors};
pub use header::{have_header, with_header};
pub use status::{to_be_success, to_have_status, to_have_status_code};
