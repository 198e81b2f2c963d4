//! # Probe Builders
//!
//! Request factories and request builders for Probe endpoint tests.
//!
//! - Factories: [`get`], [`post`], [`put`], [`patch`], [`delete`], [`head`], [`new_request`]
//! - Headers: [`with_header`], [`with_header_values`], [`with_user_agent`],
//!   [`with_content_type`], [`with_accept`]
//! - Authorization: [`with_authorization`], [`with_bearer_token`], [`with_basic_auth`]
//! - Host: [`with_host`]
//! - Body: [`with_body`], [`with_json`], [`empty_body`], [`serialize_json`]
//! - Deadlines: [`with_timeout`], [`with_deadline`], [`with_cancel_token`]
//! - URLs: [`url()`], [`with_path`], [`with_query_param`], [`with_username_password`]
//!
//! Every builder is a [`BoxedBuilder`](probe_core::BoxedBuilder), so builders
//! of different kinds fit in one array:
//!
//! ```rust
//! use probe_builders::{get, with_basic_auth, with_header, with_user_agent};
//!
//! let factory = get("http://localhost/users");
//! let builders = [
//!     with_header("accept", "application/json"),
//!     with_user_agent("probe"),
//!     with_basic_auth("user", "secret"),
//! ];
//! # let _ = (factory, builders);
//! ```

#![doc(html_root_url = "https://docs.rs/probe-builders/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod body;
mod context;
mod error;
mod factory;
mod header;
mod url_builder;

pub use body::{empty_body, serialize_json, with_body, with_json};
pub use context::{with_cancel_token, with_deadline, with_timeout};
pub use error::BuildError;
pub use factory::{delete, get, head, new_request, patch, post, put};
pub use header::{
    with_accept, with_authorization, with_basic_auth, with_bearer_token, with_content_type,
    with_header, with_header_values, with_host, with_user_agent,
};
pub use url_builder::{url, with_path, with_query_param, with_username_password, UrlOption};
