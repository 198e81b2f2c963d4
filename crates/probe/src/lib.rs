//! # Probe
//!
//! Declarative HTTP endpoint testing. A test names a request, a list of
//! builders that customise it, an executor that sends it and a list of
//! assertions that inspect the response:
//!
//! ```rust
//! use bytes::Bytes;
//! use probe::prelude::*;
//!
//! let executor = with_handler(|_request: Request| {
//!     http::Response::builder()
//!         .status(200)
//!         .header("content-type", "application/json")
//!         .body(Bytes::from(r#"{"name":"probe"}"#))
//!         .unwrap()
//! });
//!
//! let mut reporter = TestReporter::named("get_user");
//! executor
//!     .call(get("http://localhost/users/1"), [with_bearer_token("secret")])
//!     .expect_it(
//!         &mut reporter,
//!         [
//!             to_have_status(200),
//!             have_header("content-type"),
//!             body_json(|user: serde_json::Value| {
//!                 assert_that(user["name"] == "probe", "wrong name")
//!             }),
//!         ],
//!     );
//! reporter.finish();
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Factory → Builders → Executor → ResponseBuffer → Assertions → Reporter
//!    └──────────┴──────────┴───────────┴─→ abort (one failure)
//! ```
//!
//! A failure before the assertions run aborts the run with a single report.
//! Assertion failures accumulate: every assertion runs, each failure is
//! reported.
//!
//! ## Crates
//!
//! | Module | Crate | Contents |
//! |--------|-------|----------|
//! | [`core`] | `probe-core` | Pipeline, request and response types, reporters |
//! | [`builders`] | `probe-builders` | Request factories, builders, URL helpers |
//! | [`assertions`] | `probe-assertions` | Status, header, cookie and body assertions |
//! | [`executors`] | `probe-executors` | Network and in-process executors |
//! | [`config`] | `probe-config` | Layered configuration |
//! | [`telemetry`] | `probe-telemetry` | Logging setup |
//!
//! Both `builders` and `assertions` have a `with_header`. The prelude exports
//! neither; call them through their module.

#![doc(html_root_url = "https://docs.rs/probe/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use probe_core as core;

// Re-export request factories and builders
pub use probe_builders as builders;

// Re-export assertions
pub use probe_assertions as assertions;

// Re-export executors
pub use probe_executors as executors;

// Re-export configuration
pub use probe_config as config;

// Re-export telemetry
pub use probe_telemetry as telemetry;

pub use probe_core::{
    Assertable, Assertion, Body, BoxError, Executor, ExecutorExt, Pipeline, ProbeError, Reporter,
    Request, RequestBuilder, RequestFactory, Response, Stage,
};

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use probe::prelude::*;
/// ```
pub mod prelude {
    pub use probe_core::{
        Assertable, Assertion, Body, BoxError, BoxedAssertion, BoxedBuilder, CancelToken,
        Executor, ExecutorExt, Pipeline, ProbeError, RecordingReporter, Reporter, Request,
        RequestBuilder, RequestFactory, Response, ResponseView, Stage, TestReporter,
    };

    // Factories and builders
    pub use probe_builders::{
        delete, empty_body, get, head, new_request, patch, post, put, serialize_json, url,
        with_accept, with_authorization, with_basic_auth, with_bearer_token, with_body,
        with_cancel_token, with_content_type, with_deadline, with_header_values, with_host,
        with_json, with_path, with_query_param, with_timeout, with_user_agent,
        with_username_password,
    };

    // Assertions
    pub use probe_assertions::{
        assert_that, body_bytes, body_empty, body_json, body_text, have_cookie, have_header,
        multiple, to_be_success, to_have_status, to_have_status_code, with_cookie,
    };

    // Executors
    pub use probe_executors::{with_async_handler, with_handler, ClientExecutor};

    // Configuration
    pub use probe_config::{ConfigLoader, ProbeConfig};
}
