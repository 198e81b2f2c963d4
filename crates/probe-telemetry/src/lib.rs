//! Logging setup for Probe.
//!
//! Probe crates instrument themselves with `tracing`:
//!
//! | Event | Level | Fields |
//! |-------|-------|--------|
//! | pipeline span `probe.pipeline` | debug | `http.method`, `http.uri`, `http.status_code` |
//! | stage transition | debug | `stage` |
//! | run aborted | warn | `stage`, `error` |
//! | assertion failed | debug | `index`, `error` |
//! | assertion passed | trace | `index` |
//! | request dispatched / answered | debug | `http.method`, `http.uri`, `http.status_code` |
//!
//! This crate turns those events into output. Nothing is printed until
//! [`init_logging`] installs a subscriber.

#![doc(html_root_url = "https://docs.rs/probe-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig};

/// Result type alias for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
