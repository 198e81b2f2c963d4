//! # Probe Executors
//!
//! Executors turn a [`Request`](probe_core::Request) into a
//! [`Response`](probe_core::Response). The pipeline does not care which one it
//! is given.
//!
//! | Executor | Transport | Created with |
//! |----------|-----------|--------------|
//! | [`ClientExecutor`] | Network, blocking `reqwest` client | [`ClientExecutor::builder`], [`ClientExecutor::from_config`] |
//! | [`HandlerExecutor`] | In-process, synchronous handler | [`with_handler`] |
//! | [`AsyncHandlerExecutor`] | In-process, async handler on a private runtime | [`with_async_handler`] |
//!
//! Every executor checks the request's cancellation and deadline before it
//! dispatches. A cancelled or expired request fails with
//! [`ExecutorError::Context`], which the pipeline reports as an execution
//! failure.
//!
//! ## Example
//!
//! ```rust,no_run
//! use probe_config::ClientConfig;
//! use probe_executors::ClientExecutor;
//!
//! let config = ClientConfig {
//!     follow_redirects: false,
//!     cookie_store: true,
//!     ..ClientConfig::default()
//! };
//! let executor = ClientExecutor::from_config(&config).unwrap();
//! ```

#![doc(html_root_url = "https://docs.rs/probe-executors/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod handler;

pub use client::{ClientExecutor, ClientExecutorBuilder};
pub use error::ExecutorError;
pub use handler::{with_async_handler, with_handler, AsyncHandler, AsyncHandlerExecutor, HandlerExecutor};

/// Shared cookie jar accepted by [`ClientExecutorBuilder::cookie_jar`].
pub use reqwest::cookie::Jar;
