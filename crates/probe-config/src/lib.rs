//! # Probe Config
//!
//! Typed configuration for Probe test runs.
//!
//! ## Sources
//!
//! Configuration is layered, later sources overriding earlier ones:
//!
//! 1. Defaults
//! 2. A TOML or JSON file
//! 3. A `.env` file
//! 4. `PREFIX__SECTION__KEY` environment variables
//!
//! ## Example file
//!
//! ```toml
//! [client]
//! timeout_ms = 5000
//! follow_redirects = false
//! cookie_store = true
//! user_agent = "probe-ci"
//!
//! [logging]
//! level = "probe_core=debug"
//! format = "json"
//! ```

#![doc(html_root_url = "https://docs.rs/probe-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::{ProbeConfig, MAX_REDIRECT_LIMIT};
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{ClientConfig, LogFormat, LoggingConfig};
