//! Structured logging for Probe.
//!
//! The pipeline and executors emit `tracing` events but never install a
//! subscriber. Call [`init_logging`] once, typically from a test binary, to
//! see them.
//!
//! # Example
//!
//! ```rust
//! use probe_telemetry::{init_logging, LogConfig};
//!
//! let config = LogConfig {
//!     level: "probe=debug".to_string(),
//!     ..LogConfig::development()
//! };
//! let _ = init_logging(&config);
//!
//! tracing::debug!(stage = "building", "Stage entered");
//! ```

use crate::error::TelemetryError;
use crate::TelemetryResult;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Whether logging is enabled.
    pub enabled: bool,

    /// Filter directive (e.g., "info", "probe_core=debug,reqwest=warn").
    pub level: String,

    /// Whether to output JSON format.
    pub json_format: bool,

    /// Whether to include span events (new, close).
    pub span_events: bool,

    /// Whether to include file/line info.
    pub file_line_info: bool,

    /// Whether to include thread IDs.
    pub thread_ids: bool,

    /// Whether to include target (module path).
    pub include_target: bool,

    /// Whether to write through the test harness so output is captured per test.
    pub test_writer: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            json_format: false,
            span_events: false,
            file_line_info: false,
            thread_ids: false,
            include_target: true,
            test_writer: false,
        }
    }
}

impl LogConfig {
    /// Creates a development configuration with human-readable output.
    #[must_use]
    pub fn development() -> Self {
        Self {
            enabled: true,
            level: "debug".to_string(),
            json_format: false,
            span_events: true,
            file_line_info: true,
            thread_ids: false,
            include_target: true,
            test_writer: true,
        }
    }

    /// Creates a CI configuration with JSON output.
    #[must_use]
    pub fn production() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            json_format: true,
            span_events: false,
            file_line_info: false,
            thread_ids: true,
            include_target: true,
            test_writer: false,
        }
    }
}

/// Initializes the global logging subscriber.
///
/// Does nothing when `config.enabled` is false.
///
/// # Errors
///
/// Returns `TelemetryError::InvalidFilter` for a bad directive and
/// `TelemetryError::LoggingInit` if a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&config.level)?;

    let span_events = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_span_events(span_events)
        .with_file(config.file_line_info)
        .with_line_number(config.file_line_info)
        .with_thread_ids(config.thread_ids)
        .with_target(config.include_target);

    let result = match (config.json_format, config.test_writer) {
        (true, true) => tracing_subscriber::registry()
            .with(fmt_layer.json().with_test_writer().with_filter(filter))
            .try_init(),
        (true, false) => tracing_subscriber::registry()
            .with(fmt_layer.json().with_filter(filter))
            .try_init(),
        (false, true) => tracing_subscriber::registry()
            .with(fmt_layer.pretty().with_test_writer().with_filter(filter))
            .try_init(),
        (false, false) => tracing_subscriber::registry()
            .with(fmt_layer.pretty().with_filter(filter))
            .try_init(),
    };

    result.map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}

/// Creates an env filter from a directive string.
///
/// # Errors
///
/// Returns `TelemetryError::InvalidFilter` if the directive is invalid.
pub fn create_env_filter(directive: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(directive).map_err(|e| TelemetryError::InvalidFilter {
        directive: directive.to_string(),
        message: e.to_string(),
    })
}

/// Standard field names used by Probe events and spans.
pub mod fields {
    /// HTTP method field name.
    pub const HTTP_METHOD: &str = "http.method";

    /// Target URI field name.
    pub const HTTP_URI: &str = "http.uri";

    /// HTTP status code field name.
    pub const HTTP_STATUS: &str = "http.status_code";

    /// Pipeline stage field name.
    pub const STAGE: &str = "stage";

    /// Position of a builder or assertion in its list.
    pub const INDEX: &str = "index";

    /// Duration field name (in milliseconds).
    pub const DURATION_MS: &str = "duration_ms";

    /// Error field name.
    pub const ERROR: &str = "error";

    /// Pipeline span name.
    pub const PIPELINE_SPAN: &str = "probe.pipeline";
}
