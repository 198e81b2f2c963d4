//! Runs driven by a loaded configuration.

use bytes::Bytes;
use probe::prelude::*;
use probe::telemetry::{init_logging, LogConfig};

const CONFIG: &str = r#"
[client]
timeout_ms = 2500
follow_redirects = false
cookie_store = true
user_agent = "probe-suite/1.0"

[logging]
level = "probe_core=debug,probe_executors=debug"
"#;

#[test]
fn test_config_builds_logging_and_client() {
    let config = ConfigLoader::new()
        .with_string(CONFIG, "toml")
        .unwrap()
        .load()
        .unwrap();

    let log = LogConfig {
        test_writer: true,
        ..LogConfig::from(&config.logging)
    };
    // Tests in this binary share one global subscriber.
    let _ = init_logging(&log);

    assert_eq!(config.client.timeout_ms, Some(2500));
    assert!(ClientExecutor::from_config(&config.client).is_ok());
}

#[test]
fn test_logged_run_reports_like_unlogged_run() {
    let _ = init_logging(&LogConfig {
        level: "probe_core=trace".to_string(),
        ..LogConfig::development()
    });

    let executor = with_handler(|request: Request| {
        let agent = request
            .headers()
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        http::Response::new(Bytes::from(agent))
    });

    let mut reporter = RecordingReporter::new();
    executor
        .call(get("http://localhost/agent"), [with_user_agent("probe-suite/1.0")])
        .expect_it(
            &mut reporter,
            [
                to_have_status(200),
                body_text(|text| assert_that(text == "probe-suite/1.0", "agent not sent")),
                to_have_status(204),
            ],
        );

    assert_eq!(
        reporter.failures(),
        ["assertion: status: returned status (200) not equal to expected status (204)"]
    );
    assert_eq!(reporter.trace_count(), 1);
}
