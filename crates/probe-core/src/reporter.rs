//! Failure reporting.
//!
//! A [`Reporter`] is the sink of a pipeline run. The pipeline never decides
//! whether a test passed; it only records failures and, for construction or
//! execution failures, requests an abort. Deciding the verdict is up to the
//! reporter.
//!
//! Two reporters ship with this crate:
//!
//! - [`TestReporter`] for use inside `#[test]` functions: it panics on abort
//!   and, when dropped, if any failure was recorded.
//! - [`RecordingReporter`] for inspecting what a run reported.

use std::fmt;

/// Sink for failures of a pipeline run.
pub trait Reporter {
    /// Records a failure; the run continues.
    fn record_failure(&mut self, message: &str);

    /// Requests that the test stop immediately.
    fn abort(&mut self);

    /// Called when a run enters the reporting phase. No-op by default.
    fn trace(&mut self) {}
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn record_failure(&mut self, message: &str) {
        (**self).record_failure(message);
    }

    fn abort(&mut self) {
        (**self).abort();
    }

    fn trace(&mut self) {
        (**self).trace();
    }
}

/// Reporter that fails the current test.
///
/// Failures accumulate; [`abort`](Reporter::abort) panics with every message
/// recorded so far. A reporter dropped with recorded failures panics as well,
/// unless the thread is already panicking.
///
/// # Example
///
/// ```rust,should_panic
/// use probe_core::{Reporter, TestReporter};
///
/// let mut t = TestReporter::named("get_user");
/// t.record_failure("status mismatch");
/// // Dropping `t` here panics and fails the test.
/// ```
#[derive(Default)]
pub struct TestReporter {
    name: Option<String>,
    failures: Vec<String>,
}

impl TestReporter {
    /// Creates an unnamed reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reporter whose panic messages carry `name`.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            failures: Vec::new(),
        }
    }

    /// Returns the failures recorded so far.
    #[must_use]
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Returns `true` if any failure was recorded.
    #[must_use]
    pub fn has_failed(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Ends the test, panicking if any failure was recorded.
    pub fn finish(mut self) {
        let failures = std::mem::take(&mut self.failures);
        if !failures.is_empty() {
            panic!("{}", render(self.name.as_deref(), &failures));
        }
    }
}

impl Reporter for TestReporter {
    fn record_failure(&mut self, message: &str) {
        tracing::error!(test = self.name.as_deref().unwrap_or("-"), "{message}");
        self.failures.push(message.to_string());
    }

    fn abort(&mut self) {
        let failures = std::mem::take(&mut self.failures);
        panic!("{}", render(self.name.as_deref(), &failures));
    }

    fn trace(&mut self) {
        tracing::trace!(test = self.name.as_deref().unwrap_or("-"), "Reporting run");
    }
}

impl Drop for TestReporter {
    fn drop(&mut self) {
        if !self.failures.is_empty() && !std::thread::panicking() {
            let failures = std::mem::take(&mut self.failures);
            panic!("{}", render(self.name.as_deref(), &failures));
        }
    }
}

impl fmt::Debug for TestReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestReporter")
            .field("name", &self.name)
            .field("failures", &self.failures.len())
            .finish()
    }
}

fn render(name: Option<&str>, failures: &[String]) -> String {
    let mut out = match name {
        Some(name) => format!("{name}: "),
        None => String::new(),
    };
    match failures {
        [] => out.push_str("test aborted"),
        [only] => out.push_str(only),
        many => {
            out.push_str(&format!("{} failures:", many.len()));
            for failure in many {
                out.push_str("\n- ");
                out.push_str(failure);
            }
        }
    }
    out
}

/// Reporter that records everything and never panics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingReporter {
    failures: Vec<String>,
    aborts: usize,
    traces: usize,
}

impl RecordingReporter {
    /// Creates an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded failure messages, in order.
    #[must_use]
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Returns the number of abort requests.
    #[must_use]
    pub fn abort_count(&self) -> usize {
        self.aborts
    }

    /// Returns the number of trace calls.
    #[must_use]
    pub fn trace_count(&self) -> usize {
        self.traces
    }

    /// Returns `true` if any failure was recorded.
    #[must_use]
    pub fn has_failed(&self) -> bool {
        !self.failures.is_empty()
    }
}

impl Reporter for RecordingReporter {
    fn record_failure(&mut self, message: &str) {
        self.failures.push(message.to_string());
    }

    fn abort(&mut self) {
        self.aborts += 1;
    }

    fn trace(&mut self) {
        self.traces += 1;
    }
}
