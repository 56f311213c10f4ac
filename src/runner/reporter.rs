//! Reporting of runner results.
//!
//! ## TestReporter Trait
//!
//! The runner uses a `TestReporter` trait to separate reporting from
//! validation and execution. The console reporter writes the plain-text
//! report to any `io::Write`, which is how tests capture it.

use std::io::{self, Write};

use algoesup_core::messages;

use super::table::{TableError, TestCase};
use super::{CaseFailure, TestSummary};

/// Trait for reporting test-table results.
pub trait TestReporter {
    /// Called when validation failed; the table is not executed
    fn on_not_tested(&mut self, function: &str, errors: &[TableError]);

    /// Called before the first case runs
    fn on_run_start(&mut self, function: &str, _case_count: usize);

    /// Called after each case; `failure` is `None` for a passing case
    fn on_case_complete(&mut self, _case: &TestCase, _failure: Option<&CaseFailure>) {}

    /// Called when all selected cases have run
    fn on_run_complete(&mut self, function: &str, summary: &TestSummary);
}

/// Default plain-text reporter.
///
/// Output lines:
/// - `Error: <message>.` per validation error, then `<name> was NOT tested.`
/// - `Testing <name>...`, one `<case> FAILED: ...` line per failure, then the `Tests finished: ...` summary.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the reporter and return the writer (e.g. the captured buffer).
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        // Write errors are logged, not propagated.
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %e, "failed to write report line");
        }
    }
}

impl<W: Write> TestReporter for ConsoleReporter<W> {
    fn on_not_tested(&mut self, function: &str, errors: &[TableError]) {
        for error in errors {
            self.line(&messages::error_line(error));
        }
        self.line(&messages::not_tested(function));
    }

    fn on_run_start(&mut self, function: &str, _case_count: usize) {
        self.line(&messages::testing_header(function));
    }

    fn on_case_complete(&mut self, case: &TestCase, failure: Option<&CaseFailure>) {
        if let Some(failure) = failure {
            self.line(&messages::case_failed(&case.name, failure));
        }
    }

    fn on_run_complete(&mut self, _function: &str, summary: &TestSummary) {
        self.line(&messages::tests_finished(
            summary.passed,
            summary.failed,
            summary.percentage(),
        ));
        if let Err(e) = self.out.flush() {
            tracing::warn!(error = %e, "failed to flush report");
        }
    }
}
