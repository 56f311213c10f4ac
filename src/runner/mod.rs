//! Test-table runner
//!
//! Given a function and a table of named cases, the runner:
//!
//! 1. determines the function's arity from its declared [`Signature`],
//! 2. validates the table's shape against it ([`validate`]),
//! 3. executes every case, isolating failures ([`execute`]),
//! 4. reports the outcome through a [`TestReporter`].
//!
//! [`test`] does all of this and prints the report to standard output.
//!
//! ## Example
//! ```rust
//! use algoesup::runner::{ConsoleReporter, Function, Runner};
//! use algoesup_core::{table, Value};
//!
//! let add = Function::fixed("add", 2, |args| {
//!     Ok(Value::Int(args[0].as_int().unwrap_or(0) + args[1].as_int().unwrap_or(0)))
//! });
//! let mut reporter = ConsoleReporter::new(Vec::new());
//! Runner::default().run(&add, &table![["case1", 2, 3, 6]], &mut reporter);
//!
//! let out = String::from_utf8(reporter.into_inner()).unwrap();
//! assert_eq!(out, "Testing add...\ncase1 FAILED: 5 instead of 6\nTests finished: 0 passed (0%), 1 failed.\n");
//! ```

pub mod config;
pub mod function;
pub mod reporter;
pub mod signature;
pub mod table;

use std::fmt;
use std::time::{Duration, Instant};

use algoesup_core::Value;
use algoesup_core::messages;

pub use config::RunnerConfig;
pub use function::{CallResult, Failure, Function};
pub use reporter::{ConsoleReporter, TestReporter};
pub use signature::{Arity, Param, ParamKind, Signature};
pub use table::{TableError, TestCase, TestTable, parse_table, validate};

/// Why one case failed.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseFailure {
    /// The function returned a value unequal to the expected output.
    Mismatch { actual: Value, expected: Value },
    /// The function returned a `Failure` or panicked.
    Raised(Failure),
}

impl fmt::Display for CaseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseFailure::Mismatch { actual, expected } => f.write_str(&messages::mismatch(actual, expected)),
            CaseFailure::Raised(failure) => write!(f, "{failure}"),
        }
    }
}

/// A failing case and why it failed.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedCase {
    pub name: String,
    pub failure: CaseFailure,
}

impl fmt::Display for FailedCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&messages::case_failed(&self.name, &self.failure))
    }
}

/// Summary of executing a table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestSummary {
    pub passed: usize,
    pub failed: usize,
    pub failures: Vec<FailedCase>,
    pub duration: Duration,
}

impl TestSummary {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// Pass percentage, rounded half-to-even; `0` when nothing ran.
    pub fn percentage(&self) -> u32 {
        messages::pass_percentage(self.passed, self.failed)
    }
}

/// What happened to a function and its table.
#[derive(Debug, Clone, PartialEq)]
pub enum TestOutcome {
    /// Validation failed; no case was executed.
    NotTested(Vec<TableError>),
    /// Every selected case was executed.
    Tested(TestSummary),
}

impl TestOutcome {
    pub fn summary(&self) -> Option<&TestSummary> {
        match self {
            TestOutcome::Tested(summary) => Some(summary),
            TestOutcome::NotTested(_) => None,
        }
    }

    pub fn errors(&self) -> &[TableError] {
        match self {
            TestOutcome::NotTested(errors) => errors,
            TestOutcome::Tested(_) => &[],
        }
    }
}

/// Run a single case and compare its result with the expected output.
///
/// ## Returns
/// - `None` if the function returned a value equal to the expected output.
/// - `Some(CaseFailure)` for an unequal value, a returned `Failure`, or a caught panic.
pub fn run_case(function: &Function<'_>, case: &TestCase) -> Option<CaseFailure> {
    match function.call(&case.inputs) {
        Ok(actual) if actual == case.expected => None,
        Ok(actual) => Some(CaseFailure::Mismatch {
            actual,
            expected: case.expected.clone(),
        }),
        Err(failure) => Some(CaseFailure::Raised(failure)),
    }
}

/// Execute a validated table.
///
/// Cases run in table order. A failing case is recorded and never stops the remaining cases unless
/// `config.stop_on_fail` is set.
#[tracing::instrument(skip_all, fields(function = %function.name(), cases = table.len()))]
pub fn execute(
    function: &Function<'_>,
    table: &TestTable,
    config: &RunnerConfig,
    reporter: &mut dyn TestReporter,
) -> TestSummary {
    let start = Instant::now();
    let mut summary = TestSummary::default();

    for case in table.iter().filter(|case| config.selects(&case.name)) {
        let failure = run_case(function, case);
        reporter.on_case_complete(case, failure.as_ref());

        match failure {
            None => {
                tracing::debug!(case = %case.name, "passed");
                summary.passed += 1;
            }
            Some(failure) => {
                tracing::debug!(case = %case.name, %failure, "failed");
                summary.failed += 1;
                summary.failures.push(FailedCase {
                    name: case.name.clone(),
                    failure,
                });
                if config.stop_on_fail {
                    break;
                }
            }
        }
    }

    summary.duration = start.elapsed();
    summary
}

/// Validate-then-execute orchestration.
#[derive(Debug, Clone, Default)]
pub struct Runner {
    config: RunnerConfig,
}

impl Runner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Test `function` against `table`, reporting through `reporter`.
    ///
    /// Never panics: an opaque function or a malformed table is reported as `TestOutcome::NotTested`.
    #[tracing::instrument(skip_all, fields(function = %function.name()))]
    pub fn run(&self, function: &Function<'_>, table: &Value, reporter: &mut dyn TestReporter) -> TestOutcome {
        let parsed = function
            .arity()
            .map_err(|e| vec![e])
            .and_then(|arity| parse_table(table, arity));

        let table = match parsed {
            Ok(table) => table,
            Err(errors) => {
                tracing::debug!(errors = errors.len(), "table rejected");
                reporter.on_not_tested(function.name(), &errors);
                return TestOutcome::NotTested(errors);
            }
        };

        reporter.on_run_start(function.name(), table.len());
        let summary = execute(function, &table, &self.config, reporter);
        reporter.on_run_complete(function.name(), &summary);
        tracing::info!(passed = summary.passed, failed = summary.failed, "tests finished");
        TestOutcome::Tested(summary)
    }
}

/// Test `function` with `table` and print the report to standard output.
pub fn test(function: &Function<'_>, table: &Value) {
    let mut reporter = ConsoleReporter::stdout();
    Runner::default().run(function, table, &mut reporter);
}
