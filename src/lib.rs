#![forbid(unsafe_code)]
//! Algorithmic exercise support
//!
//! Table-driven testing of functions, run-time measurement, and markdown reports from external code checkers.
//!
//! - [`runner`]: validate a table of named cases against a function's arity, run it, and report
//! - [`timing`]: measure run-times on generated inputs of doubling sizes
//! - [`lint`]: run code checkers on Python source
//! - [`json`]: load tables from JSON
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Functions under test**: A panic inside a function body is caught by the runner and reported as a failed
//!   case; it never aborts the run. The panic hook stays quiet for those panics, so the failure appears once, in
//!   the report.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod json;
pub mod lint;
pub mod runner;
pub mod timing;

pub use algoesup_core::{Value, table};

pub use runner::{Function, Runner, RunnerConfig, Signature, test};
