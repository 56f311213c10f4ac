//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::Path;

use algoesup_core::{Value, messages};

use crate::json::load_table;
use crate::lint::CheckerRegistry;
use crate::runner::{Arity, validate};

use super::{CliError, CliResult, ExitCode};

/// Checker used by `lint` when none is named.
pub const DEFAULT_CHECKER: &str = "ruff";

/// Build the validation report for `table`.
///
/// ## Returns
/// - `Ok(line)` with `<name>: <n> test case(s) are well-formed.` for a valid table.
/// - `Err(report)` with one `Error: ...` line per problem and the not-tested line.
pub fn table_report(table: &Value, arity: Arity, name: &str) -> Result<String, String> {
    let errors = validate(table, arity);
    if errors.is_empty() {
        let count = table.as_sequence().map_or(0, <[Value]>::len);
        return Ok(format!("{name}: {count} test case(s) are well-formed."));
    }

    let mut report: Vec<String> = errors.iter().map(messages::error_line).collect();
    report.push(messages::not_tested(name));
    Err(report.join("\n"))
}

/// Validate the JSON table in `path`.
pub fn check_table(path: &Path, arity: Arity, name: &str) -> CliResult<ExitCode> {
    let table = load_table(path).map_err(|e| CliError::failure(format!("Error: {e}")))?;

    match table_report(&table, arity, name) {
        Ok(line) => {
            println!("{line}");
            Ok(ExitCode::SUCCESS)
        }
        Err(report) => {
            println!("{report}");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Activate the named checkers, `ruff` if none is named.
pub fn lint_registry(checkers: &[String], allowed_config: Option<&str>) -> CliResult<CheckerRegistry> {
    let mut registry = CheckerRegistry::new();
    if allowed_config.is_some() {
        registry.configure_allowed(allowed_config, None);
    }

    let names: Vec<&str> = if checkers.is_empty() {
        vec![DEFAULT_CHECKER]
    } else {
        checkers.iter().map(String::as_str).collect()
    };
    for name in names {
        if !registry.activate(name) {
            return Err(CliError::failure(format!("Error: checker {name} isn't defined.")));
        }
    }
    Ok(registry)
}

/// Run the selected checkers on a Python file and print their reports.
pub fn lint_file(path: &Path, checkers: &[String], allowed_config: Option<&str>) -> CliResult<ExitCode> {
    let registry = lint_registry(checkers, allowed_config)?;
    let reports = registry
        .run_on_file(path)
        .map_err(|e| CliError::failure(e.to_string()))?;

    if !reports.is_empty() {
        println!("{}", reports.join("\n\n"));
    }
    Ok(ExitCode::SUCCESS)
}

/// Print each registered checker's state and command.
pub fn list_checkers() -> CliResult<ExitCode> {
    let mut registry = CheckerRegistry::new();
    let names: Vec<String> = registry.names().map(str::to_string).collect();
    for name in names {
        println!("{}", registry.checker_command(&name));
    }
    Ok(ExitCode::SUCCESS)
}
