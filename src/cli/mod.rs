//! CLI module for algoesup
//!
//! ## Commands
//!
//! - `check <table.json> --arity <N|variable>` - Validate a JSON test table
//! - `lint <file>` - Run code checkers on a Python file
//! - `checkers` - List the registered checkers
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::runner::Arity;

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Test tables, run-times and code checks for algorithmic exercises
#[derive(Parser, Debug)]
#[command(name = "algoesup")]
#[command(version = VERSION)]
#[command(about = "Test tables, run-times and code checks for algorithmic exercises", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a JSON test table against a function's arity
    Check {
        /// JSON file holding the table
        #[arg(value_name = "TABLE")]
        table: PathBuf,
        /// Number of inputs per case, or `variable`
        #[arg(short, long, value_name = "N|variable")]
        arity: Arity,
        /// Function name used in the report
        #[arg(short, long, default_value = "function")]
        name: String,
    },

    /// Run code checkers on a Python file
    Lint {
        /// Python file to check
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Checker to run (repeatable; default: ruff)
        #[arg(short = 'c', long = "checker", value_name = "NAME")]
        checkers: Vec<String>,
        /// Configuration file for the `allowed` checker
        #[arg(long, value_name = "CONFIG")]
        allowed_config: Option<String>,
    },

    /// List the registered checkers and their commands
    Checkers,
}

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Check { table, arity, name } => commands::check_table(&table, arity, &name),
        Command::Lint {
            file,
            checkers,
            allowed_config,
        } => commands::lint_file(&file, &checkers, allowed_config.as_deref()),
        Command::Checkers => commands::list_checkers(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::try_parse_from(["algoesup", "check", "table.json", "--arity", "2"]).unwrap();
        if let Command::Check { table, arity, name } = cli.command {
            assert_eq!(table, PathBuf::from("table.json"));
            assert_eq!(arity, Arity::Fixed(2));
            assert_eq!(name, "function");
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_cli_parse_check_variable_arity() {
        let cli = Cli::try_parse_from(["algoesup", "check", "t.json", "-a", "variable", "-n", "sum"]).unwrap();
        if let Command::Check { arity, name, .. } = cli.command {
            assert_eq!(arity, Arity::Variable);
            assert_eq!(name, "sum");
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_cli_rejects_bad_arity() {
        assert!(Cli::try_parse_from(["algoesup", "check", "t.json", "--arity", "two"]).is_err());
        assert!(Cli::try_parse_from(["algoesup", "check", "t.json"]).is_err());
    }

    #[test]
    fn test_cli_parse_lint() {
        let cli = Cli::try_parse_from([
            "algoesup",
            "lint",
            "solution.py",
            "-c",
            "ruff",
            "--checker",
            "allowed",
            "--allowed-config",
            "m269.json",
        ])
        .unwrap();
        if let Command::Lint {
            file,
            checkers,
            allowed_config,
        } = cli.command
        {
            assert_eq!(file, PathBuf::from("solution.py"));
            assert_eq!(checkers, ["ruff", "allowed"]);
            assert_eq!(allowed_config.as_deref(), Some("m269.json"));
        } else {
            panic!("Expected Lint command");
        }
    }

    #[test]
    fn test_cli_parse_checkers() {
        let cli = Cli::try_parse_from(["algoesup", "checkers"]).unwrap();
        assert!(matches!(cli.command, Command::Checkers));
    }

    #[test]
    fn test_cli_requires_a_command() {
        assert!(Cli::try_parse_from(["algoesup"]).is_err());
    }
}
