//! Run external code checkers on Python source and report their findings as markdown.
//!
//! A [`CheckerRegistry`] maps checker names to shell commands and output processors, and keeps the set of
//! active checkers. Three checkers are registered initially (`pytype`, `allowed`, `ruff`), none of them
//! active. The `*_command` methods return the message to show the user.

pub mod processors;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::Command;
use std::str::FromStr;

use thiserror::Error;

pub use processors::OutputProcessor;

#[derive(Debug, Error)]
pub enum LintError {
    #[error("Error on writing cell to a temporary file:\n{0}")]
    TempFile(#[source] io::Error),

    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid ruff output: {0}")]
    RuffOutput(#[from] serde_json::Error),

    #[error("invalid output pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("unknown status {0:?}, expected on or off")]
    UnknownStatus(String),
}

/// Requested state of a checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    On,
    Off,
}

impl FromStr for Status {
    type Err = LintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "on" => Ok(Status::On),
            "off" => Ok(Status::Off),
            _ => Err(LintError::UnknownStatus(s.to_string())),
        }
    }
}

/// A shell command and how to read its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checker {
    /// Run with the checked file's path appended
    pub command: String,
    pub processor: OutputProcessor,
}

impl Checker {
    pub fn new(command: impl Into<String>, processor: OutputProcessor) -> Self {
        Self {
            command: command.into(),
            processor,
        }
    }
}

impl fmt::Display for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command)
    }
}

#[derive(Debug, Clone)]
pub struct CheckerRegistry {
    checkers: BTreeMap<String, Checker>,
    active: BTreeSet<String>,
}

impl Default for CheckerRegistry {
    fn default() -> Self {
        let checkers = [
            ("pytype", Checker::new("pytype", OutputProcessor::Pytype)),
            ("allowed", Checker::new("allowed", OutputProcessor::Lines)),
            ("ruff", Checker::new("ruff check --output-format json", OutputProcessor::RuffJson)),
        ]
        .into_iter()
        .map(|(name, checker)| (name.to_string(), checker))
        .collect();
        Self {
            checkers,
            active: BTreeSet::new(),
        }
    }
}

impl CheckerRegistry {
    /// A registry with the default checkers, all inactive.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with no checkers at all.
    pub fn empty() -> Self {
        Self {
            checkers: BTreeMap::new(),
            active: BTreeSet::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Checker> {
        self.checkers.get(name)
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.checkers.keys().map(String::as_str)
    }

    pub fn active_names(&self) -> impl Iterator<Item = &str> {
        self.active.iter().map(String::as_str)
    }

    pub fn inactive_names(&self) -> impl Iterator<Item = &str> {
        self.names().filter(move |name| !self.is_active(name))
    }

    /// Register or replace a checker and activate it.
    ///
    /// ## Returns
    /// - `true` if a checker with that name already existed.
    pub fn define(&mut self, name: &str, checker: Checker) -> bool {
        let existed = self.checkers.insert(name.to_string(), checker).is_some();
        self.active.insert(name.to_string());
        existed
    }

    /// Activate a registered checker; returns `false` if `name` isn't registered.
    pub fn activate(&mut self, name: &str) -> bool {
        if !self.checkers.contains_key(name) {
            return false;
        }
        self.active.insert(name.to_string());
        true
    }

    /// Deactivate a registered checker; returns `false` if `name` isn't registered.
    pub fn deactivate(&mut self, name: &str) -> bool {
        if !self.checkers.contains_key(name) {
            return false;
        }
        self.active.remove(name);
        true
    }

    /// Show or change the state of a built-in checker.
    ///
    /// ## Returns
    /// `<name> is active|inactive` without a status, otherwise `<name> was activated|deactivated`.
    pub fn status(&mut self, name: &str, status: Option<Status>) -> String {
        match status {
            None => {
                let state = if self.is_active(name) { "active" } else { "inactive" };
                format!("{name} is {state}")
            }
            Some(Status::On) => {
                self.active.insert(name.to_string());
                format!("{name} was activated")
            }
            Some(Status::Off) => {
                self.active.remove(name);
                format!("{name} was deactivated")
            }
        }
    }

    /// Configure the `allowed` checker to use `config`, then show or change its state.
    pub fn configure_allowed(&mut self, config: Option<&str>, status: Option<Status>) -> String {
        let command = match config {
            Some(config) => format!("allowed -c {config}"),
            None => "allowed".to_string(),
        };
        self.checkers
            .insert("allowed".to_string(), Checker::new(command, OutputProcessor::Lines));
        self.status("allowed", status)
    }

    /// Interpret a `checker` command line.
    ///
    /// - empty: list the active and inactive checkers
    /// - `NAME`: show the checker's state and command
    /// - `NAME on` / `NAME off`: change its state
    /// - `NAME COMMAND...`: define or redefine it and activate it; its output is read line by line
    pub fn checker_command(&mut self, line: &str) -> String {
        let args: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, rest)) = args.split_first() else {
            return self.listing();
        };

        match rest {
            [] => match self.get(name) {
                None => format!("Checker {name} isn't defined."),
                Some(checker) => {
                    let state = if self.is_active(name) { "active" } else { "inactive" };
                    format!("Checker {name} is {state} and defined as '{checker}'.")
                }
            },
            [status] if status.eq_ignore_ascii_case("on") => {
                if self.activate(name) {
                    format!("Checker {name} has been activated.")
                } else {
                    format!("Error: checker {name} isn't defined.")
                }
            }
            [status] if status.eq_ignore_ascii_case("off") => {
                if self.deactivate(name) {
                    format!("Checker {name} has been deactivated.")
                } else {
                    format!("Error: checker {name} isn't defined.")
                }
            }
            command => {
                let checker = Checker::new(command.join(" "), OutputProcessor::Lines);
                let state = if self.define(name, checker) { "redefined" } else { "defined" };
                format!("Checker {name} has been {state} and activated.")
            }
        }
    }

    fn listing(&self) -> String {
        let mut active = String::from("Active checkers:");
        for name in self.active_names() {
            active.push(' ');
            active.push_str(name);
        }
        let mut inactive = String::from("Inactive checkers:");
        for name in self.inactive_names() {
            inactive.push(' ');
            inactive.push_str(name);
        }
        format!("{active}\n{inactive}")
    }

    /// Run every active checker on `source` and collect their markdown reports.
    ///
    /// The source is written to a temporary `.py` file that is removed afterwards. A checker that cannot be
    /// run, or whose output cannot be read, contributes an `Error on executing <command>:` report; the
    /// other checkers still run.
    ///
    /// ## Errors
    /// - `LintError::TempFile` if the temporary file cannot be written.
    #[tracing::instrument(skip_all, fields(active = self.active.len()))]
    pub fn run_checkers(&self, source: &str) -> Result<Vec<String>, LintError> {
        if self.active.is_empty() {
            return Ok(Vec::new());
        }

        let mut file = tempfile::Builder::new()
            .suffix(".py")
            .tempfile()
            .map_err(LintError::TempFile)?;
        file.write_all(source.as_bytes()).map_err(LintError::TempFile)?;
        file.flush().map_err(LintError::TempFile)?;
        let filename = file.path().display().to_string();

        let mut reports = Vec::new();
        for name in &self.active {
            let Some(checker) = self.checkers.get(name) else {
                continue;
            };
            let command = format!("{} {filename}", checker.command);
            tracing::debug!(checker = %name, %command, "running checker");

            let report = run_command(&command)
                .map_err(|e| e.to_string())
                .and_then(|output| {
                    checker
                        .processor
                        .report(name, &output, &filename)
                        .map_err(|e| e.to_string())
                });
            match report {
                Ok(Some(report)) => reports.push(report),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(checker = %name, error = %e, "checker failed");
                    reports.push(format!("Error on executing {command}:\n{e}"));
                }
            }
        }
        Ok(reports)
    }

    /// Read a Python file and run the active checkers on its contents.
    pub fn run_on_file(&self, path: &Path) -> Result<Vec<String>, LintError> {
        let source = fs::read_to_string(path).map_err(|source| LintError::Read {
            path: path.display().to_string(),
            source,
        })?;
        self.run_checkers(&source)
    }
}

/// Run `command` through the shell and return its standard output.
fn run_command(command: &str) -> io::Result<String> {
    let output = Command::new("sh").arg("-c").arg(command).output()?;
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
