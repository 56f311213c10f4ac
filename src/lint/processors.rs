//! Turn a checker's raw output into a markdown report.
//!
//! A report is the line `**<checker>** found issues:`, a blank line, then one `- ` bullet per finding. A
//! processor returns `None` when the output has no findings for the checked file.

use regex::Regex;
use serde::Deserialize;

use super::LintError;

/// How a checker's standard output is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputProcessor {
    /// One finding per line, in `<file>:<line>...: <message>` style
    Lines,
    /// `ruff check --output-format json`
    RuffJson,
    /// pytype's `<file>:<line>:...: <message> [<code>]` lines
    Pytype,
}

impl OutputProcessor {
    pub fn report(self, checker: &str, output: &str, filename: &str) -> Result<Option<String>, LintError> {
        match self {
            OutputProcessor::Lines => lines_report(checker, output, filename),
            OutputProcessor::RuffJson => ruff_json_report(checker, output),
            OutputProcessor::Pytype => pytype_report(checker, output, filename),
        }
    }
}

fn markdown(checker: &str, findings: Vec<String>) -> Option<String> {
    if findings.is_empty() {
        return None;
    }
    Some(format!("**{checker}** found issues:\n\n{}", findings.join("\n")))
}

/// Syntax errors are reported when the code itself runs.
fn is_syntax_error(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("syntax") && lower.contains("error")
}

fn file_pattern(filename: &str, tail: &str) -> Result<Regex, LintError> {
    Ok(Regex::new(&format!(r"^.*{}{tail}", regex::escape(filename)))?)
}

/// Keep the part of each line from the line number on.
pub fn lines_report(checker: &str, output: &str, filename: &str) -> Result<Option<String>, LintError> {
    let pattern = file_pattern(filename, r"[^\d]*(\d+[^:]*:.*)")?;
    let findings = output
        .lines()
        .filter(|line| !is_syntax_error(line))
        .filter_map(|line| pattern.captures(line))
        .map(|caps| format!("- {}", &caps[1]))
        .collect();
    Ok(markdown(checker, findings))
}

#[derive(Debug, Deserialize)]
struct RuffDiagnostic {
    code: Option<String>,
    url: Option<String>,
    message: String,
    location: RuffLocation,
    fix: Option<RuffFix>,
}

#[derive(Debug, Deserialize)]
struct RuffLocation {
    row: u64,
}

#[derive(Debug, Deserialize)]
struct RuffFix {
    message: Option<String>,
}

/// Report ruff's JSON diagnostics, in the order ruff emits them.
///
/// ## Errors
/// - `LintError::RuffOutput` if the output is not a JSON array of diagnostics.
pub fn ruff_json_report(checker: &str, output: &str) -> Result<Option<String>, LintError> {
    let diagnostics: Vec<RuffDiagnostic> = serde_json::from_str(output)?;
    let findings = diagnostics
        .into_iter()
        .map(|d| {
            let mut message = d.message;
            if let Some(fix) = d.fix.and_then(|fix| fix.message) {
                message.push_str(&format!(". Suggested fix: {fix}"));
            }
            format!(
                r"- {}: \[[{}]({})\] {message}",
                d.location.row,
                d.code.unwrap_or_default(),
                d.url.unwrap_or_default()
            )
        })
        .collect();
    Ok(markdown(checker, findings))
}

/// Report pytype errors with a link to the documentation of each error code.
pub fn pytype_report(checker: &str, output: &str, filename: &str) -> Result<Option<String>, LintError> {
    let pattern = file_pattern(filename, r"[^\d]*(\d+)[^:]*:(.*)\[(.*)\]")?;
    let findings = output
        .lines()
        .filter(|line| !is_syntax_error(line))
        .filter_map(|line| pattern.captures(line))
        .map(|caps| {
            let (line, message, code) = (&caps[1], &caps[2], &caps[3]);
            format!(r"- {line}:{message}\[[{code}](https://google.github.io/pytype/errors.html#{code})\]")
        })
        .collect();
    Ok(markdown(checker, findings))
}
