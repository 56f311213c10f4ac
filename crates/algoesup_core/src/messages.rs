//! Shared user-facing report messages.
//!
//! The runner prints these, the CLI prints these, and the tests compare against these. Message bodies carry no
//! trailing period; the reporter adds the `Error: ` prefix and the final `.`.

use std::fmt::Display;

/// Describe a table that is not a list or tuple.
pub const TABLE_NOT_SEQUENCE_MSG: &str = "the table must be a list or tuple";

/// Prefix of every validation error line.
pub const ERROR_PREFIX: &str = "Error: ";

/// Message for a case (1-based `case_num`) that is not a list or tuple.
pub fn case_not_sequence(case_num: usize) -> String {
    format!("test case {case_num} must be a list or tuple")
}

/// Message for a case with fewer than two elements.
pub fn case_too_short(case_num: usize) -> String {
    format!("test case {case_num} must have at least two elements")
}

/// Message for a case whose first element is not a string.
pub fn case_name_not_text(case_num: usize) -> String {
    format!("test case {case_num} must have a string as first element")
}

/// Message for a case whose input count disagrees with a fixed arity.
pub fn arity_mismatch(name: &str, given: usize, expected: usize) -> String {
    format!("test case \"{name}\" has {given} input(s) instead of {expected}")
}

/// Message for a callable whose parameters cannot be introspected.
pub fn unknown_arity(function: &str) -> String {
    format!("cannot determine the arity of {function}")
}

/// One validation error line: `Error: <message>.`
pub fn error_line(message: impl Display) -> String {
    format!("{ERROR_PREFIX}{message}.")
}

/// Final line when validation failed.
pub fn not_tested(function: &str) -> String {
    format!("{function} was NOT tested.")
}

/// Header printed before executing a valid table.
pub fn testing_header(function: &str) -> String {
    format!("Testing {function}...")
}

/// Description of a wrong result.
pub fn mismatch(actual: impl Display, expected: impl Display) -> String {
    format!("{actual} instead of {expected}")
}

/// Line printed for a failing case.
pub fn case_failed(case: &str, detail: impl Display) -> String {
    format!("{case} FAILED: {detail}")
}

/// Summary line printed after executing a table.
pub fn tests_finished(passed: usize, failed: usize, percentage: u32) -> String {
    format!("Tests finished: {passed} passed ({percentage}%), {failed} failed.")
}

/// Pass percentage, rounded half-to-even, `0` for an empty run.
///
/// ## Examples
/// ```rust
/// use algoesup_core::messages::pass_percentage;
/// assert_eq!(pass_percentage(0, 0), 0);
/// assert_eq!(pass_percentage(1, 1), 50);
/// assert_eq!(pass_percentage(1, 7), 12); // 12.5 rounds to even
/// ```
pub fn pass_percentage(passed: usize, failed: usize) -> u32 {
    let total = passed + failed;
    if total == 0 {
        return 0;
    }
    let ratio = passed as f64 / total as f64 * 100.0;
    ratio.round_ties_even() as u32
}
