//! Provide the value model and canonical report messages shared by the algoesup tools.
//!
//! This crate is intentionally small and dependency-free. It contains:
//! - [`Value`], the loosely-typed sum type test tables are written in, with the equality and display rules the
//!   reports rely on, and
//! - [`messages`], the user-facing message texts so the runner, the CLI and the tests stay aligned.
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state, no runner-specific types.

pub mod messages;
pub mod value;

pub use value::Value;

/// Build a test table [`Value`] from rows of plain Rust literals.
///
/// Each row becomes a `Value::List` and every element is converted with `Value::from`, so rows can mix strings,
/// integers, floats, booleans and nested arrays.
///
/// ## Examples
/// ```rust
/// use algoesup_core::{table, Value};
///
/// let t = table![["two plus three", 2, 3, 5], ["empty", 0]];
/// let Value::List(rows) = &t else { panic!("not a list") };
/// assert_eq!(rows.len(), 2);
/// assert_eq!(table![], Value::List(vec![]));
/// ```
#[macro_export]
macro_rules! table {
    ($([$($item:expr),* $(,)?]),* $(,)?) => {
        $crate::Value::List(vec![$($crate::Value::List(vec![$($crate::Value::from($item)),*])),*])
    };
}
