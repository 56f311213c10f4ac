//! Test tables: structural validation of loosely-typed input and the typed form the executor consumes.

use algoesup_core::Value;
use algoesup_core::messages;
use thiserror::Error;

use super::signature::Arity;

/// A structural or arity problem that prevents a table from being executed.
///
/// `Display` renders the bare message; the reporter adds the `Error: ` prefix and the final period.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("{}", messages::TABLE_NOT_SEQUENCE_MSG)]
    NotSequence,

    #[error("{}", messages::case_not_sequence(*.case_num))]
    CaseNotSequence { case_num: usize },

    #[error("{}", messages::case_too_short(*.case_num))]
    CaseTooShort { case_num: usize },

    #[error("{}", messages::case_name_not_text(*.case_num))]
    CaseNameNotText { case_num: usize },

    #[error("{}", messages::arity_mismatch(.name, *.given, *.expected))]
    ArityMismatch { name: String, given: usize, expected: usize },

    #[error("{}", messages::unknown_arity(.function))]
    UnknownArity { function: String },
}

/// One validated row: `[name, inputs..., expected]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub name: String,
    pub inputs: Vec<Value>,
    pub expected: Value,
}

impl TestCase {
    pub fn new(name: impl Into<String>, inputs: Vec<Value>, expected: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            inputs,
            expected: expected.into(),
        }
    }
}

/// An ordered, validated collection of test cases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestTable {
    pub cases: Vec<TestCase>,
}

impl TestTable {
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.cases.iter()
    }
}

impl FromIterator<TestCase> for TestTable {
    fn from_iter<I: IntoIterator<Item = TestCase>>(iter: I) -> Self {
        Self {
            cases: iter.into_iter().collect(),
        }
    }
}

/// Check the shape of `table` against `arity`.
///
/// ## Returns
/// - One error per offending case, in table order. A non-sequence table yields exactly one error.
///
/// ## Notes
/// - Per case, only the first failing check is reported: not a sequence, fewer than two elements, non-string
///   name, then (for `Arity::Fixed`) the input count.
pub fn validate(table: &Value, arity: Arity) -> Vec<TableError> {
    let Some(rows) = table.as_sequence() else {
        return vec![TableError::NotSequence];
    };
    rows.iter()
        .enumerate()
        .filter_map(|(i, row)| check_case(i + 1, row, arity))
        .collect()
}

fn check_case(case_num: usize, row: &Value, arity: Arity) -> Option<TableError> {
    let Some(items) = row.as_sequence() else {
        return Some(TableError::CaseNotSequence { case_num });
    };
    if items.len() < 2 {
        return Some(TableError::CaseTooShort { case_num });
    }
    let Some(name) = items[0].as_str() else {
        return Some(TableError::CaseNameNotText { case_num });
    };
    match arity {
        Arity::Fixed(expected) if items.len() - 2 != expected => Some(TableError::ArityMismatch {
            name: name.to_string(),
            given: items.len() - 2,
            expected,
        }),
        _ => None,
    }
}

/// Validate `table` and convert it into its typed form.
///
/// ## Errors
/// - The full validation report if any case is malformed.
pub fn parse_table(table: &Value, arity: Arity) -> Result<TestTable, Vec<TableError>> {
    let errors = validate(table, arity);
    if !errors.is_empty() {
        return Err(errors);
    }
    let rows = table.as_sequence().unwrap_or_default();
    Ok(rows.iter().filter_map(to_case).collect())
}

fn to_case(row: &Value) -> Option<TestCase> {
    let items = row.as_sequence()?;
    let (name, rest) = items.split_first()?;
    let (expected, inputs) = rest.split_last()?;
    Some(TestCase {
        name: name.as_str()?.to_string(),
        inputs: inputs.to_vec(),
        expected: expected.clone(),
    })
}
