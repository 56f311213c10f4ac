//! Property-based tests for the test-table runner
//!
//! These tests use proptest to verify runner invariants across many randomly
//! generated tables, catching edge cases that hand-written tests might miss.

use algoesup::Value;
use algoesup::runner::{Arity, ConsoleReporter, Function, Runner, TestOutcome, validate};
use algoesup_core::messages::pass_percentage;
use proptest::prelude::*;

fn add() -> Function<'static> {
    Function::fixed("add", 2, |args| {
        let a = args[0].as_int().unwrap_or(0);
        let b = args[1].as_int().unwrap_or(0);
        Ok(Value::Int(a + b))
    })
}

fn run(function: &Function<'_>, table: &Value) -> (TestOutcome, String) {
    let mut reporter = ConsoleReporter::new(Vec::new());
    let outcome = Runner::default().run(function, table, &mut reporter);
    (outcome, String::from_utf8(reporter.into_inner()).unwrap())
}

/// A well-formed case for `add`: name, two inputs, and an expected output that may be wrong.
fn case_strategy() -> impl Strategy<Value = Value> {
    ("[a-z][a-z0-9 ]{0,10}", -1000i64..1000, -1000i64..1000, any::<bool>()).prop_map(|(name, a, b, correct)| {
        let expected = if correct { a + b } else { a + b + 1 };
        Value::List(vec![Value::Str(name), Value::Int(a), Value::Int(b), Value::Int(expected)])
    })
}

fn table_strategy() -> impl Strategy<Value = Value> {
    prop::collection::vec(case_strategy(), 0..20).prop_map(Value::List)
}

/// Arbitrary nested values, most of them not tables at all.
fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::None),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        "[a-z]{0,4}".prop_map(Value::Str),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
            prop::collection::vec(inner, 0..6).prop_map(Value::Tuple),
        ]
    })
}

proptest! {
    /// Property: every case of a valid table is counted exactly once
    #[test]
    fn passed_plus_failed_is_table_length(table in table_strategy()) {
        let len = table.as_sequence().map_or(0, <[Value]>::len);
        let (outcome, _) = run(&add(), &table);
        let summary = outcome.summary().unwrap();
        prop_assert_eq!(summary.passed + summary.failed, len);
        prop_assert_eq!(summary.failures.len(), summary.failed);
    }

    /// Property: running the same table twice gives the same report
    #[test]
    fn reports_are_deterministic(table in table_strategy()) {
        let (_, first) = run(&add(), &table);
        let (_, second) = run(&add(), &table);
        prop_assert_eq!(first, second);
    }

    /// Property: a table whose expectations all hold reports 100%
    #[test]
    fn all_correct_cases_pass(pairs in prop::collection::vec((-1000i64..1000, -1000i64..1000), 1..20)) {
        let rows = pairs
            .iter()
            .enumerate()
            .map(|(i, (a, b))| {
                Value::List(vec![Value::Str(format!("case {i}")), Value::Int(*a), Value::Int(*b), Value::Int(a + b)])
            })
            .collect();
        let (outcome, out) = run(&add(), &Value::List(rows));
        let summary = outcome.summary().unwrap();
        prop_assert_eq!(summary.failed, 0);
        prop_assert_eq!(summary.percentage(), 100);
        let expected_summary = format!("Tests finished: {} passed (100%), 0 failed.\n", pairs.len());
        prop_assert!(out.ends_with(&expected_summary));
    }

    /// Property: validation never panics, and a rejected table is never executed
    #[test]
    fn arbitrary_values_are_validated_safely(value in value_strategy()) {
        let errors = validate(&value, Arity::Fixed(2));
        let (outcome, out) = run(&add(), &value);
        prop_assert_eq!(outcome.errors(), errors.as_slice());
        if !errors.is_empty() {
            prop_assert!(out.ends_with("add was NOT tested.\n"));
            prop_assert!(!out.contains("Testing add..."));
        }
    }

    /// Property: the pass percentage is within 0..=100
    #[test]
    fn percentage_is_bounded(passed in 0usize..10_000, failed in 0usize..10_000) {
        let pct = pass_percentage(passed, failed);
        prop_assert!(pct <= 100);
        if failed == 0 && passed > 0 {
            prop_assert_eq!(pct, 100);
        }
    }
}
