//! Snapshot tests for report text
//!
//! The runner, timing and lint reports are user-facing text, so changes to
//! them should be reviewed.
//!
//! Run with: `cargo test --test report_snapshot_tests`
//! Review changes: `cargo insta review`

use algoesup::json::parse_table_json;
use algoesup::lint::processors::{lines_report, ruff_json_report};
use algoesup::runner::{ConsoleReporter, Failure, Function, Runner};
use algoesup::timing::RunTimes;
use algoesup::{Value, table};

fn report(function: &Function<'_>, table: &Value) -> String {
    let mut reporter = ConsoleReporter::new(Vec::new());
    Runner::default().run(function, table, &mut reporter);
    String::from_utf8(reporter.into_inner()).expect("report is UTF-8")
}

fn largest() -> Function<'static> {
    Function::fixed("largest", 1, |args| match &args[0] {
        Value::List(items) if items.is_empty() => Err(Failure::new("max() arg is an empty sequence")),
        Value::List(items) => {
            let mut best = items[0].as_int().ok_or_else(|| Failure::type_error("int", &items[0]))?;
            for item in &items[1..] {
                best = best.max(item.as_int().ok_or_else(|| Failure::type_error("int", item))?);
            }
            Ok(Value::Int(best))
        }
        other => Err(Failure::type_error("list", other)),
    })
}

#[test]
fn test_mixed_run_report() {
    let table = table![
        ["one item", [5], 5],
        ["ascending", [1, 2, 3], 3],
        ["empty", Vec::<i64>::new(), Value::None],
        ["wrong expectation", [4, 9], 4],
        ["text", "abc", "c"],
    ];
    insta::assert_snapshot!(report(&largest(), &table).trim_end(), @r"
    Testing largest...
    empty FAILED: max() arg is an empty sequence
    wrong expectation FAILED: 9 instead of 4
    text FAILED: expected list, got str
    Tests finished: 2 passed (40%), 3 failed.
    ");
}

#[test]
fn test_validation_report() {
    let table = parse_table_json(r#"[["ok", [1], 1], "not a case", ["no inputs", 1], ["two inputs", [1], 2, 2]]"#)
        .expect("valid JSON");
    insta::assert_snapshot!(report(&largest(), &table).trim_end(), @r#"
    Error: test case 2 must be a list or tuple.
    Error: test case "no inputs" has 0 input(s) instead of 1.
    Error: test case "two inputs" has 2 input(s) instead of 1.
    largest was NOT tested.
    "#);
}

#[test]
fn test_run_times_table() {
    let times = RunTimes {
        sizes: vec![100, 200, 400],
        unit: "µs",
        series: vec![
            ("best case".to_string(), vec![1.04, 2.11, 4.26]),
            ("worst case scenario".to_string(), vec![10.0, 40.33, 160.9]),
        ],
    };
    let rendered = times.render("Run-times for largest", "Input size");
    let text: Vec<&str> = rendered.lines().map(str::trim_end).collect();
    insta::assert_snapshot!(text.join("\n"), @r"
    Run-times for largest

    Input size       best case worst case scen
           100             1.0            10.0 µs
           200             2.1            40.3 µs
           400             4.3           160.9 µs
    ");
}

#[test]
fn test_lint_reports() {
    let output = "/tmp/tmpq1.py:3: 'while' is not allowed\n/tmp/tmpq1.py:5: 'break' is not allowed\n";
    let allowed = lines_report("allowed", output, "/tmp/tmpq1.py")
        .expect("valid pattern")
        .expect("two findings");
    insta::assert_snapshot!(allowed, @r"
    **allowed** found issues:

    - 3: 'while' is not allowed
    - 5: 'break' is not allowed
    ");

    let json = r#"[{"code": "E741", "url": "https://docs.astral.sh/ruff/rules/ambiguous-variable-name",
                    "message": "Ambiguous variable name: `l`", "location": {"row": 2}, "fix": null}]"#;
    let ruff = ruff_json_report("ruff", json).expect("valid JSON").expect("one finding");
    insta::assert_snapshot!(ruff, @r"
    **ruff** found issues:

    - 2: \[[E741](https://docs.astral.sh/ruff/rules/ambiguous-variable-name)\] Ambiguous variable name: `l`
    ");
}
