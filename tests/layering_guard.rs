//! Layering guardrail: `algoesup_core` holds the value model and report messages and stays free of
//! third-party dependencies, so the runner's text contract can be reused without the rest of the stack.
//!
//! This test scans the core crate's `Cargo.toml` and fails if its `[dependencies]` table lists anything.

#[test]
fn core_crate_has_no_dependencies() {
    let manifest = include_str!("../crates/algoesup_core/Cargo.toml");
    let mut in_dependencies = false;

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if !line_no_comment.is_empty() {
            panic!("`algoesup_core` must not have dependencies, found `{line_no_comment}`");
        }
    }
}
