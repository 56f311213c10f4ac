#![no_main]

use algoesup::json::parse_table_json;
use algoesup::runner::{Arity, parse_table, validate};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(table) = parse_table_json(s) else {
        return;
    };
    for arity in [Arity::Variable, Arity::Fixed(0), Arity::Fixed(1), Arity::Fixed(2)] {
        let errors = validate(&table, arity);
        // Parsing succeeds exactly when validation finds nothing
        assert_eq!(parse_table(&table, arity).is_ok(), errors.is_empty());
    }
});
