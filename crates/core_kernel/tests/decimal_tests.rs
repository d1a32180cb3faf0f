//! Tests for lenient decimal parsing and percentages

use core_kernel::{is_well_formed, parse_lenient, Percentage};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_form_values_as_typed() {
    let cases = [
        ("45", dec!(45)),
        ("2700", dec!(2700)),
        ("3021.5", dec!(3021.5)),
        ("  871 ", dec!(871)),
        ("100%", dec!(100)),
        ("", Decimal::ZERO),
        ("abc", Decimal::ZERO),
        ("--5", Decimal::ZERO),
    ];

    for (raw, expected) in cases {
        assert_eq!(parse_lenient(raw), expected, "parsing {raw:?}");
    }
}

#[test]
fn test_parsing_is_repeatable() {
    for raw in ["45.10", "1e2", "-0.0", "x"] {
        let first = parse_lenient(raw);
        let second = parse_lenient(raw);
        assert_eq!(first.serialize(), second.serialize());
    }
}

#[test]
fn test_well_formed_matches_full_read() {
    assert!(is_well_formed("100"));
    assert!(!is_well_formed("100%"));
}

#[test]
fn test_percentage_serde_is_transparent() {
    let pct: Percentage = serde_json::from_str("\"12.5\"").unwrap();
    assert_eq!(pct.value(), dec!(12.5));
    assert_eq!(pct.apply(dec!(200)), dec!(25));
}
