//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating bill data, including the
//! half-typed values a live form produces.

use domain_billing::{AdvanceEntry, AdvanceKind, BillContext, BillType, DetailRow, LineItem};
use core_kernel::Percentage;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for well-formed non-negative decimal strings (up to 2 dp)
pub fn decimal_text_strategy() -> impl Strategy<Value = String> {
    (0i64..10_000_000i64, 0u32..3u32).prop_map(|(m, s)| Decimal::new(m, s).to_string())
}

/// Strategy for raw form text: numbers, blanks, and junk
pub fn raw_field_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => decimal_text_strategy(),
        1 => Just(String::new()),
        1 => "[a-z/ -]{1,6}",
    ]
}

/// Strategy for bill percents, including values past 100
pub fn bill_percent_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => Just("100".to_string()),
        2 => (0i64..15_000i64).prop_map(|n| Decimal::new(n, 2).to_string()),
        1 => Just(String::new()),
    ]
}

/// Strategy for detail rows with any mix of raw field values
pub fn detail_row_strategy() -> impl Strategy<Value = DetailRow> {
    (
        "[A-Za-z ]{1,20}",
        raw_field_strategy(),
        raw_field_strategy(),
        raw_field_strategy(),
        bill_percent_strategy(),
        raw_field_strategy(),
    )
        .prop_map(|(description, rate, order, cumulative, percent, secondary)| {
            DetailRow::new(description)
                .with_rate(rate)
                .with_order_qty(order)
                .with_cumulative_qty(cumulative)
                .with_bill_percent(percent)
                .with_secondary_rate(secondary)
        })
}

/// Strategy for line items, mostly detail rows
pub fn line_item_strategy() -> impl Strategy<Value = LineItem> {
    prop_oneof![
        1 => "[A-Z ]{1,16}".prop_map(|title| LineItem::header(title)),
        5 => detail_row_strategy().prop_map(LineItem::Detail),
    ]
}

/// Strategy for advances of either kind
pub fn advance_strategy() -> impl Strategy<Value = AdvanceEntry> {
    (
        raw_field_strategy(),
        prop_oneof![Just(AdvanceKind::Addition), Just(AdvanceKind::Deduction)],
    )
        .prop_map(|(amount, kind)| AdvanceEntry::new("Advance", "2024-01-01", amount, kind))
}

/// Strategy for bill contexts with 0% to 20% housekeeping
pub fn bill_context_strategy() -> impl Strategy<Value = BillContext> {
    (
        prop_oneof![Just(BillType::Running), Just(BillType::Final)],
        0i64..2_000i64,
    )
        .prop_map(|(bill_type, pct)| BillContext {
            bill_type,
            housekeeping_percent: Percentage::new(Decimal::new(pct, 2)),
        })
}
