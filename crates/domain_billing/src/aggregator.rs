//! Bill aggregation
//!
//! Rolls line items up into grand totals and settles them against advances
//! and housekeeping to reach the net payable amount.
//!
//! # Invariants
//!
//! - Header rows contribute nothing to any total
//! - Row order and row kinds are preserved in the output
//! - Identical input always yields identical output; nothing is cached
//! - Aggregation never fails: unreadable numbers have already become zero

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::trace;

use crate::advance::{AdvanceEntry, AdvanceTotals};
use crate::context::BillContext;
use crate::line_item::{derive_line_item, DerivedDetail, DerivedLineItem, LineItem};

/// Sums of the derived amounts over all detail rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GrandTotals {
    pub order_amount: Decimal,
    pub cumulative_amount: Decimal,
    pub variance_amount: Decimal,
    pub bill_amount: Decimal,
    pub secondary_amount: Decimal,
}

impl GrandTotals {
    /// Adds one detail row into the totals
    pub fn accumulate(self, detail: &DerivedDetail) -> Self {
        Self {
            order_amount: self.order_amount.saturating_add(detail.order_amount),
            cumulative_amount: self.cumulative_amount.saturating_add(detail.cumulative_amount),
            variance_amount: self.variance_amount.saturating_add(detail.variance_amount),
            bill_amount: self.bill_amount.saturating_add(detail.bill_amount),
            secondary_amount: self.secondary_amount.saturating_add(detail.secondary_amount),
        }
    }

    /// Totals over the detail rows of a derived list, skipping headers
    pub fn from_items(items: &[DerivedLineItem]) -> Self {
        items
            .iter()
            .filter_map(DerivedLineItem::as_detail)
            .fold(Self::default(), Self::accumulate)
    }
}

/// Everything a bill view or export needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillSummary {
    /// Derived rows in input order
    pub items: Vec<DerivedLineItem>,
    pub totals: GrandTotals,
    pub total_additions: Decimal,
    pub total_deductions: Decimal,
    pub housekeeping_amount: Decimal,
    pub net_payable: Decimal,
}

/// Housekeeping deducted from a bill
///
/// Only final bills with a positive housekeeping percent pay it; running
/// bills never do, whatever percent is configured.
pub fn housekeeping_amount(bill_amount: Decimal, context: &BillContext) -> Decimal {
    if context.applies_housekeeping() {
        context.housekeeping_percent.apply(bill_amount)
    } else {
        Decimal::ZERO
    }
}

/// bill amount + additions − housekeeping − deductions
pub fn net_payable(
    bill_amount: Decimal,
    total_additions: Decimal,
    housekeeping_amount: Decimal,
    total_deductions: Decimal,
) -> Decimal {
    bill_amount
        .saturating_add(total_additions)
        .saturating_sub(housekeeping_amount)
        .saturating_sub(total_deductions)
}

/// Derives every line item and settles the bill
///
/// # Arguments
///
/// * `items` - Bill rows in display order
/// * `advances` - Additions and deductions entered beside the bill
/// * `context` - Bill type and housekeeping percent
pub fn aggregate(items: &[LineItem], advances: &[AdvanceEntry], context: &BillContext) -> BillSummary {
    let derived: Vec<DerivedLineItem> = items.iter().map(derive_line_item).collect();
    let totals = GrandTotals::from_items(&derived);

    let advance_totals = AdvanceTotals::from_entries(advances);
    let housekeeping = housekeeping_amount(totals.bill_amount, context);
    let net = net_payable(
        totals.bill_amount,
        advance_totals.additions,
        housekeeping,
        advance_totals.deductions,
    );

    trace!(
        items = items.len(),
        advances = advances.len(),
        bill_type = ?context.bill_type,
        bill_amount = %totals.bill_amount,
        net_payable = %net,
        "Aggregated bill"
    );

    BillSummary {
        items: derived,
        totals,
        total_additions: advance_totals.additions,
        total_deductions: advance_totals.deductions,
        housekeeping_amount: housekeeping,
        net_payable: net,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::advance::{AdvanceEntry, AdvanceKind};
    use crate::context::BillType;
    use crate::line_item::DetailRow;
    use core_kernel::Percentage;
    use proptest::prelude::*;

    fn raw_number() -> impl Strategy<Value = String> {
        prop_oneof![
            (0i64..100_000i64).prop_map(|n| n.to_string()),
            (0i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2).to_string()),
            Just(String::new()),
            "[a-z]{1,5}",
        ]
    }

    fn line_item() -> impl Strategy<Value = LineItem> {
        prop_oneof![
            1 => "[A-Z ]{1,12}".prop_map(|title| LineItem::header(title)),
            4 => (raw_number(), raw_number(), raw_number(), raw_number(), raw_number()).prop_map(
                |(rate, order, cumulative, percent, secondary)| {
                    LineItem::Detail(
                        DetailRow::new("Item")
                            .with_rate(rate)
                            .with_order_qty(order)
                            .with_cumulative_qty(cumulative)
                            .with_bill_percent(percent)
                            .with_secondary_rate(secondary),
                    )
                }
            ),
        ]
    }

    fn advance() -> impl Strategy<Value = AdvanceEntry> {
        (raw_number(), prop_oneof![Just(AdvanceKind::Addition), Just(AdvanceKind::Deduction)])
            .prop_map(|(amount, kind)| AdvanceEntry::new("Advance", "", amount, kind))
    }

    fn context() -> impl Strategy<Value = BillContext> {
        (prop_oneof![Just(BillType::Running), Just(BillType::Final)], 0i64..2000i64).prop_map(
            |(bill_type, pct)| BillContext {
                bill_type,
                housekeeping_percent: Percentage::new(Decimal::new(pct, 2)),
            },
        )
    }

    proptest! {
        #[test]
        fn aggregate_is_repeatable(
            items in prop::collection::vec(line_item(), 0..20),
            advances in prop::collection::vec(advance(), 0..5),
            ctx in context()
        ) {
            let first = aggregate(&items, &advances, &ctx);
            let second = aggregate(&items, &advances, &ctx);
            prop_assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
            prop_assert_eq!(first, second);
        }

        #[test]
        fn headers_do_not_change_totals(
            items in prop::collection::vec(line_item(), 0..20),
            ctx in context()
        ) {
            let without_headers: Vec<LineItem> =
                items.iter().filter(|item| !item.is_header()).cloned().collect();

            let with = aggregate(&items, &[], &ctx);
            let without = aggregate(&without_headers, &[], &ctx);

            prop_assert_eq!(with.totals, without.totals);
            prop_assert_eq!(with.net_payable, without.net_payable);
            prop_assert_eq!(with.items.len(), items.len());
        }

        #[test]
        fn running_bills_never_pay_housekeeping(
            items in prop::collection::vec(line_item(), 0..10),
            pct in 0i64..5000i64
        ) {
            let ctx = BillContext::running().with_housekeeping_percent(Percentage::new(Decimal::new(pct, 2)));
            prop_assert_eq!(aggregate(&items, &[], &ctx).housekeeping_amount, Decimal::ZERO);
        }
    }
}
