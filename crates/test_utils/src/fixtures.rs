//! Pre-built Test Fixtures
//!
//! Provides ready-to-use bills whose totals are known in advance.
//! These fixtures are designed to be consistent and predictable for unit tests.

use chrono::NaiveDate;
use core_kernel::Percentage;
use domain_billing::{
    AdvanceEntry, BillContext, BillHeader, BillSheet, DetailRow, LineItem,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for line item test data
pub struct LineItemFixtures;

impl LineItemFixtures {
    /// Gypsum ceiling row: order 121500, cumulative 135945, variance -14445
    pub fn gypsum_ceiling() -> DetailRow {
        DetailRow::new("Gypsum board false ceiling")
            .with_unit("sqft")
            .with_tag("L+M")
            .with_rate("45")
            .with_order_qty("2700")
            .with_cumulative_qty("3021")
            .with_bill_percent("100")
    }

    /// Partition row: order 14000, cumulative 30485, variance -16485
    pub fn partition_wall() -> DetailRow {
        DetailRow::new("Gypsum partition wall")
            .with_unit("sqft")
            .with_tag("L+M")
            .with_rate("35")
            .with_order_qty("400")
            .with_cumulative_qty("871")
            .with_bill_percent("100")
    }

    /// A row still being typed: unreadable rate, blank order quantity
    pub fn half_filled() -> DetailRow {
        DetailRow::new("Skirting")
            .with_unit("rft")
            .with_rate("abc")
            .with_order_qty("")
            .with_cumulative_qty("5")
            .with_bill_percent("100")
            .with_secondary_rate("0")
    }

    /// Two sections with one detail row each
    pub fn site_rows() -> Vec<LineItem> {
        vec![
            LineItem::header("FALSE CEILING"),
            LineItem::Detail(Self::gypsum_ceiling()),
            LineItem::header("PARTITIONS"),
            LineItem::Detail(Self::partition_wall()),
        ]
    }
}

/// Fixture for complete bills
pub struct BillFixtures;

impl BillFixtures {
    pub fn header() -> BillHeader {
        BillHeader {
            bill_number: "RA-03".to_string(),
            bill_date: NaiveDate::from_ymd_opt(2024, 3, 31),
            vendor_name: "Shree Ganesh Interiors".to_string(),
            site_name: "Tower B, Level 4".to_string(),
            work_order: "WO-118".to_string(),
        }
    }

    /// Final bill with one advance deduction of 100000 and no housekeeping
    ///
    /// Bill amount 166430, net payable 66430.
    pub fn final_site_bill() -> BillSheet {
        BillSheet {
            header: Self::header(),
            items: LineItemFixtures::site_rows(),
            advances: vec![AdvanceEntry::deduction("Advance by cheque", "2024-02-15", "100000")],
            context: BillContext::final_bill(Percentage::default()),
        }
    }

    /// Same rows as a final bill with 2% housekeeping
    ///
    /// Housekeeping 3328.60, net payable 63101.40.
    pub fn final_site_bill_with_housekeeping() -> BillSheet {
        BillSheet {
            context: BillContext::final_bill(Percentage::new(dec!(2))),
            ..Self::final_site_bill()
        }
    }

    /// The final site bill as the JSON a bill file would hold
    pub fn final_site_bill_json() -> String {
        serde_json::to_string_pretty(&Self::final_site_bill())
            .unwrap_or_else(|e| panic!("fixture bill should serialize: {e}"))
    }

    pub fn expected_net_payable() -> Decimal {
        dec!(66430)
    }
}
