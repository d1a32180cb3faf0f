//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use core_kernel::Percentage;
use domain_billing::{
    AdvanceEntry, BillContext, BillHeader, BillSheet, BillType, DetailRow, LineItem,
};
use rust_decimal::Decimal;

use crate::fixtures::BillFixtures;

/// Builder for a fully billed detail row
pub struct DetailRowBuilder {
    row: DetailRow,
}

impl Default for DetailRowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailRowBuilder {
    /// Creates a builder for a 100% billed row with zero quantities
    pub fn new() -> Self {
        Self {
            row: DetailRow::new("Test item")
                .with_unit("nos")
                .with_rate("0")
                .with_order_qty("0")
                .with_cumulative_qty("0")
                .with_bill_percent("100"),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.row.description = description.into();
        self
    }

    pub fn rate(mut self, rate: impl ToString) -> Self {
        self.row.rate = rate.to_string();
        self
    }

    pub fn order_qty(mut self, qty: impl ToString) -> Self {
        self.row.order_qty = qty.to_string();
        self
    }

    pub fn cumulative_qty(mut self, qty: impl ToString) -> Self {
        self.row.cumulative_qty = qty.to_string();
        self
    }

    pub fn bill_percent(mut self, percent: impl ToString) -> Self {
        self.row.bill_percent = percent.to_string();
        self
    }

    pub fn secondary_rate(mut self, rate: impl ToString) -> Self {
        self.row.secondary_rate = rate.to_string();
        self
    }

    pub fn build(self) -> DetailRow {
        self.row
    }

    pub fn build_item(self) -> LineItem {
        LineItem::Detail(self.row)
    }
}

/// Builder for bill sheets
pub struct BillSheetBuilder {
    header: BillHeader,
    items: Vec<LineItem>,
    advances: Vec<AdvanceEntry>,
    context: BillContext,
}

impl Default for BillSheetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BillSheetBuilder {
    /// Creates an empty running bill with the fixture header
    pub fn new() -> Self {
        Self {
            header: BillFixtures::header(),
            items: Vec::new(),
            advances: Vec::new(),
            context: BillContext::running(),
        }
    }

    pub fn section(mut self, title: impl Into<String>) -> Self {
        self.items.push(LineItem::header(title));
        self
    }

    pub fn row(mut self, row: DetailRow) -> Self {
        self.items.push(LineItem::Detail(row));
        self
    }

    pub fn addition(mut self, amount: impl ToString) -> Self {
        self.advances.push(AdvanceEntry::addition("Addition", "", amount.to_string()));
        self
    }

    pub fn deduction(mut self, amount: impl ToString) -> Self {
        self.advances.push(AdvanceEntry::deduction("Advance", "", amount.to_string()));
        self
    }

    /// Makes this a final bill with the given housekeeping percent
    pub fn final_bill(mut self, housekeeping_percent: Decimal) -> Self {
        self.context = BillContext {
            bill_type: BillType::Final,
            housekeeping_percent: Percentage::new(housekeeping_percent),
        };
        self
    }

    pub fn build(self) -> BillSheet {
        BillSheet {
            header: self.header,
            items: self.items,
            advances: self.advances,
            context: self.context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builders_produce_expected_bill() {
        let sheet = BillSheetBuilder::new()
            .section("CIVIL")
            .row(DetailRowBuilder::new().rate(45).order_qty(2700).cumulative_qty(3021).build())
            .row(DetailRowBuilder::new().rate(35).order_qty(400).cumulative_qty(871).build())
            .deduction(100000)
            .final_bill(dec!(0))
            .build();

        assert_eq!(sheet.summarize().net_payable, BillFixtures::expected_net_payable());
    }

    #[test]
    fn test_fixture_housekeeping_figures() {
        let summary = BillFixtures::final_site_bill_with_housekeeping().summarize();

        assert_eq!(summary.housekeeping_amount, dec!(3328.60));
        assert_eq!(summary.net_payable, dec!(63101.40));
    }
}
