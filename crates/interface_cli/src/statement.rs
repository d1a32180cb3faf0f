//! Printable bill statement
//!
//! Lays out the derived bill the way it is printed for the vendor: header
//! block, one line per row, grand totals and the settlement down to the net
//! payable amount.

use serde::Serialize;
use std::fmt;

use domain_billing::{
    AdvanceKind, BillContext, BillHeader, BillSheet, BillSummary, BillType, DerivedLineItem,
};

use crate::format::{quantity, AmountFormatter};

const RULE_WIDTH: usize = 150;

/// A bill statement ready for display
pub struct Statement<'a> {
    sheet: &'a BillSheet,
    summary: &'a BillSummary,
    formatter: AmountFormatter,
}

impl<'a> Statement<'a> {
    pub fn new(sheet: &'a BillSheet, summary: &'a BillSummary, formatter: AmountFormatter) -> Self {
        Self {
            sheet,
            summary,
            formatter,
        }
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = &self.sheet.header;
        let title = match self.sheet.context.bill_type {
            BillType::Running => "RUNNING ACCOUNT BILL",
            BillType::Final => "FINAL BILL",
        };
        writeln!(f, "{title}")?;
        writeln!(f, "Bill No: {:<20} Date: {}", header.bill_number, bill_date(header))?;
        writeln!(f, "Vendor: {}", header.vendor_name)?;
        writeln!(f, "Site: {}", header.site_name)?;
        writeln!(f, "Work Order: {}", header.work_order)?;
        writeln!(f)
    }

    fn write_rows(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>4} {:<32} {:<6} {:>9} {:>10} {:>14} {:>10} {:>14} {:>10} {:>14} {:>7} {:>14}",
            "No", "Description", "Unit", "Rate", "Order Qty", "Order Amt", "Cum Qty",
            "Cum Amt", "Var Qty", "Var Amt", "Bill %", "Bill Amt"
        )?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;

        let amount = |value| self.formatter.grouped(value);
        let mut number = 0;
        for item in &self.summary.items {
            match item {
                DerivedLineItem::Header(header) => {
                    writeln!(f, "{:>4} {}", "", header.description.to_uppercase())?;
                }
                DerivedLineItem::Detail(detail) => {
                    number += 1;
                    writeln!(
                        f,
                        "{:>4} {:<32} {:<6} {:>9} {:>10} {:>14} {:>10} {:>14} {:>10} {:>14} {:>7} {:>14}",
                        number,
                        truncate(&detail.row.description, 32),
                        truncate(&detail.row.unit, 6),
                        quantity(detail.inputs.rate),
                        quantity(detail.inputs.order_qty),
                        amount(detail.order_amount),
                        quantity(detail.inputs.cumulative_qty),
                        amount(detail.cumulative_amount),
                        quantity(detail.variance_qty),
                        amount(detail.variance_amount),
                        quantity(detail.inputs.bill_percent.value()),
                        amount(detail.bill_amount),
                    )?;
                }
            }
        }

        let totals = &self.summary.totals;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(
            f,
            "{:>4} {:<32} {:<6} {:>9} {:>10} {:>14} {:>10} {:>14} {:>10} {:>14} {:>7} {:>14}",
            "", "TOTAL", "", "", "",
            amount(totals.order_amount),
            "",
            amount(totals.cumulative_amount),
            "",
            amount(totals.variance_amount),
            "",
            amount(totals.bill_amount),
        )?;
        if !totals.secondary_amount.is_zero() {
            writeln!(f, "{:>4} {:<32} {:>14}", "", "Reference amount", amount(totals.secondary_amount))?;
        }
        writeln!(f)
    }

    fn write_settlement(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary;
        let amount = |value| self.formatter.grouped(value);

        writeln!(f, "{:<48} {:>16}", "Total bill amount", amount(summary.totals.bill_amount))?;

        for (kind, prefix) in [(AdvanceKind::Addition, "Add"), (AdvanceKind::Deduction, "Less")] {
            for entry in self.sheet.advances.iter().filter(|entry| entry.kind == kind) {
                let label = if entry.date.is_empty() {
                    format!("{prefix}: {}", entry.label)
                } else {
                    format!("{prefix}: {} ({})", entry.label, entry.date)
                };
                writeln!(f, "{:<48} {:>16}", truncate(&label, 48), amount(entry.amount_value()))?;
            }
        }

        if !summary.total_additions.is_zero() {
            writeln!(f, "{:<48} {:>16}", "Total additions", amount(summary.total_additions))?;
        }
        if !summary.total_deductions.is_zero() {
            writeln!(f, "{:<48} {:>16}", "Total deductions", amount(summary.total_deductions))?;
        }
        if self.sheet.context.applies_housekeeping() {
            let label = format!("Less: housekeeping @ {}", self.sheet.context.housekeeping_percent);
            writeln!(f, "{:<48} {:>16}", label, amount(summary.housekeeping_amount))?;
        }

        writeln!(f, "{}", "=".repeat(65))?;
        writeln!(f, "{:<48} {:>16}", "NET PAYABLE", amount(summary.net_payable))
    }
}

impl fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;
        self.write_rows(f)?;
        self.write_settlement(f)
    }
}

/// The statement as JSON, at full precision
#[derive(Serialize)]
struct StatementJson<'a> {
    header: &'a BillHeader,
    context: &'a BillContext,
    #[serde(flatten)]
    summary: &'a BillSummary,
}

pub fn to_json(sheet: &BillSheet, summary: &BillSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&StatementJson {
        header: &sheet.header,
        context: &sheet.context,
        summary,
    })
}

fn bill_date(header: &BillHeader) -> String {
    header
        .bill_date
        .map(|date| date.format("%d-%m-%Y").to_string())
        .unwrap_or_default()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
        out.push('~');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Wall", 6), "Wall");
        assert_eq!(truncate("Gypsum ceiling", 6), "Gypsu~");
    }
}
