//! CSV spreadsheet export
//!
//! One record per bill row, then the totals record and the settlement lines.
//! Settlement amounts sit in the bill amount column so a spreadsheet can sum
//! that column directly.

use std::io;

use domain_billing::{AdvanceKind, BillSheet, BillSummary, DerivedLineItem};

use crate::format::{quantity, AmountFormatter};

const COLUMNS: [&str; 15] = [
    "No",
    "Description",
    "Unit",
    "L/M",
    "Rate",
    "Order Qty",
    "Order Amount",
    "Cumulative Qty",
    "Cumulative Amount",
    "Variance Qty",
    "Variance Amount",
    "Bill %",
    "Bill Amount",
    "Reference Rate",
    "Reference Amount",
];

const BILL_AMOUNT_COLUMN: usize = 12;

/// Writes the derived bill as CSV
pub fn write_csv<W: io::Write>(
    writer: W,
    sheet: &BillSheet,
    summary: &BillSummary,
    formatter: &AmountFormatter,
) -> Result<(), csv::Error> {
    let mut out = csv::WriterBuilder::new().flexible(true).from_writer(writer);

    out.write_record(["Bill No", sheet.header.bill_number.as_str()])?;
    out.write_record(["Vendor", sheet.header.vendor_name.as_str()])?;
    out.write_record(["Site", sheet.header.site_name.as_str()])?;
    out.write_record(["Work Order", sheet.header.work_order.as_str()])?;
    out.write_record(COLUMNS)?;

    let mut number = 0;
    for item in &summary.items {
        match item {
            DerivedLineItem::Header(header) => {
                out.write_record(["", header.description.as_str()])?;
            }
            DerivedLineItem::Detail(detail) => {
                number += 1;
                out.write_record([
                    number.to_string(),
                    detail.row.description.clone(),
                    detail.row.unit.clone(),
                    detail.row.labor_or_material_tag.clone(),
                    quantity(detail.inputs.rate),
                    quantity(detail.inputs.order_qty),
                    formatter.plain(detail.order_amount),
                    quantity(detail.inputs.cumulative_qty),
                    formatter.plain(detail.cumulative_amount),
                    quantity(detail.variance_qty),
                    formatter.plain(detail.variance_amount),
                    quantity(detail.inputs.bill_percent.value()),
                    formatter.plain(detail.bill_amount),
                    quantity(detail.inputs.secondary_rate),
                    formatter.plain(detail.secondary_amount),
                ])?;
            }
        }
    }

    let totals = &summary.totals;
    let mut total_record = vec![String::new(); COLUMNS.len()];
    total_record[1] = "TOTAL".to_string();
    total_record[6] = formatter.plain(totals.order_amount);
    total_record[8] = formatter.plain(totals.cumulative_amount);
    total_record[10] = formatter.plain(totals.variance_amount);
    total_record[BILL_AMOUNT_COLUMN] = formatter.plain(totals.bill_amount);
    total_record[14] = formatter.plain(totals.secondary_amount);
    out.write_record(&total_record)?;

    for entry in &sheet.advances {
        let (prefix, signed) = match entry.kind {
            AdvanceKind::Addition => ("Add", entry.amount_value()),
            AdvanceKind::Deduction => ("Less", -entry.amount_value()),
        };
        out.write_record(settlement_record(
            &format!("{prefix}: {}", entry.label),
            &entry.date,
            formatter.plain(signed),
        ))?;
    }
    if sheet.context.applies_housekeeping() {
        out.write_record(settlement_record(
            &format!("Less: housekeeping @ {}", sheet.context.housekeeping_percent),
            "",
            formatter.plain(-summary.housekeeping_amount),
        ))?;
    }
    out.write_record(settlement_record("NET PAYABLE", "", formatter.plain(summary.net_payable)))?;

    out.flush()?;
    Ok(())
}

fn settlement_record(label: &str, date: &str, amount: String) -> Vec<String> {
    let mut record = vec![String::new(); BILL_AMOUNT_COLUMN + 1];
    record[1] = label.to_string();
    record[2] = date.to_string();
    record[BILL_AMOUNT_COLUMN] = amount;
    record
}
