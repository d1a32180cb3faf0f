//! Bill sheet state and edits
//!
//! A [`BillSheet`] is a plain value holding everything entered for one bill.
//! Editors never mutate a sheet in place: each [`BillEdit`] message produces
//! the next sheet, and the summary is recomputed from that value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::Percentage;

use crate::advance::{AdvanceEntry, AdvanceField, AdvanceKind};
use crate::aggregator::{aggregate, BillSummary};
use crate::context::{BillContext, BillType};
use crate::error::BillingError;
use crate::line_item::{DetailField, DetailRow, LineItem};

/// Identifying details printed at the top of a bill
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BillHeader {
    pub bill_number: String,
    pub bill_date: Option<NaiveDate>,
    pub vendor_name: String,
    pub site_name: String,
    pub work_order: String,
}

/// Everything entered for one bill
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BillSheet {
    #[serde(default)]
    pub header: BillHeader,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub advances: Vec<AdvanceEntry>,
    #[serde(default)]
    pub context: BillContext,
}

/// A single change to a bill sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillEdit {
    SetHeader(BillHeader),
    AddHeader { description: String },
    AddDetail(DetailRow),
    /// Inserts before `index`; `index == len` appends
    InsertItem { index: usize, item: LineItem },
    UpdateDetail { index: usize, field: DetailField, value: String },
    RenameHeader { index: usize, description: String },
    RemoveItem { index: usize },
    /// Moves the item at `from` so that it ends up at `to`
    MoveItem { from: usize, to: usize },
    AddAdvance(AdvanceEntry),
    UpdateAdvance { index: usize, field: AdvanceField, value: String },
    SetAdvanceKind { index: usize, kind: AdvanceKind },
    RemoveAdvance { index: usize },
    SetBillType(BillType),
    SetHousekeepingPercent(String),
}

impl BillSheet {
    pub fn new(header: BillHeader) -> Self {
        Self {
            header,
            ..Self::default()
        }
    }

    /// Derives all rows and settles the bill
    pub fn summarize(&self) -> BillSummary {
        aggregate(&self.items, &self.advances, &self.context)
    }

    /// Returns the sheet that results from one edit
    ///
    /// The current sheet is left untouched, so a rejected edit loses nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if an index is out of range or the edit targets the
    /// wrong kind of row.
    pub fn apply(&self, edit: BillEdit) -> Result<Self, BillingError> {
        debug!(?edit, "Applying bill edit");
        let mut next = self.clone();
        next.apply_in_place(edit)?;
        Ok(next)
    }

    /// Applies a sequence of edits, stopping at the first rejected one
    pub fn apply_all(&self, edits: impl IntoIterator<Item = BillEdit>) -> Result<Self, BillingError> {
        edits
            .into_iter()
            .try_fold(self.clone(), |sheet, edit| sheet.apply(edit))
    }

    fn apply_in_place(&mut self, edit: BillEdit) -> Result<(), BillingError> {
        match edit {
            BillEdit::SetHeader(header) => self.header = header,
            BillEdit::AddHeader { description } => self.items.push(LineItem::header(description)),
            BillEdit::AddDetail(row) => self.items.push(LineItem::Detail(row)),
            BillEdit::InsertItem { index, item } => {
                if index > self.items.len() {
                    return Err(self.item_out_of_range(index));
                }
                self.items.insert(index, item);
            }
            BillEdit::UpdateDetail { index, field, value } => match self.item_mut(index)? {
                LineItem::Detail(row) => row.set(field, value),
                LineItem::Header(_) => return Err(BillingError::NotADetailRow(index)),
            },
            BillEdit::RenameHeader { index, description } => match self.item_mut(index)? {
                LineItem::Header(header) => header.description = description,
                LineItem::Detail(_) => return Err(BillingError::NotAHeaderRow(index)),
            },
            BillEdit::RemoveItem { index } => {
                self.item_mut(index)?;
                self.items.remove(index);
            }
            BillEdit::MoveItem { from, to } => {
                self.item_mut(from)?;
                self.item_mut(to)?;
                let item = self.items.remove(from);
                self.items.insert(to, item);
            }
            BillEdit::AddAdvance(entry) => self.advances.push(entry),
            BillEdit::UpdateAdvance { index, field, value } => {
                self.advance_mut(index)?.set(field, value);
            }
            BillEdit::SetAdvanceKind { index, kind } => {
                self.advance_mut(index)?.kind = kind;
            }
            BillEdit::RemoveAdvance { index } => {
                self.advance_mut(index)?;
                self.advances.remove(index);
            }
            BillEdit::SetBillType(bill_type) => self.context.bill_type = bill_type,
            BillEdit::SetHousekeepingPercent(raw) => {
                self.context.housekeeping_percent = Percentage::parse_lenient(&raw);
            }
        }
        Ok(())
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut LineItem, BillingError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(BillingError::ItemIndexOutOfRange { index, len })
    }

    fn advance_mut(&mut self, index: usize) -> Result<&mut AdvanceEntry, BillingError> {
        let len = self.advances.len();
        self.advances
            .get_mut(index)
            .ok_or(BillingError::AdvanceIndexOutOfRange { index, len })
    }

    fn item_out_of_range(&self, index: usize) -> BillingError {
        BillingError::ItemIndexOutOfRange {
            index,
            len: self.items.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sheet() -> BillSheet {
        BillSheet::new(BillHeader {
            bill_number: "RA-03".to_string(),
            vendor_name: "Shree Interiors".to_string(),
            ..BillHeader::default()
        })
    }

    #[test]
    fn test_edits_produce_new_sheet() {
        let original = sheet();
        let next = original
            .apply(BillEdit::AddDetail(DetailRow::new("Wall").with_rate("45")))
            .unwrap();

        assert!(original.items.is_empty());
        assert_eq!(next.items.len(), 1);
    }

    #[test]
    fn test_update_detail_field() {
        let next = sheet()
            .apply_all([
                BillEdit::AddDetail(DetailRow::new("Wall").with_bill_percent("100")),
                BillEdit::UpdateDetail { index: 0, field: DetailField::Rate, value: "45".into() },
                BillEdit::UpdateDetail { index: 0, field: DetailField::CumulativeQty, value: "10".into() },
            ])
            .unwrap();

        assert_eq!(next.summarize().totals.bill_amount, dec!(450));
    }

    #[test]
    fn test_update_on_header_is_rejected() {
        let with_header = sheet()
            .apply(BillEdit::AddHeader { description: "CIVIL".into() })
            .unwrap();
        let result = with_header.apply(BillEdit::UpdateDetail {
            index: 0,
            field: DetailField::Rate,
            value: "10".into(),
        });

        assert_eq!(result, Err(BillingError::NotADetailRow(0)));
        assert_eq!(with_header.items.len(), 1);
    }

    #[test]
    fn test_insert_bounds() {
        let base = sheet();
        assert!(base
            .apply(BillEdit::InsertItem { index: 0, item: LineItem::header("A") })
            .is_ok());
        assert_eq!(
            base.apply(BillEdit::InsertItem { index: 1, item: LineItem::header("A") }),
            Err(BillingError::ItemIndexOutOfRange { index: 1, len: 0 })
        );
    }

    #[test]
    fn test_move_item() {
        let next = sheet()
            .apply_all([
                BillEdit::AddHeader { description: "A".into() },
                BillEdit::AddHeader { description: "B".into() },
                BillEdit::AddHeader { description: "C".into() },
                BillEdit::MoveItem { from: 0, to: 2 },
            ])
            .unwrap();

        let order: Vec<&str> = next.items.iter().map(LineItem::description).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_advance_edits() {
        let next = sheet()
            .apply_all([
                BillEdit::AddAdvance(AdvanceEntry::addition("Advance", "2024-01-01", "100")),
                BillEdit::SetAdvanceKind { index: 0, kind: AdvanceKind::Deduction },
                BillEdit::UpdateAdvance { index: 0, field: AdvanceField::Amount, value: "250".into() },
            ])
            .unwrap();

        let summary = next.summarize();
        assert_eq!(summary.total_deductions, dec!(250));
        assert_eq!(summary.net_payable, dec!(-250));

        assert_eq!(
            next.apply(BillEdit::RemoveAdvance { index: 3 }),
            Err(BillingError::AdvanceIndexOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_context_edits() {
        let next = sheet()
            .apply_all([
                BillEdit::SetBillType(BillType::Final),
                BillEdit::SetHousekeepingPercent("1.5".into()),
            ])
            .unwrap();

        assert_eq!(next.context.bill_type, BillType::Final);
        assert_eq!(next.context.housekeeping_percent.value(), dec!(1.5));
    }

    #[test]
    fn test_sheet_json_defaults() {
        let sheet: BillSheet = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert_eq!(sheet, BillSheet::default());
    }
}
