//! Advance adjustments
//!
//! Advances are manual lines entered beside the bill: payments already made
//! (deductions) or extra charges (additions). They are netted against the
//! bill amount and are not tied to any line item.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::input::raw_text;
use core_kernel::parse_lenient;

/// Direction of an advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvanceKind {
    /// Increases the net payable
    Addition,
    /// Decreases the net payable
    Deduction,
}

/// A manually entered advance or adjustment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceEntry {
    /// Free-text label, e.g. "Advance paid by cheque"
    #[serde(default)]
    pub label: String,
    /// Date as entered on the form
    #[serde(default)]
    pub date: String,
    /// Amount as entered on the form
    #[serde(default, deserialize_with = "raw_text")]
    pub amount: String,
    pub kind: AdvanceKind,
}

impl AdvanceEntry {
    pub fn new(
        label: impl Into<String>,
        date: impl Into<String>,
        amount: impl Into<String>,
        kind: AdvanceKind,
    ) -> Self {
        Self {
            label: label.into(),
            date: date.into(),
            amount: amount.into(),
            kind,
        }
    }

    /// Creates an addition entry
    pub fn addition(label: impl Into<String>, date: impl Into<String>, amount: impl Into<String>) -> Self {
        Self::new(label, date, amount, AdvanceKind::Addition)
    }

    /// Creates a deduction entry
    pub fn deduction(label: impl Into<String>, date: impl Into<String>, amount: impl Into<String>) -> Self {
        Self::new(label, date, amount, AdvanceKind::Deduction)
    }

    /// Returns the amount, reading unreadable text as zero
    pub fn amount_value(&self) -> Decimal {
        parse_lenient(&self.amount)
    }

    pub fn get(&self, field: AdvanceField) -> &str {
        match field {
            AdvanceField::Label => &self.label,
            AdvanceField::Date => &self.date,
            AdvanceField::Amount => &self.amount,
        }
    }

    pub fn set(&mut self, field: AdvanceField, value: impl Into<String>) {
        let value = value.into();
        match field {
            AdvanceField::Label => self.label = value,
            AdvanceField::Date => self.date = value,
            AdvanceField::Amount => self.amount = value,
        }
    }
}

/// Editable text fields of an advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceField {
    Label,
    Date,
    Amount,
}

/// Sums of a list of advances, split by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AdvanceTotals {
    pub additions: Decimal,
    pub deductions: Decimal,
}

impl AdvanceTotals {
    pub fn from_entries(entries: &[AdvanceEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut totals, entry| {
            let amount = entry.amount_value();
            match entry.kind {
                AdvanceKind::Addition => totals.additions = totals.additions.saturating_add(amount),
                AdvanceKind::Deduction => totals.deductions = totals.deductions.saturating_add(amount),
            }
            totals
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_totals_split_by_kind() {
        let entries = vec![
            AdvanceEntry::deduction("Advance 1", "2024-03-02", "50000"),
            AdvanceEntry::addition("Extra scaffolding", "2024-03-10", "1200.50"),
            AdvanceEntry::deduction("Advance 2", "2024-04-01", "25000"),
        ];

        let totals = AdvanceTotals::from_entries(&entries);
        assert_eq!(totals.deductions, dec!(75000));
        assert_eq!(totals.additions, dec!(1200.50));
    }

    #[test]
    fn test_unreadable_amount_counts_as_zero() {
        let entries = vec![
            AdvanceEntry::deduction("Pending", "", "TBD"),
            AdvanceEntry::deduction("Cheque", "", "1000"),
        ];

        let totals = AdvanceTotals::from_entries(&entries);
        assert_eq!(totals.deductions, dec!(1000));
        assert_eq!(totals.additions, Decimal::ZERO);
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(AdvanceTotals::from_entries(&[]), AdvanceTotals::default());
    }

    #[test]
    fn test_kind_json_names() {
        let entry: AdvanceEntry = serde_json::from_str(
            r#"{"label": "Advance", "date": "2024-01-05", "amount": 100000, "kind": "DEDUCTION"}"#,
        )
        .unwrap();
        assert_eq!(entry.kind, AdvanceKind::Deduction);
        assert_eq!(entry.amount, "100000");
        assert_eq!(serde_json::to_string(&AdvanceKind::Addition).unwrap(), "\"ADDITION\"");
    }
}
