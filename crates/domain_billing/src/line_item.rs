//! Bill line items
//!
//! A bill is an ordered list of rows. Header rows are section breaks with a
//! description only; detail rows carry the quantities and rates that are
//! rolled up into the bill amount. Detail numbers are kept exactly as typed
//! and only read through [`parse_lenient`] when the row is derived.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::input::raw_text;
use core_kernel::{parse_lenient, Percentage};

/// A section break in the bill
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeaderRow {
    /// Section title
    #[serde(default)]
    pub description: String,
}

impl HeaderRow {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A billable row as entered on the form
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetailRow {
    /// Work description
    #[serde(default)]
    pub description: String,
    /// Unit of measure (sqft, rft, nos, ...)
    #[serde(default)]
    pub unit: String,
    /// Labour / material marker
    #[serde(default)]
    pub labor_or_material_tag: String,
    /// Rate per unit
    #[serde(default, deserialize_with = "raw_text")]
    pub rate: String,
    /// Quantity on the work order
    #[serde(default, deserialize_with = "raw_text")]
    pub order_qty: String,
    /// Quantity executed to date
    #[serde(default, deserialize_with = "raw_text")]
    pub cumulative_qty: String,
    /// Percentage of the cumulative amount billed now
    #[serde(default, deserialize_with = "raw_text")]
    pub bill_percent: String,
    /// Reference rate, reported alongside but never billed
    #[serde(default, deserialize_with = "raw_text")]
    pub secondary_rate: String,
}

impl DetailRow {
    /// Creates an empty detail row with a description
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.labor_or_material_tag = tag.into();
        self
    }

    pub fn with_rate(mut self, rate: impl Into<String>) -> Self {
        self.rate = rate.into();
        self
    }

    pub fn with_order_qty(mut self, qty: impl Into<String>) -> Self {
        self.order_qty = qty.into();
        self
    }

    pub fn with_cumulative_qty(mut self, qty: impl Into<String>) -> Self {
        self.cumulative_qty = qty.into();
        self
    }

    pub fn with_bill_percent(mut self, percent: impl Into<String>) -> Self {
        self.bill_percent = percent.into();
        self
    }

    pub fn with_secondary_rate(mut self, rate: impl Into<String>) -> Self {
        self.secondary_rate = rate.into();
        self
    }

    /// Returns the raw text of a field
    pub fn get(&self, field: DetailField) -> &str {
        match field {
            DetailField::Description => &self.description,
            DetailField::Unit => &self.unit,
            DetailField::LaborOrMaterialTag => &self.labor_or_material_tag,
            DetailField::Rate => &self.rate,
            DetailField::OrderQty => &self.order_qty,
            DetailField::CumulativeQty => &self.cumulative_qty,
            DetailField::BillPercent => &self.bill_percent,
            DetailField::SecondaryRate => &self.secondary_rate,
        }
    }

    /// Replaces the raw text of a field
    pub fn set(&mut self, field: DetailField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DetailField::Description => self.description = value,
            DetailField::Unit => self.unit = value,
            DetailField::LaborOrMaterialTag => self.labor_or_material_tag = value,
            DetailField::Rate => self.rate = value,
            DetailField::OrderQty => self.order_qty = value,
            DetailField::CumulativeQty => self.cumulative_qty = value,
            DetailField::BillPercent => self.bill_percent = value,
            DetailField::SecondaryRate => self.secondary_rate = value,
        }
    }
}

/// Editable fields of a detail row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailField {
    Description,
    Unit,
    LaborOrMaterialTag,
    Rate,
    OrderQty,
    CumulativeQty,
    BillPercent,
    SecondaryRate,
}

impl DetailField {
    /// Fields that are read as numbers
    pub const NUMERIC: [DetailField; 5] = [
        DetailField::Rate,
        DetailField::OrderQty,
        DetailField::CumulativeQty,
        DetailField::BillPercent,
        DetailField::SecondaryRate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DetailField::Description => "description",
            DetailField::Unit => "unit",
            DetailField::LaborOrMaterialTag => "labor_or_material_tag",
            DetailField::Rate => "rate",
            DetailField::OrderQty => "order_qty",
            DetailField::CumulativeQty => "cumulative_qty",
            DetailField::BillPercent => "bill_percent",
            DetailField::SecondaryRate => "secondary_rate",
        }
    }
}

impl fmt::Display for DetailField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A row of the bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineItem {
    /// Section break, skipped by every total
    Header(HeaderRow),
    /// Billable row
    Detail(DetailRow),
}

impl LineItem {
    pub fn header(description: impl Into<String>) -> Self {
        LineItem::Header(HeaderRow::new(description))
    }

    pub fn detail(row: DetailRow) -> Self {
        LineItem::Detail(row)
    }

    pub fn is_header(&self) -> bool {
        matches!(self, LineItem::Header(_))
    }

    pub fn description(&self) -> &str {
        match self {
            LineItem::Header(header) => &header.description,
            LineItem::Detail(row) => &row.description,
        }
    }
}

impl From<DetailRow> for LineItem {
    fn from(row: DetailRow) -> Self {
        LineItem::Detail(row)
    }
}

impl From<HeaderRow> for LineItem {
    fn from(header: HeaderRow) -> Self {
        LineItem::Header(header)
    }
}

/// The numeric inputs of a detail row after lenient parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DetailInputs {
    pub rate: Decimal,
    pub order_qty: Decimal,
    pub cumulative_qty: Decimal,
    pub bill_percent: Percentage,
    pub secondary_rate: Decimal,
}

impl DetailInputs {
    pub fn parse(row: &DetailRow) -> Self {
        Self {
            rate: parse_lenient(&row.rate),
            order_qty: parse_lenient(&row.order_qty),
            cumulative_qty: parse_lenient(&row.cumulative_qty),
            bill_percent: Percentage::parse_lenient(&row.bill_percent),
            secondary_rate: parse_lenient(&row.secondary_rate),
        }
    }
}

/// A detail row with its derived amounts
///
/// Amounts carry full precision; rounding for display belongs to the
/// renderer. Variance is signed: negative means more was executed than
/// ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedDetail {
    /// The row as entered
    #[serde(flatten)]
    pub row: DetailRow,
    /// Parsed numeric inputs
    pub inputs: DetailInputs,
    /// rate × order qty
    pub order_amount: Decimal,
    /// rate × cumulative qty
    pub cumulative_amount: Decimal,
    /// order qty − cumulative qty
    pub variance_qty: Decimal,
    /// order amount − cumulative amount
    pub variance_amount: Decimal,
    /// cumulative amount × bill percent / 100
    pub bill_amount: Decimal,
    /// secondary rate × cumulative qty
    pub secondary_amount: Decimal,
}

impl DerivedDetail {
    /// Derives every amount of a detail row from scratch
    pub fn from_row(row: &DetailRow) -> Self {
        let inputs = DetailInputs::parse(row);

        let order_amount = inputs.rate.saturating_mul(inputs.order_qty);
        let cumulative_amount = inputs.rate.saturating_mul(inputs.cumulative_qty);
        let variance_qty = inputs.order_qty.saturating_sub(inputs.cumulative_qty);
        let variance_amount = order_amount.saturating_sub(cumulative_amount);
        let bill_amount = inputs.bill_percent.apply(cumulative_amount);
        let secondary_amount = inputs.secondary_rate.saturating_mul(inputs.cumulative_qty);

        Self {
            row: row.clone(),
            inputs,
            order_amount,
            cumulative_amount,
            variance_qty,
            variance_amount,
            bill_amount,
            secondary_amount,
        }
    }
}

/// A line item after derivation, keeping the row kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DerivedLineItem {
    Header(HeaderRow),
    Detail(DerivedDetail),
}

impl DerivedLineItem {
    /// Returns the derived amounts, or `None` for a header row
    pub fn as_detail(&self) -> Option<&DerivedDetail> {
        match self {
            DerivedLineItem::Header(_) => None,
            DerivedLineItem::Detail(detail) => Some(detail),
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(self, DerivedLineItem::Header(_))
    }
}

/// Derives the amounts of one line item
///
/// Header rows come back unchanged. Detail rows have every numeric field read
/// leniently (unreadable text counts as zero) and their six amounts computed
/// with no intermediate rounding.
pub fn derive_line_item(item: &LineItem) -> DerivedLineItem {
    match item {
        LineItem::Header(header) => DerivedLineItem::Header(header.clone()),
        LineItem::Detail(row) => DerivedLineItem::Detail(DerivedDetail::from_row(row)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn detail(rate: &str, order: &str, cumulative: &str, percent: &str) -> DetailRow {
        DetailRow::new("Gypsum ceiling")
            .with_unit("sqft")
            .with_rate(rate)
            .with_order_qty(order)
            .with_cumulative_qty(cumulative)
            .with_bill_percent(percent)
    }

    #[test]
    fn test_header_is_returned_unchanged() {
        let item = LineItem::header("FALSE CEILING");
        let derived = derive_line_item(&item);

        assert_eq!(derived, DerivedLineItem::Header(HeaderRow::new("FALSE CEILING")));
        assert!(derived.as_detail().is_none());
    }

    #[test]
    fn test_detail_amounts() {
        let derived = DerivedDetail::from_row(&detail("45", "2700", "3021", "100"));

        assert_eq!(derived.order_amount, dec!(121500));
        assert_eq!(derived.cumulative_amount, dec!(135945));
        assert_eq!(derived.variance_qty, dec!(-321));
        assert_eq!(derived.variance_amount, dec!(-14445));
        assert_eq!(derived.bill_amount, dec!(135945));
        assert_eq!(derived.secondary_amount, Decimal::ZERO);
    }

    #[test]
    fn test_unreadable_fields_count_as_zero() {
        let row = DetailRow::new("Partition")
            .with_rate("abc")
            .with_order_qty("")
            .with_cumulative_qty("5")
            .with_bill_percent("100")
            .with_secondary_rate("0");
        let derived = DerivedDetail::from_row(&row);

        assert_eq!(derived.order_amount, Decimal::ZERO);
        assert_eq!(derived.cumulative_amount, Decimal::ZERO);
        assert_eq!(derived.variance_qty, dec!(-5));
        assert_eq!(derived.variance_amount, Decimal::ZERO);
        assert_eq!(derived.bill_amount, Decimal::ZERO);
        assert_eq!(derived.secondary_amount, Decimal::ZERO);
    }

    #[test]
    fn test_bill_percent_is_not_clamped() {
        let over = DerivedDetail::from_row(&detail("10", "100", "100", "150"));
        assert_eq!(over.cumulative_amount, dec!(1000));
        assert_eq!(over.bill_amount, dec!(1500));

        let negative = DerivedDetail::from_row(&detail("10", "100", "100", "-10"));
        assert_eq!(negative.bill_amount, dec!(-100));
    }

    #[test]
    fn test_partial_bill_percent() {
        let derived = DerivedDetail::from_row(&detail("35", "400", "871", "33.5"));
        assert_eq!(derived.cumulative_amount, dec!(30485));
        assert_eq!(derived.bill_amount, dec!(10212.475));
    }

    #[test]
    fn test_secondary_amount_uses_cumulative_qty() {
        let row = detail("45", "2700", "3021", "100").with_secondary_rate("40");
        let derived = DerivedDetail::from_row(&row);
        assert_eq!(derived.secondary_amount, dec!(120840));
        assert_eq!(derived.bill_amount, dec!(135945));
    }

    #[test]
    fn test_extreme_values_saturate() {
        let row = detail("79228162514264337593543950335", "10", "10", "100");
        let derived = DerivedDetail::from_row(&row);
        assert_eq!(derived.order_amount, Decimal::MAX);
    }

    #[test]
    fn test_field_get_and_set() {
        let mut row = DetailRow::new("Paint");
        row.set(DetailField::Rate, "18");
        row.set(DetailField::LaborOrMaterialTag, "L");

        assert_eq!(row.get(DetailField::Rate), "18");
        assert_eq!(row.get(DetailField::LaborOrMaterialTag), "L");
        assert_eq!(row.get(DetailField::OrderQty), "");
    }

    #[test]
    fn test_line_item_json_shapes() {
        let json = r#"[
            {"kind": "header", "description": "CIVIL"},
            {"kind": "detail", "description": "Brick wall", "unit": "sqft",
             "rate": 45, "order_qty": "2700", "cumulative_qty": 3021.5, "bill_percent": null}
        ]"#;
        let items: Vec<LineItem> = serde_json::from_str(json).unwrap();

        assert!(items[0].is_header());
        match &items[1] {
            LineItem::Detail(row) => {
                assert_eq!(row.rate, "45");
                assert_eq!(row.cumulative_qty, "3021.5");
                assert_eq!(row.bill_percent, "");
                assert_eq!(row.secondary_rate, "");
            }
            other => panic!("expected detail row, got {other:?}"),
        }
    }
}
