//! Billing Domain - Bill line items, aggregation and settlement
//!
//! This crate turns the rows of a contractor's bill into the figures printed
//! on it: per-row order, cumulative, variance and bill amounts, grand totals,
//! and the net payable after advances and housekeeping.
//!
//! # Settlement
//!
//! - Each detail row bills `bill_percent` of its cumulative amount
//! - Header rows are section breaks and never contribute to totals
//! - Additions raise the net payable; deductions lower it
//! - Housekeeping is deducted from final bills only
//!
//! Numeric fields are kept as typed and read leniently: anything unreadable
//! counts as zero, so a half-filled bill can always be summarised.
//!
//! # Example
//!
//! ```rust
//! use domain_billing::{aggregate, AdvanceEntry, BillContext, DetailRow, LineItem};
//! use rust_decimal_macros::dec;
//!
//! let items = vec![
//!     LineItem::header("FALSE CEILING"),
//!     LineItem::detail(
//!         DetailRow::new("Gypsum board ceiling")
//!             .with_rate("45")
//!             .with_order_qty("2700")
//!             .with_cumulative_qty("3021")
//!             .with_bill_percent("100"),
//!     ),
//! ];
//! let advances = vec![AdvanceEntry::deduction("Advance", "2024-02-01", "100000")];
//!
//! let summary = aggregate(&items, &advances, &BillContext::default());
//! assert_eq!(summary.totals.bill_amount, dec!(135945));
//! assert_eq!(summary.net_payable, dec!(35945));
//! ```

pub mod line_item;
pub mod advance;
pub mod context;
pub mod aggregator;
pub mod sheet;
pub mod validation;
pub mod error;

pub use line_item::{
    derive_line_item, DerivedDetail, DerivedLineItem, DetailField, DetailInputs, DetailRow,
    HeaderRow, LineItem,
};
pub use advance::{AdvanceEntry, AdvanceField, AdvanceKind, AdvanceTotals};
pub use context::{BillContext, BillType};
pub use aggregator::{aggregate, housekeeping_amount, net_payable, BillSummary, GrandTotals};
pub use sheet::{BillEdit, BillHeader, BillSheet};
pub use validation::{find_issues, validate_sheet, FieldIssue, FieldLocation, IssueKind};
pub use error::BillingError;
