//! Billing domain errors

use thiserror::Error;

use crate::validation::FieldIssue;

/// Errors that can occur in the billing domain
///
/// Aggregation itself never fails; these come from editing a bill sheet and
/// from opt-in strict validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    /// Line item index past the end of the bill
    #[error("Line item {index} does not exist (bill has {len} items)")]
    ItemIndexOutOfRange { index: usize, len: usize },

    /// Advance index past the end of the advance list
    #[error("Advance {index} does not exist (bill has {len} advances)")]
    AdvanceIndexOutOfRange { index: usize, len: usize },

    /// Detail-only edit aimed at a header row
    #[error("Line item {0} is a header row")]
    NotADetailRow(usize),

    /// Header-only edit aimed at a detail row
    #[error("Line item {0} is a detail row")]
    NotAHeaderRow(usize),

    /// Strict validation found problems
    #[error("Validation failed with {} issue(s)", .0.len())]
    Validation(Vec<FieldIssue>),
}
