//! Opt-in strict validation
//!
//! Aggregation silently reads unreadable numbers as zero. Callers that must
//! not lose input that way run these checks first. Validation only reports;
//! it never changes the sheet.

use serde::Serialize;
use std::fmt;

use core_kernel::{is_well_formed, parse_lenient};

use crate::advance::{AdvanceEntry, AdvanceField};
use crate::error::BillingError;
use crate::line_item::{DetailField, LineItem};
use crate::sheet::BillSheet;

/// Where a field issue was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "list", content = "index", rename_all = "snake_case")]
pub enum FieldLocation {
    Item(usize),
    Advance(usize),
}

impl fmt::Display for FieldLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Rows are numbered from 1 on the printed bill
        match self {
            FieldLocation::Item(index) => write!(f, "item {}", index + 1),
            FieldLocation::Advance(index) => write!(f, "advance {}", index + 1),
        }
    }
}

/// What is wrong with a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Text that would be read as zero or only partly read
    Unparsable,
    /// A quantity, rate or amount below zero
    Negative,
}

/// A single field that strict validation rejects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub location: FieldLocation,
    pub field: &'static str,
    pub value: String,
    pub problem: IssueKind,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let problem = match self.problem {
            IssueKind::Unparsable => "is not a number",
            IssueKind::Negative => "is negative",
        };
        write!(f, "{} {}: {:?} {}", self.location, self.field, self.value, problem)
    }
}

/// Lists every field strict validation rejects, in bill order
///
/// Blank fields are accepted. Bill percent may be negative or above 100.
pub fn find_issues(items: &[LineItem], advances: &[AdvanceEntry]) -> Vec<FieldIssue> {
    let mut issues = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let LineItem::Detail(row) = item else {
            continue;
        };
        for field in DetailField::NUMERIC {
            let allow_negative = field == DetailField::BillPercent;
            if let Some(problem) = check(row.get(field), allow_negative) {
                issues.push(FieldIssue {
                    location: FieldLocation::Item(index),
                    field: field.name(),
                    value: row.get(field).to_string(),
                    problem,
                });
            }
        }
    }

    for (index, entry) in advances.iter().enumerate() {
        if let Some(problem) = check(entry.get(AdvanceField::Amount), false) {
            issues.push(FieldIssue {
                location: FieldLocation::Advance(index),
                field: "amount",
                value: entry.amount.clone(),
                problem,
            });
        }
    }

    issues
}

/// Fails with every issue found, or succeeds when there are none
pub fn validate_sheet(sheet: &BillSheet) -> Result<(), BillingError> {
    let issues = find_issues(&sheet.items, &sheet.advances);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(BillingError::Validation(issues))
    }
}

fn check(raw: &str, allow_negative: bool) -> Option<IssueKind> {
    if !is_well_formed(raw) {
        Some(IssueKind::Unparsable)
    } else if !allow_negative && parse_lenient(raw).is_sign_negative() {
        Some(IssueKind::Negative)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_item::DetailRow;

    #[test]
    fn test_clean_rows_pass() {
        let items = vec![
            LineItem::header("CIVIL"),
            LineItem::Detail(DetailRow::new("Wall").with_rate("45").with_order_qty("2700")),
        ];
        assert!(find_issues(&items, &[]).is_empty());
    }

    #[test]
    fn test_reports_unparsable_and_negative() {
        let items = vec![LineItem::Detail(
            DetailRow::new("Wall")
                .with_rate("45/-")
                .with_order_qty("-10")
                .with_bill_percent("-5"),
        )];
        let issues = find_issues(&items, &[]);

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field, "rate");
        assert_eq!(issues[0].problem, IssueKind::Unparsable);
        assert_eq!(issues[1].field, "order_qty");
        assert_eq!(issues[1].problem, IssueKind::Negative);
    }

    #[test]
    fn test_advance_amounts_checked() {
        let advances = vec![
            AdvanceEntry::deduction("Advance", "", "ten thousand"),
            AdvanceEntry::addition("Refund", "", "-50"),
        ];
        let issues = find_issues(&[], &advances);

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].location, FieldLocation::Advance(0));
        assert_eq!(issues[1].problem, IssueKind::Negative);
    }

    #[test]
    fn test_issue_display() {
        let issue = FieldIssue {
            location: FieldLocation::Item(2),
            field: "rate",
            value: "abc".to_string(),
            problem: IssueKind::Unparsable,
        };
        assert_eq!(issue.to_string(), "item 3 rate: \"abc\" is not a number");
    }
}
