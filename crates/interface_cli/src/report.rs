//! Strict validation report

use std::io;

use domain_billing::{find_issues, BillSheet};

/// Writes one line per field issue in `sheet`, each prefixed with `source`
///
/// A sheet with no issues gets a single `ok` line. Returns the number of
/// issues written.
pub fn write_issues<W: io::Write>(mut out: W, source: &str, sheet: &BillSheet) -> io::Result<usize> {
    let issues = find_issues(&sheet.items, &sheet.advances);
    if issues.is_empty() {
        writeln!(out, "{source}: ok")?;
    }
    for issue in &issues {
        writeln!(out, "{source}: {issue}")?;
    }
    Ok(issues.len())
}
