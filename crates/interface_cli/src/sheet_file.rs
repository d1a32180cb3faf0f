//! Bill sheet files
//!
//! A bill file is the JSON form of a [`BillSheet`]. Numeric fields may be
//! written as strings or numbers.

use anyhow::Context;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

use domain_billing::BillSheet;

/// Reads a bill sheet from JSON
pub fn read_sheet<R: Read>(reader: R) -> anyhow::Result<BillSheet> {
    serde_json::from_reader(reader).context("bill file is not a valid bill sheet")
}

/// Loads a bill sheet from a file
pub fn load_sheet(path: &Path) -> anyhow::Result<BillSheet> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let sheet = read_sheet(BufReader::new(file))
        .with_context(|| format!("failed to read {}", path.display()))?;

    debug!(
        path = %path.display(),
        items = sheet.items.len(),
        advances = sheet.advances.len(),
        "Loaded bill sheet"
    );
    Ok(sheet)
}
