//! Bill statement command line layer
//!
//! Loads bill sheets from JSON files and presents the aggregated bill as a
//! printable statement, JSON, or a CSV spreadsheet. All arithmetic happens in
//! `domain_billing`; this crate only formats.

pub mod config;
pub mod format;
pub mod statement;
pub mod export;
pub mod sheet_file;
pub mod report;

pub use config::{CliConfig, DigitGrouping, OutputFormat};
pub use format::AmountFormatter;
pub use statement::Statement;
pub use export::write_csv;
pub use sheet_file::{load_sheet, read_sheet};
pub use report::write_issues;
