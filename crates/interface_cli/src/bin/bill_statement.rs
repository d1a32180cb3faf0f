//! Bill Statement - command line binary
//!
//! Summarises, exports and validates bill sheets stored as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Print the statement for a bill
//! bill-statement summary bills/ra-03.json
//!
//! # Export a CSV spreadsheet
//! bill-statement export bills/ra-03.json --output ra-03.csv
//!
//! # Reject bills with values that would be read as zero
//! bill-statement validate bills/ra-03.json
//! ```
//!
//! # Environment Variables
//!
//! * `BILL_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `BILL_DECIMAL_PLACES` - Decimal places for amounts (default: 2)
//! * `BILL_DIGIT_GROUPING` - indian or international (default: indian)
//! * `BILL_DEFAULT_FORMAT` - text or json (default: text)

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interface_cli::{
    load_sheet, statement, write_csv, write_issues, AmountFormatter, CliConfig, DigitGrouping,
    OutputFormat, Statement,
};

#[derive(Parser)]
#[command(name = "bill-statement", version, about = "Contractor bill statements and exports")]
struct Cli {
    /// Digit grouping for amounts (indian or international)
    #[arg(long, global = true)]
    grouping: Option<DigitGrouping>,

    /// Decimal places for amounts
    #[arg(long, global = true)]
    decimal_places: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the derived bill statement
    Summary {
        /// Bill sheet JSON file
        file: PathBuf,
        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Export the bill as a CSV spreadsheet
    Export {
        /// Bill sheet JSON file
        file: PathBuf,
        /// Destination file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check the bill for values that would be read as zero or are negative
    Validate {
        /// Bill sheet JSON file
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let loaded = CliConfig::from_env();
    let mut config = loaded.as_ref().cloned().unwrap_or_default();
    init_tracing(&config.log_level);

    if let Err(err) = &loaded {
        tracing::warn!(error = %err, "Invalid BILL_ configuration, using defaults");
    }

    if let Some(grouping) = cli.grouping {
        config.digit_grouping = grouping;
    }
    if let Some(places) = cli.decimal_places {
        config.decimal_places = places;
    }
    config.validate()?;

    let formatter = AmountFormatter::from_config(&config);

    match cli.command {
        Command::Summary { file, format } => {
            summary(&file, format.unwrap_or(config.default_format), &formatter)
        }
        Command::Export { file, output } => export(&file, output.as_deref(), &formatter),
        Command::Validate { file } => validate(&file),
    }
}

fn summary(file: &Path, format: OutputFormat, formatter: &AmountFormatter) -> anyhow::Result<()> {
    let sheet = load_sheet(file)?;
    let summary = sheet.summarize();

    tracing::info!(
        bill = %sheet.header.bill_number,
        net_payable = %summary.net_payable,
        "Bill summarised"
    );

    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Text => write!(stdout, "{}", Statement::new(&sheet, &summary, *formatter))?,
        OutputFormat::Json => writeln!(stdout, "{}", statement::to_json(&sheet, &summary)?)?,
    }
    Ok(())
}

fn export(file: &Path, output: Option<&Path>, formatter: &AmountFormatter) -> anyhow::Result<()> {
    let sheet = load_sheet(file)?;
    let summary = sheet.summarize();

    match output {
        Some(path) => {
            let out = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_csv(BufWriter::new(out), &sheet, &summary, formatter)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), rows = summary.items.len(), "Bill exported");
        }
        None => write_csv(io::stdout().lock(), &sheet, &summary, formatter)?,
    }
    Ok(())
}

fn validate(file: &Path) -> anyhow::Result<()> {
    let sheet = load_sheet(file)?;

    let count = write_issues(io::stdout().lock(), &file.display().to_string(), &sheet)?;
    if count > 0 {
        bail!("{count} field issue(s) in {}", file.display());
    }
    Ok(())
}

/// Initializes the tracing subscriber on stderr so stdout carries only output.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(io::stderr),
        )
        .init();
}
