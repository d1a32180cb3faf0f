//! CLI configuration

use clap::ValueEnum;
use serde::Deserialize;
use std::str::FromStr;

use core_kernel::CoreError;

/// More places than this is never a presentation choice
const MAX_DECIMAL_PLACES: u32 = 10;

/// How the integer part of an amount is grouped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitGrouping {
    /// 1,66,430.00
    #[default]
    Indian,
    /// 166,430.00
    International,
}

impl FromStr for DigitGrouping {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "indian" | "lakh" => Ok(DigitGrouping::Indian),
            "international" | "western" => Ok(DigitGrouping::International),
            other => Err(CoreError::validation(format!(
                "unknown digit grouping '{other}' (expected indian or international)"
            ))),
        }
    }
}

/// Output of the summary command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Printable statement
    #[default]
    Text,
    /// Derived figures at full precision
    Json,
}

/// CLI configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    pub log_level: String,
    /// Decimal places shown for amounts
    pub decimal_places: u32,
    /// Digit grouping for amounts
    pub digit_grouping: DigitGrouping,
    /// Format used when the summary command is given none
    pub default_format: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            decimal_places: 2,
            digit_grouping: DigitGrouping::Indian,
            default_format: OutputFormat::Text,
        }
    }
}

impl CliConfig {
    /// Loads configuration from `BILL_` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("BILL").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Checks values the environment cannot constrain
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(CoreError::configuration(format!(
                "decimal_places must be at most {MAX_DECIMAL_PLACES}, got {}",
                self.decimal_places
            )));
        }
        Ok(())
    }
}
