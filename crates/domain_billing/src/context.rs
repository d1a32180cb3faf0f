//! Bill type and settlement settings

use serde::{Deserialize, Deserializer, Serialize};

use core_kernel::input::lenient_decimal;
use core_kernel::Percentage;

/// Whether the bill is interim or the closing bill of a work order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillType {
    /// Running-account bill against partial progress
    #[default]
    Running,
    /// Final settlement bill
    Final,
}

/// Settings that apply to the bill as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BillContext {
    #[serde(default)]
    pub bill_type: BillType,
    /// Deducted from the bill amount on final bills only
    #[serde(default, deserialize_with = "lenient_percentage")]
    pub housekeeping_percent: Percentage,
}

impl BillContext {
    pub fn running() -> Self {
        Self {
            bill_type: BillType::Running,
            housekeeping_percent: Percentage::default(),
        }
    }

    pub fn final_bill(housekeeping_percent: Percentage) -> Self {
        Self {
            bill_type: BillType::Final,
            housekeeping_percent,
        }
    }

    pub fn with_housekeeping_percent(mut self, percent: Percentage) -> Self {
        self.housekeeping_percent = percent;
        self
    }

    /// True when housekeeping is deducted from this bill
    pub fn applies_housekeeping(&self) -> bool {
        self.bill_type == BillType::Final && self.housekeeping_percent.is_positive()
    }
}

fn lenient_percentage<'de, D>(deserializer: D) -> Result<Percentage, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_decimal(deserializer).map(Percentage::new)
}
