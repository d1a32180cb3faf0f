//! Number formatting for printed statements and exports

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{CliConfig, DigitGrouping};

/// Formats amounts for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountFormatter {
    decimal_places: u32,
    grouping: DigitGrouping,
}

impl AmountFormatter {
    pub fn new(decimal_places: u32, grouping: DigitGrouping) -> Self {
        Self {
            decimal_places,
            grouping,
        }
    }

    pub fn from_config(config: &CliConfig) -> Self {
        Self::new(config.decimal_places, config.digit_grouping)
    }

    /// Rounds half away from zero to the configured places
    pub fn round(&self, value: Decimal) -> Decimal {
        let rounded = value.round_dp_with_strategy(
            self.decimal_places,
            RoundingStrategy::MidpointAwayFromZero,
        );
        if rounded.is_zero() {
            Decimal::ZERO
        } else {
            rounded
        }
    }

    /// Rounded with fixed places and no grouping, for spreadsheet cells
    pub fn plain(&self, value: Decimal) -> String {
        format!("{:.dp$}", self.round(value), dp = self.decimal_places as usize)
    }

    /// Rounded with fixed places and digit grouping, for printing
    pub fn grouped(&self, value: Decimal) -> String {
        let rounded = self.round(value);
        let text = format!("{:.dp$}", rounded.abs(), dp = self.decimal_places as usize);
        let (integer, fraction) = match text.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (text.as_str(), None),
        };

        let sign = if rounded.is_sign_negative() { "-" } else { "" };
        let integer = group_digits(integer, self.grouping);
        match fraction {
            Some(fraction) => format!("{sign}{integer}.{fraction}"),
            None => format!("{sign}{integer}"),
        }
    }
}

/// Quantities and rates print exactly as computed, without trailing zeros
pub fn quantity(value: Decimal) -> String {
    value.normalize().to_string()
}

fn group_digits(digits: &str, grouping: DigitGrouping) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let width = match grouping {
        DigitGrouping::Indian => 2,
        DigitGrouping::International => 3,
    };

    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(width);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_indian_grouping() {
        let f = AmountFormatter::new(2, DigitGrouping::Indian);
        assert_eq!(f.grouped(dec!(166430)), "1,66,430.00");
        assert_eq!(f.grouped(dec!(12345678.9)), "1,23,45,678.90");
        assert_eq!(f.grouped(dec!(999)), "999.00");
        assert_eq!(f.grouped(dec!(-30930)), "-30,930.00");
    }

    #[test]
    fn test_international_grouping() {
        let f = AmountFormatter::new(2, DigitGrouping::International);
        assert_eq!(f.grouped(dec!(166430)), "166,430.00");
        assert_eq!(f.grouped(dec!(1234567.891)), "1,234,567.89");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        let f = AmountFormatter::new(2, DigitGrouping::Indian);
        assert_eq!(f.plain(dec!(10212.475)), "10212.48");
        assert_eq!(f.plain(dec!(-0.125)), "-0.13");
        assert_eq!(f.plain(dec!(-0.001)), "0.00");
    }

    #[test]
    fn test_zero_places() {
        let f = AmountFormatter::new(0, DigitGrouping::Indian);
        assert_eq!(f.grouped(dec!(166430.5)), "1,66,431");
    }

    #[test]
    fn test_quantity() {
        assert_eq!(quantity(dec!(3021.00)), "3021");
        assert_eq!(quantity(dec!(-321)), "-321");
        assert_eq!(quantity(dec!(2.50)), "2.5");
    }
}
