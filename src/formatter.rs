//! Locale-aware currency formatting

use crate::core::currency::Currency;
use crate::core::price::PriceFormatter;
use anyhow::Result;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    /// `$1.00`
    Prefix,
    /// `1,00 $`
    Suffix,
}

/// Separators and symbol placement for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    pub decimal_separator: String,
    pub grouping_separator: String,
    pub symbol_position: SymbolPosition,
    pub minus_sign: String,
}

impl NumberFormat {
    pub fn en() -> Self {
        Self {
            decimal_separator: ".".to_string(),
            grouping_separator: ",".to_string(),
            symbol_position: SymbolPosition::Prefix,
            minus_sign: "-".to_string(),
        }
    }

    pub fn de() -> Self {
        Self {
            decimal_separator: ",".to_string(),
            grouping_separator: ".".to_string(),
            symbol_position: SymbolPosition::Suffix,
            minus_sign: "-".to_string(),
        }
    }

    pub fn fr() -> Self {
        Self {
            decimal_separator: ",".to_string(),
            grouping_separator: "\u{202f}".to_string(),
            symbol_position: SymbolPosition::Suffix,
            minus_sign: "-".to_string(),
        }
    }
}

impl FromStr for NumberFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Only the language part of tags like "en-US" matters here.
        let language = s.split(['-', '_']).next().unwrap_or_default();
        match language.to_lowercase().as_str() {
            "en" => Ok(NumberFormat::en()),
            "de" => Ok(NumberFormat::de()),
            "fr" => Ok(NumberFormat::fr()),
            _ => Err(anyhow::anyhow!("Unsupported locale: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NumberFormatter {
    format: NumberFormat,
}

impl NumberFormatter {
    pub fn new(format: NumberFormat) -> Self {
        Self { format }
    }

    pub fn for_locale(locale: &str) -> Result<Self> {
        Ok(Self::new(locale.parse()?))
    }

    /// Formats a plain number with grouping, keeping between `min` and `max` fraction digits.
    pub fn format_number(
        &self,
        number: Decimal,
        min_fraction_digits: u32,
        max_fraction_digits: u32,
    ) -> String {
        let rounded = round(number, min_fraction_digits, max_fraction_digits);
        format!("{}{}", self.sign(rounded), self.format_unsigned(rounded))
    }

    /// Minus sign for negative amounts that do not round to zero.
    fn sign(&self, rounded: Decimal) -> &str {
        if rounded.is_sign_negative() && !rounded.is_zero() {
            &self.format.minus_sign
        } else {
            ""
        }
    }

    fn format_unsigned(&self, rounded: Decimal) -> String {
        let digits = rounded.abs().to_string();
        let (integer, fraction) = match digits.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (digits.as_str(), None),
        };

        let mut output = group_thousands(integer, &self.format.grouping_separator);
        if let Some(fraction) = fraction {
            output.push_str(&self.format.decimal_separator);
            output.push_str(fraction);
        }
        output
    }
}

/// Rounds half away from zero to `max` digits, then pads to at least `min`.
fn round(number: Decimal, min_fraction_digits: u32, max_fraction_digits: u32) -> Decimal {
    let min_fraction_digits = min_fraction_digits.min(max_fraction_digits);
    let mut rounded = number
        .round_dp_with_strategy(max_fraction_digits, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    if rounded.scale() < min_fraction_digits {
        rounded.rescale(min_fraction_digits);
    }
    rounded
}

impl Default for NumberFormatter {
    fn default() -> Self {
        Self::new(NumberFormat::en())
    }
}

impl PriceFormatter for NumberFormatter {
    fn format_currency(
        &self,
        number: Decimal,
        currency: &Currency,
        max_fraction_digits: u32,
    ) -> String {
        let rounded = round(number, currency.fraction_digits, max_fraction_digits);
        let sign = self.sign(rounded);
        let formatted = self.format_unsigned(rounded);
        match self.format.symbol_position {
            SymbolPosition::Prefix => format!("{sign}{}{formatted}", currency.symbol),
            SymbolPosition::Suffix => format!("{sign}{formatted}\u{a0}{}", currency.symbol),
        }
    }
}

fn group_thousands(integer: &str, separator: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3 * separator.len());
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd() -> Currency {
        Currency::new("USD", "US Dollar", "840", "$", 2)
    }

    #[test]
    fn test_format_currency_en() {
        let formatter = NumberFormatter::default();
        assert_eq!(formatter.format_currency(dec!(19.99), &usd(), 6), "$19.99");
        assert_eq!(
            formatter.format_currency(dec!(1234.5), &usd(), 6),
            "$1,234.50"
        );
        assert_eq!(
            formatter.format_currency(dec!(1000000), &usd(), 6),
            "$1,000,000.00"
        );
    }

    #[test]
    fn test_format_currency_keeps_extra_precision_up_to_max() {
        let formatter = NumberFormatter::default();
        assert_eq!(
            formatter.format_currency(dec!(0.123456), &usd(), 6),
            "$0.123456"
        );
        assert_eq!(
            formatter.format_currency(dec!(0.1234567), &usd(), 6),
            "$0.123457"
        );
        assert_eq!(formatter.format_currency(dec!(2.500000), &usd(), 6), "$2.50");
    }

    #[test]
    fn test_format_currency_without_fraction_digits() {
        let formatter = NumberFormatter::default();
        let jpy = Currency::new("JPY", "Japanese Yen", "392", "¥", 0);
        assert_eq!(formatter.format_currency(dec!(1500), &jpy, 6), "¥1,500");
        assert_eq!(
            formatter.format_currency(dec!(1500.25), &jpy, 6),
            "¥1,500.25"
        );
        assert_eq!(formatter.format_currency(dec!(1500.5), &jpy, 0), "¥1,501");
    }

    #[test]
    fn test_format_currency_negative() {
        let formatter = NumberFormatter::default();
        assert_eq!(formatter.format_currency(dec!(-5.5), &usd(), 6), "-$5.50");
        assert_eq!(
            formatter.format_currency(dec!(-0.0000001), &usd(), 6),
            "$0.00"
        );
    }

    #[test]
    fn test_format_currency_suffix_locales() {
        let de = NumberFormatter::for_locale("de-DE").unwrap();
        assert_eq!(
            de.format_currency(dec!(1234.5), &usd(), 6),
            "1.234,50\u{a0}$"
        );

        let fr = NumberFormatter::for_locale("fr").unwrap();
        assert_eq!(
            fr.format_currency(dec!(1234.5), &usd(), 6),
            "1\u{202f}234,50\u{a0}$"
        );
    }

    #[test]
    fn test_format_number_sign() {
        let formatter = NumberFormatter::default();
        assert_eq!(formatter.format_number(dec!(-1234.5), 2, 6), "-1,234.50");
        assert_eq!(formatter.format_number(dec!(-0.0000001), 0, 6), "0");
        assert_eq!(formatter.format_number(dec!(7), 0, 6), "7");
    }

    #[test]
    fn test_format_currency_negative_suffix() {
        let de = NumberFormatter::for_locale("de").unwrap();
        assert_eq!(
            de.format_currency(dec!(-1234.5), &usd(), 6),
            "-1.234,50\u{a0}$"
        );
    }

    #[test]
    fn test_unsupported_locale() {
        assert!(NumberFormatter::for_locale("xx").is_err());
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1", ","), "1");
        assert_eq!(group_thousands("123", ","), "123");
        assert_eq!(group_thousands("1234", ","), "1,234");
        assert_eq!(group_thousands("123456", ","), "123,456");
        assert_eq!(group_thousands("1234567", ","), "1,234,567");
    }
}
