//! Pricing abstractions and core types

use crate::core::currency::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub number: Decimal,
    pub currency_code: String,
}

impl Price {
    pub fn new(number: Decimal, currency_code: &str) -> Self {
        Self {
            number,
            currency_code: currency_code.to_string(),
        }
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.number, self.currency_code)
    }
}

/// Formats monetary amounts for display.
pub trait PriceFormatter: Send + Sync {
    fn format_currency(
        &self,
        number: Decimal,
        currency: &Currency,
        max_fraction_digits: u32,
    ) -> String;
}
