//! Currency records

use crate::core::entity::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub currency_code: String,
    pub name: String,
    pub numeric_code: String,
    pub symbol: String,
    pub fraction_digits: u32,
}

impl Currency {
    pub fn new(
        currency_code: &str,
        name: &str,
        numeric_code: &str,
        symbol: &str,
        fraction_digits: u32,
    ) -> Self {
        Self {
            currency_code: currency_code.to_string(),
            name: name.to_string(),
            numeric_code: numeric_code.to_string(),
            symbol: symbol.to_string(),
            fraction_digits,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self {
            currency_code: String::new(),
            name: String::new(),
            numeric_code: String::new(),
            symbol: String::new(),
            fraction_digits: 2,
        }
    }
}

impl Entity for Currency {
    const ENTITY_TYPE: &'static str = "commerce_currency";

    fn id(&self) -> String {
        self.currency_code.clone()
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn property(&self, name: &str) -> Option<String> {
        match name {
            "currencyCode" => Some(self.currency_code.clone()),
            "name" => Some(self.name.clone()),
            "numericCode" => Some(self.numeric_code.clone()),
            "symbol" => Some(self.symbol.clone()),
            "fractionDigits" => Some(self.fraction_digits.to_string()),
            _ => None,
        }
    }
}
