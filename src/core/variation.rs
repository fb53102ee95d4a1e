//! Product variations: the purchasable, SKU-level entities

use crate::core::entity::Entity;
use crate::core::price::Price;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariation {
    pub variation_id: String,
    #[serde(default = "default_variation_type")]
    pub variation_type: String,
    pub sku: String,
    pub title: String,
    pub price: Option<Price>,
}

fn default_variation_type() -> String {
    "default".to_string()
}

impl ProductVariation {
    pub fn new(variation_id: &str, sku: &str, title: &str, price: Option<Price>) -> Self {
        Self {
            variation_id: variation_id.to_string(),
            variation_type: default_variation_type(),
            sku: sku.to_string(),
            title: title.to_string(),
            price,
        }
    }

    pub fn price(&self) -> Option<&Price> {
        self.price.as_ref()
    }
}

impl Entity for ProductVariation {
    const ENTITY_TYPE: &'static str = "commerce_product_variation";

    fn id(&self) -> String {
        self.variation_id.clone()
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn bundle(&self) -> String {
        self.variation_type.clone()
    }

    fn property(&self, name: &str) -> Option<String> {
        match name {
            "variation_id" => Some(self.variation_id.clone()),
            "type" => Some(self.variation_type.clone()),
            "sku" => Some(self.sku.clone()),
            "title" => Some(self.title.clone()),
            _ => None,
        }
    }
}
