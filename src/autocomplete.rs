//! Autocomplete results for entity reference fields.
//!
//! [`EntityAutocompleteMatcher`] turns selection results into matches.
//! [`ProductAutocompleteMatcher`] wraps any matcher and appends the formatted
//! price to each product variation match. Each match carries the id of the
//! entity it was built from, so decoration looks prices up by id rather than
//! by the match's position in the list.

use crate::core::currency::Currency;
use crate::core::entity::{Entity, EntityStorage};
use crate::core::price::PriceFormatter;
use crate::core::selection::{ReferenceResolver, SelectionSettings};
use crate::core::variation::ProductVariation;
use crate::errors::LookupFailure;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Maximum number of matches returned per request.
pub const AUTOCOMPLETE_LIMIT: usize = 10;

pub const PRICE_MAX_FRACTION_DIGITS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteMatch {
    /// Text placed into the reference field when the match is picked.
    pub value: String,
    /// Text shown in the suggestion list.
    pub label: String,
    pub target_id: String,
}

#[async_trait]
pub trait AutocompleteMatcher: Send + Sync {
    async fn get_matches(
        &self,
        target_type: &str,
        settings: &SelectionSettings,
        query: &str,
    ) -> Result<Vec<AutocompleteMatch>>;
}

/// Builds matches straight from the referenceable entities.
pub struct EntityAutocompleteMatcher {
    resolver: Arc<dyn ReferenceResolver>,
}

impl EntityAutocompleteMatcher {
    pub fn new(resolver: Arc<dyn ReferenceResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl AutocompleteMatcher for EntityAutocompleteMatcher {
    async fn get_matches(
        &self,
        target_type: &str,
        settings: &SelectionSettings,
        query: &str,
    ) -> Result<Vec<AutocompleteMatch>> {
        let entities = self
            .resolver
            .get_referenceable_entities(
                target_type,
                settings,
                query,
                settings.match_operator(),
                AUTOCOMPLETE_LIMIT,
            )
            .await?;

        Ok(entities
            .flatten()
            .map(|entity| AutocompleteMatch {
                value: encode_tag(&collapse_whitespace(&format!(
                    "{} ({})",
                    entity.label, entity.id
                ))),
                label: entity.label.clone(),
                target_id: entity.id.clone(),
            })
            .collect())
    }
}

/// Joins all runs of whitespace, newlines included, into single spaces.
fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Quotes a value containing commas or double quotes so it reads as one tag.
fn encode_tag(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Appends prices to product variation matches produced by an inner matcher.
pub struct ProductAutocompleteMatcher {
    inner: Arc<dyn AutocompleteMatcher>,
    variations: Arc<dyn EntityStorage<ProductVariation>>,
    currencies: Arc<dyn EntityStorage<Currency>>,
    formatter: Arc<dyn PriceFormatter>,
}

impl ProductAutocompleteMatcher {
    pub fn new(
        inner: Arc<dyn AutocompleteMatcher>,
        variations: Arc<dyn EntityStorage<ProductVariation>>,
        currencies: Arc<dyn EntityStorage<Currency>>,
        formatter: Arc<dyn PriceFormatter>,
    ) -> Self {
        Self {
            inner,
            variations,
            currencies,
            formatter,
        }
    }

    /// Appends " - {price}" to every match of a product variation.
    ///
    /// Other target types and empty lists pass through untouched. A match
    /// whose variation, price or currency cannot be resolved is left as is.
    /// Not idempotent: decorating an already decorated list appends again.
    pub async fn decorate(
        &self,
        mut matches: Vec<AutocompleteMatch>,
        target_type: &str,
    ) -> Vec<AutocompleteMatch> {
        if matches.is_empty() || target_type != ProductVariation::ENTITY_TYPE {
            return matches;
        }

        for m in matches.iter_mut() {
            match self.formatted_price(&m.target_id).await {
                Ok(price) => {
                    m.value.push_str(" - ");
                    m.value.push_str(&price);
                }
                Err(e) => {
                    warn!(
                        target_id = %m.target_id,
                        error = %e,
                        "Skipping price for autocomplete match"
                    );
                }
            }
        }
        matches
    }

    async fn formatted_price(&self, variation_id: &str) -> Result<String> {
        let variation = self
            .variations
            .load(variation_id)
            .await?
            .ok_or_else(|| LookupFailure::MissingEntity {
                entity_type: ProductVariation::ENTITY_TYPE.to_string(),
                id: variation_id.to_string(),
            })?;
        let price = variation
            .price()
            .ok_or_else(|| LookupFailure::MissingPrice(variation_id.to_string()))?;
        let currency = self
            .currencies
            .load(&price.currency_code)
            .await?
            .ok_or_else(|| LookupFailure::MissingEntity {
                entity_type: Currency::ENTITY_TYPE.to_string(),
                id: price.currency_code.clone(),
            })?;

        debug!(variation_id, price = %price, "Formatting autocomplete price");
        Ok(self
            .formatter
            .format_currency(price.number, &currency, PRICE_MAX_FRACTION_DIGITS))
    }
}

#[async_trait]
impl AutocompleteMatcher for ProductAutocompleteMatcher {
    async fn get_matches(
        &self,
        target_type: &str,
        settings: &SelectionSettings,
        query: &str,
    ) -> Result<Vec<AutocompleteMatch>> {
        let matches = self.inner.get_matches(target_type, settings, query).await?;
        Ok(self.decorate(matches, target_type).await)
    }
}
