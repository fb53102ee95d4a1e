use crate::autocomplete::PRICE_MAX_FRACTION_DIGITS;
use crate::cli::ui;
use crate::core::currency::Currency;
use crate::core::entity::EntityStorage;
use crate::core::price::{Price, PriceFormatter};
use crate::core::variation::ProductVariation;
use anyhow::{Context, Result, bail};
use comfy_table::Cell;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct VariationInput {
    pub variation_id: String,
    pub variation_type: String,
    pub sku: String,
    pub title: String,
    pub price: Option<String>,
    pub currency_code: Option<String>,
}

pub async fn add_variation(
    variations: Arc<dyn EntityStorage<ProductVariation>>,
    currencies: Arc<dyn EntityStorage<Currency>>,
    input: VariationInput,
) -> Result<String> {
    let price = match (input.price, input.currency_code) {
        (Some(number), Some(currency_code)) => {
            let number = Decimal::from_str(&number)
                .with_context(|| format!("Invalid price: {number}"))?;
            if currencies.load(&currency_code).await?.is_none() {
                bail!("Unknown currency: {}", currency_code);
            }
            Some(Price::new(number, &currency_code))
        }
        (None, None) => None,
        _ => bail!("A price needs both an amount and a currency"),
    };

    let mut variation =
        ProductVariation::new(&input.variation_id, &input.sku, &input.title, price);
    if !input.variation_type.is_empty() {
        variation.variation_type = input.variation_type;
    }
    variations.save(&variation).await?;
    info!(variation_id = %variation.variation_id, "Saved product variation");

    Ok(ui::styled(
        &format!("Saved the {} product variation.", variation.title),
        ui::Tone::Saved,
    ))
}

pub async fn list_variations(
    variations: Arc<dyn EntityStorage<ProductVariation>>,
    currencies: Arc<dyn EntityStorage<Currency>>,
    formatter: &dyn PriceFormatter,
) -> Result<String> {
    let all = variations.load_all().await?;
    if all.is_empty() {
        return Ok(ui::styled(
            "No product variations found.",
            ui::Tone::Hint,
        ));
    }

    let mut table = ui::listing_table(&["ID", "Type", "SKU", "Title", "Price"]);
    for variation in &all {
        let formatted = match variation.price() {
            Some(price) => currencies
                .load(&price.currency_code)
                .await?
                .map(|currency| {
                    formatter.format_currency(price.number, &currency, PRICE_MAX_FRACTION_DIGITS)
                }),
            None => None,
        };
        table.add_row(vec![
            Cell::new(&variation.variation_id),
            Cell::new(&variation.variation_type),
            Cell::new(&variation.sku),
            Cell::new(&variation.title),
            ui::price_cell(formatted),
        ]);
    }

    Ok(format!(
        "{}\n\n{table}",
        ui::styled("Product variations", ui::Tone::Heading)
    ))
}
