use crate::cli::ui;
use crate::core::currency::Currency;
use crate::core::entity::EntityStorage;
use crate::currency_form::{CURRENCY_FORM_NOTICE, CurrencyForm, CurrencyFormValues};
use crate::errors::FormErrors;
use anyhow::Result;
use comfy_table::Cell;
use std::sync::Arc;

/// Field changes for an existing currency. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct CurrencyChanges {
    pub name: Option<String>,
    pub numeric_code: Option<String>,
    pub symbol: Option<String>,
    pub fraction_digits: Option<String>,
}

impl CurrencyChanges {
    fn apply(self, values: &mut CurrencyFormValues) {
        if let Some(name) = self.name {
            values.name = name;
        }
        if let Some(numeric_code) = self.numeric_code {
            values.numeric_code = numeric_code;
        }
        if let Some(symbol) = self.symbol {
            values.symbol = symbol;
        }
        if let Some(fraction_digits) = self.fraction_digits {
            values.fraction_digits = fraction_digits;
        }
    }
}

pub async fn add_currency(
    storage: Arc<dyn EntityStorage<Currency>>,
    values: &CurrencyFormValues,
) -> Result<String> {
    let mut form = CurrencyForm::add(storage);
    let notice = ui::styled(CURRENCY_FORM_NOTICE, ui::Tone::Hint);
    let saved = submit(&mut form, values).await?;
    Ok(format!("{notice}\n{saved}"))
}

pub async fn edit_currency(
    storage: Arc<dyn EntityStorage<Currency>>,
    currency_code: &str,
    changes: CurrencyChanges,
) -> Result<String> {
    let mut form = CurrencyForm::edit(storage, currency_code).await?;
    let mut values = form.default_values();
    changes.apply(&mut values);
    submit(&mut form, &values).await
}

async fn submit(form: &mut CurrencyForm, values: &CurrencyFormValues) -> Result<String> {
    let saved = form.submit(values).await?;
    Ok(ui::styled(&saved.message, ui::Tone::Saved))
}

/// One line per rejected field.
pub fn display_form_errors(errors: &FormErrors) -> String {
    errors
        .iter()
        .map(|(field, error)| {
            format!(
                "{} {}",
                ui::styled(&format!("{field}:"), ui::Tone::Problem),
                error
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn list_currencies(storage: Arc<dyn EntityStorage<Currency>>) -> Result<String> {
    let currencies = storage.load_all().await?;
    if currencies.is_empty() {
        return Ok(ui::styled("No currencies found.", ui::Tone::Hint));
    }

    let mut table = ui::listing_table(&[
        "Code",
        "Name",
        "Numeric code",
        "Symbol",
        "Fraction digits",
    ]);
    for currency in &currencies {
        table.add_row(vec![
            Cell::new(&currency.currency_code),
            Cell::new(&currency.name),
            Cell::new(&currency.numeric_code),
            Cell::new(&currency.symbol),
            ui::numeric_cell(currency.fraction_digits),
        ]);
    }

    Ok(format!(
        "{}\n\n{table}",
        ui::styled("Currencies", ui::Tone::Heading)
    ))
}
