pub mod autocomplete;
pub mod cli;
pub mod core;
pub mod currency_form;
pub mod errors;
pub mod formatter;
pub mod selection;
pub mod store;

use crate::autocomplete::{EntityAutocompleteMatcher, ProductAutocompleteMatcher};
use crate::cli::currency::CurrencyChanges;
use crate::cli::variation::VariationInput;
use crate::core::config::AppConfig;
use crate::core::selection::{MatchOperator, SelectionSettings};
use crate::core::{Currency, ProductVariation};
use crate::currency_form::CurrencyFormValues;
use crate::formatter::NumberFormatter;
use crate::selection::SelectionManager;
use crate::store::{DiskStorage, DiskStore};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    CurrencyAdd(CurrencyFormValues),
    CurrencyEdit {
        currency_code: String,
        changes: CurrencyChanges,
    },
    CurrencyList,
    VariationAdd(VariationInput),
    VariationList,
    Autocomplete {
        target_type: String,
        query: String,
        match_operator: Option<MatchOperator>,
        target_bundles: Vec<String>,
    },
}

/// Storages and services shared by all commands.
pub struct App {
    config: AppConfig,
    currencies: Arc<DiskStorage<Currency>>,
    variations: Arc<DiskStorage<ProductVariation>>,
    formatter: Arc<NumberFormatter>,
}

impl App {
    pub fn open(config: AppConfig) -> Result<Self> {
        let store = DiskStore::open(&config.data_path()?.join("store"))?;
        let formatter = NumberFormatter::for_locale(&config.locale)?;
        Ok(Self {
            currencies: Arc::new(store.storage::<Currency>()?),
            variations: Arc::new(store.storage::<ProductVariation>()?),
            formatter: Arc::new(formatter),
            config,
        })
    }

    /// The price-decorating matcher over storage-backed selection.
    pub fn autocomplete_matcher(&self) -> ProductAutocompleteMatcher {
        let selection = SelectionManager::new()
            .with_default::<Currency>(self.currencies.clone())
            .with_default::<ProductVariation>(self.variations.clone());
        ProductAutocompleteMatcher::new(
            Arc::new(EntityAutocompleteMatcher::new(Arc::new(selection))),
            self.variations.clone(),
            self.currencies.clone(),
            self.formatter.clone(),
        )
    }

    pub async fn execute(&self, command: AppCommand) -> Result<String> {
        match command {
            AppCommand::CurrencyAdd(values) => {
                cli::currency::add_currency(self.currencies.clone(), &values).await
            }
            AppCommand::CurrencyEdit {
                currency_code,
                changes,
            } => {
                cli::currency::edit_currency(self.currencies.clone(), &currency_code, changes)
                    .await
            }
            AppCommand::CurrencyList => {
                cli::currency::list_currencies(self.currencies.clone()).await
            }
            AppCommand::VariationAdd(input) => {
                cli::variation::add_variation(
                    self.variations.clone(),
                    self.currencies.clone(),
                    input,
                )
                .await
            }
            AppCommand::VariationList => {
                cli::variation::list_variations(
                    self.variations.clone(),
                    self.currencies.clone(),
                    self.formatter.as_ref(),
                )
                .await
            }
            AppCommand::Autocomplete {
                target_type,
                query,
                match_operator,
                target_bundles,
            } => {
                let settings = SelectionSettings {
                    match_operator: match_operator.or(self.config.autocomplete.match_operator),
                    target_bundles,
                    ..SelectionSettings::default()
                };
                let matcher = self.autocomplete_matcher();
                cli::autocomplete::show_matches(&matcher, &target_type, &settings, &query).await
            }
        }
    }
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Commerce admin starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let app = App::open(config)?;
    let output = app.execute(command).await?;
    println!("{output}");
    Ok(())
}
