use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use commerce_admin::cli::currency::{CurrencyChanges, display_form_errors};
use commerce_admin::cli::setup::setup;
use commerce_admin::cli::variation::VariationInput;
use commerce_admin::core::log::init_logging;
use commerce_admin::core::selection::MatchOperator;
use commerce_admin::currency_form::CurrencyFormValues;
use commerce_admin::errors::SubmitError;
use commerce_admin::{AppCommand, run_command};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter configuration file (to --config when given)
    Setup,
    /// Manage custom currencies
    #[command(subcommand)]
    Currency(CurrencyCommands),
    /// Manage product variations
    #[command(subcommand)]
    Variation(VariationCommands),
    /// Show autocomplete suggestions for a reference field
    Autocomplete {
        /// Text typed into the reference field
        #[arg(default_value = "")]
        query: String,
        #[arg(long, default_value = "commerce_product_variation")]
        target_type: String,
        /// CONTAINS, STARTS_WITH, ENDS_WITH or =
        #[arg(long)]
        match_operator: Option<MatchOperator>,
        /// Only match entities of these bundles
        #[arg(long = "bundle")]
        bundles: Vec<String>,
    },
}

#[derive(Subcommand)]
enum CurrencyCommands {
    /// Create a custom currency
    Add {
        /// Three letter code, as defined by ISO 4217
        #[arg(long)]
        code: String,
        /// Three digit code, as defined by ISO 4217
        #[arg(long)]
        numeric_code: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        symbol: String,
        /// Number of digits after the decimal sign
        #[arg(long, default_value = "2")]
        fraction_digits: String,
    },
    /// Change an existing currency. The code itself cannot change.
    Edit {
        code: String,
        #[arg(long)]
        numeric_code: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        fraction_digits: Option<String>,
    },
    /// List all currencies
    List,
}

#[derive(Subcommand)]
enum VariationCommands {
    /// Create or replace a product variation
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        sku: String,
        #[arg(long)]
        title: String,
        #[arg(long = "type", default_value = "default")]
        variation_type: String,
        #[arg(long, requires = "currency")]
        price: Option<String>,
        #[arg(long, requires = "price")]
        currency: Option<String>,
    },
    /// List all product variations
    List,
}

impl From<CurrencyCommands> for AppCommand {
    fn from(cmd: CurrencyCommands) -> AppCommand {
        match cmd {
            CurrencyCommands::Add {
                code,
                numeric_code,
                name,
                symbol,
                fraction_digits,
            } => AppCommand::CurrencyAdd(CurrencyFormValues {
                name,
                currency_code: code,
                numeric_code,
                symbol,
                fraction_digits,
            }),
            CurrencyCommands::Edit {
                code,
                numeric_code,
                name,
                symbol,
                fraction_digits,
            } => AppCommand::CurrencyEdit {
                currency_code: code,
                changes: CurrencyChanges {
                    name,
                    numeric_code,
                    symbol,
                    fraction_digits,
                },
            },
            CurrencyCommands::List => AppCommand::CurrencyList,
        }
    }
}

impl From<VariationCommands> for AppCommand {
    fn from(cmd: VariationCommands) -> AppCommand {
        match cmd {
            VariationCommands::Add {
                id,
                sku,
                title,
                variation_type,
                price,
                currency,
            } => AppCommand::VariationAdd(VariationInput {
                variation_id: id,
                variation_type,
                sku,
                title,
                price,
                currency_code: currency,
            }),
            VariationCommands::List => AppCommand::VariationList,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config_path = cli.config_path.as_deref();
    let result = match cli.command {
        Some(Commands::Setup) => setup(config_path).map(|message| println!("{message}")),
        Some(Commands::Currency(cmd)) => run_command(cmd.into(), config_path).await,
        Some(Commands::Variation(cmd)) => run_command(cmd.into(), config_path).await,
        Some(Commands::Autocomplete {
            query,
            target_type,
            match_operator,
            bundles,
        }) => {
            let cmd = AppCommand::Autocomplete {
                target_type,
                query,
                match_operator,
                target_bundles: bundles,
            };
            run_command(cmd, config_path).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        if let Some(SubmitError::Invalid(errors)) = e.downcast_ref::<SubmitError>() {
            eprintln!("{}", display_form_errors(errors));
        }
        tracing::error!(error = %e, "Application failed");
    }
    result
}
