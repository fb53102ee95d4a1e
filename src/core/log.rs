use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Levels emitted by this crate. Skipped autocomplete prices are logged as
/// warnings, so those stay visible without `--verbose`.
fn crate_targets(verbose: bool) -> Targets {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    Targets::new().with_target(CRATE_TARGET, level)
}

/// Installs the global subscriber. `RUST_LOG` overrides the verbosity flag.
///
/// Logs go to stderr so listings printed on stdout stay clean.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(crate_targets(verbose))
        .with(env_filter)
        .init();
}
