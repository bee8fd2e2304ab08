//! Logging setup for the `fob-models` binary.
//!
//! Logs go to stderr so that stdout only ever carries the JSON graph.
//!
//! # Example
//!
//! ```rust,no_run
//! use fob_models_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("scanning sources");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "fob_models=debug,fob_models_cli=debug";
const QUIET_FILTER: &str = "fob_models=error,fob_models_cli=error";
const DEFAULT_FILTER: &str = "fob_models=info,fob_models_cli=info";

/// Install the global tracing subscriber.
///
/// Level selection, first match wins:
/// 1. `verbose`: debug for the fob-models crates
/// 2. `quiet`: errors only
/// 3. `RUST_LOG`
/// 4. info for the fob-models crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Install the global subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}
