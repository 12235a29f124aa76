//! # Transit - bus network query tool
//!
//! Reads a JSON document describing stops, buses and stat requests and
//! writes one JSON answer per request.
//!
//! ## Usage
//!
//! ```bash
//! # Answer a document from stdin
//! transit < requests.json
//!
//! # Files, pretty output, default routing settings from a config file
//! transit --config transit.toml --pretty process -i requests.json -o answers.json
//!
//! # Network summary
//! transit status -i requests.json --json
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transit::cli;

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // TRANSIT_LOG_FORMAT=json enables machine-parseable output. Logs go to
    // stderr; stdout is reserved for the response document.
    let log_format = std::env::var("TRANSIT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "transit=debug,transit_core=debug"
    } else {
        "transit=info,transit_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
