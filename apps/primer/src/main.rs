//! # Primer - Enhanced Primitives CLI
//!
//! The main binary for the primer-core library.
//!
//! ## Usage
//!
//! ```bash
//! # Text algorithms
//! primer match cat cot dog bat -n 2
//! primer common abcdef zcdef
//! primer digest hello --algorithm sha512
//!
//! # Numeric algorithms
//! primer base ff --from 16 --to 2
//! primer add 0.1 0.2
//!
//! # Mapping inspection
//! primer map -f data.json --sort --reverse
//! ```
//!
//! ## Environment
//!
//! - `RUST_LOG` - tracing filter (default `primer=info`)
//! - `PRIMER_LOG_FORMAT=json` - machine-parseable log output

use clap::Parser;
use primer::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing (PRIMER_LOG_FORMAT=json for machine-parseable output)
    let log_format = std::env::var("PRIMER_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "primer=debug,primer_core=debug"
    } else {
        "primer=info"
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

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Primer startup banner.
fn print_banner() {
    println!(
        r#"
  primer v{}
  indexed maps • bounded sequences • text and numeric algorithms
"#,
        env!("CARGO_PKG_VERSION")
    );
}
