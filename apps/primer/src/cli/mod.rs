//! # Primer CLI Module
//!
//! This module implements the CLI interface for Primer.
//!
//! ## Available Commands
//!
//! - `match` - Closest candidates to a word by edit distance
//! - `distance` - Edit distance between two texts
//! - `common` - Longest common prefix, suffix and substring
//! - `inspect` - Reverse, palindrome check, numbers, e-mail check
//! - `mask` - Mask card-like digit runs
//! - `digest` - Hex digest of a text
//! - `base` - Convert an integer between bases
//! - `prime` - Primality test
//! - `add` - Artifact-free decimal addition
//! - `map` - Inspect, sort or query a JSON object
//! - `config` - Show the effective configuration

mod commands;

use crate::config::Config;
use crate::error::CliError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Primer - enhanced primitives on the command line
///
/// Text, numeric and mapping algorithms from primer-core.
#[derive(Parser, Debug)]
#[command(name = "primer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file (default: ./primer.toml if present)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (overrides the configuration file)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Closest candidates to a word by edit distance
    Match {
        /// Word to match against
        word: String,

        /// Candidate words
        #[arg(required = true)]
        candidates: Vec<String>,

        /// Maximum number of matches
        #[arg(short, long)]
        n: Option<usize>,

        /// Allowed distance as a fraction of the word length, in [0, 1]
        #[arg(long)]
        cutoff: Option<f64>,
    },

    /// Edit distance between two texts
    Distance { a: String, b: String },

    /// Longest common prefix, suffix and substring of two texts
    Common { a: String, b: String },

    /// Reverse, palindrome check, embedded numbers and e-mail check
    Inspect { text: String },

    /// Mask card-like digit runs (first and last four digits kept)
    Mask { text: String },

    /// Hex digest of a text
    Digest {
        text: String,

        /// Digest algorithm (sha224, sha256, sha384, sha512)
        #[arg(short, long)]
        algorithm: Option<String>,

        /// Compare the digest against this value in constant time
        #[arg(long)]
        expect: Option<String>,
    },

    /// Convert an integer between bases (2 to 36)
    Base {
        /// Digits of the value
        value: String,

        /// Base the value is written in
        #[arg(long, default_value = "10")]
        from: u32,

        /// Base to convert to
        #[arg(long)]
        to: u32,
    },

    /// Primality test
    Prime { value: i64 },

    /// Add decimal numbers without binary rounding artifacts
    Add {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },

    /// Inspect, sort or query a JSON object
    Map {
        /// Path to a JSON file whose top level is an object
        #[arg(short, long)]
        file: PathBuf,

        /// Sort pairs by value
        #[arg(long)]
        sort: bool,

        /// Sort by key instead of value (implies --sort)
        #[arg(long)]
        by_key: bool,

        /// Sort in descending order
        #[arg(long)]
        reverse: bool,

        /// Look up a key, or a position if no such key exists
        #[arg(long, allow_negative_numbers = true)]
        get: Option<String>,
    },

    /// Show the effective configuration
    Config,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), CliError> {
    let config = Config::load(cli.config.as_deref())?;
    let json_mode = cli.json_mode || config.output.json;

    match cli.command {
        Commands::Match {
            word,
            candidates,
            n,
            cutoff,
        } => cmd_match(&config, json_mode, &word, &candidates, n, cutoff),
        Commands::Distance { a, b } => cmd_distance(json_mode, &a, &b),
        Commands::Common { a, b } => cmd_common(json_mode, &a, &b),
        Commands::Inspect { text } => cmd_inspect(json_mode, &text),
        Commands::Mask { text } => cmd_mask(json_mode, &text),
        Commands::Digest {
            text,
            algorithm,
            expect,
        } => cmd_digest(
            &config,
            json_mode,
            &text,
            algorithm.as_deref(),
            expect.as_deref(),
        ),
        Commands::Base { value, from, to } => cmd_base(json_mode, &value, from, to),
        Commands::Prime { value } => cmd_prime(json_mode, value),
        Commands::Add { values } => cmd_add(json_mode, &values),
        Commands::Map {
            file,
            sort,
            by_key,
            reverse,
            get,
        } => cmd_map(
            json_mode,
            &file,
            MapAction::from_flags(sort, by_key, reverse, get),
        ),
        Commands::Config => cmd_config(&config, json_mode),
    }
}
