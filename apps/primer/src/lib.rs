//! # primer
//!
//! Command-line front end for primer-core - THE BINARY.
//!
//! The library target exposes the CLI structure, configuration loading and
//! command implementations so they can be driven from integration tests.

pub mod cli;
pub mod config;
pub mod error;

pub use config::Config;
pub use error::CliError;
