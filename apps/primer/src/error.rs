//! Errors raised by the command-line layer.

use primer_core::PrimitiveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// An operation of the core library failed.
    #[error(transparent)]
    Primitive(#[from] PrimitiveError),

    /// Reading an input or configuration file failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// The configuration file could not be parsed.
    #[error("Configuration error in {path}: {message}")]
    Config { path: String, message: String },

    /// An input file is larger than the accepted maximum.
    #[error("File size {size} bytes exceeds maximum allowed {max} bytes")]
    FileTooLarge { size: u64, max: u64 },
}
