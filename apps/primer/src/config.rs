//! # Configuration
//!
//! Optional TOML file with defaults for the text commands:
//!
//! ```toml
//! [matching]
//! n = 3
//! cutoff = 0.6
//!
//! [digest]
//! algorithm = "sha256"
//!
//! [output]
//! json = false
//! ```
//!
//! Missing sections and keys fall back to the built-in defaults. Command-line
//! flags override whatever the file says.

use crate::error::CliError;
use primer_core::{DigestAlgorithm, MatchOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// File consulted when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "primer.toml";

/// Maximum configuration file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub matching: MatchOptions,
    pub digest: DigestConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DigestConfig {
    pub algorithm: DigestAlgorithm,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Emit JSON instead of human-readable text.
    pub json: bool,
}

impl Config {
    /// Parse configuration text. The matching options are validated here so
    /// that a bad file fails at startup rather than at first use.
    pub fn from_toml(text: &str, origin: &str) -> Result<Self, CliError> {
        let config: Self = toml::from_str(text).map_err(|e| CliError::Config {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.matching.validate()?;
        Ok(config)
    }

    /// Load the configuration.
    ///
    /// - `Some(path)`: the file must exist and parse.
    /// - `None`: `primer.toml` in the working directory is used if present;
    ///   otherwise the defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let path = match path {
            Some(path) => path,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    debug!("no configuration file, using defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let metadata = std::fs::metadata(path).map_err(|e| {
            CliError::Io(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(CliError::FileTooLarge {
                size: metadata.len(),
                max: MAX_CONFIG_FILE_SIZE,
            });
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            CliError::Io(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "configuration loaded");
        Self::from_toml(&text, &path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("", "inline").expect("parse");
        assert_eq!(config, Config::default());
        assert_eq!(config.matching, MatchOptions::default());
        assert_eq!(config.digest.algorithm, DigestAlgorithm::Sha256);
        assert!(!config.output.json);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml("[matching]\nn = 5\n", "inline").expect("parse");
        assert_eq!(config.matching.n, 5);
        assert_eq!(config.matching.cutoff, MatchOptions::default().cutoff);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            Config::from_toml("[matching]\ncutoff = 2.0\n", "inline"),
            Err(CliError::Primitive(_))
        ));
        assert!(matches!(
            Config::from_toml("[digest]\nalgorithm = \"md5\"\n", "inline"),
            Err(CliError::Config { .. })
        ));
        assert!(matches!(
            Config::from_toml("[unknown]\n", "inline"),
            Err(CliError::Config { .. })
        ));
    }

    #[test]
    fn misspelled_matching_field_is_rejected() {
        assert!(matches!(
            Config::from_toml("[matching]
cutof = 0.2
", "inline"),
            Err(CliError::Config { .. })
        ));
    }
}
