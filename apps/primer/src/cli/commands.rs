//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::config::Config;
use crate::error::CliError;
use primer_core::{
    CorrectFloat, DigestAlgorithm, IndexedMapping, Key, MatchOptions, Value, WeakInt,
    TextUtility, edit_distance, mapping_from_json, mapping_to_json,
};
use std::path::Path;
use tracing::debug;

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size of a JSON input file (100 MB).
const MAX_INPUT_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Read a file after checking its size.
fn read_input_file(path: &Path, max_size: u64) -> Result<String, CliError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| CliError::Io(format!("Cannot read file metadata: {}", e)))?;
    if !metadata.is_file() {
        return Err(CliError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }
    if metadata.len() > max_size {
        return Err(CliError::FileTooLarge {
            size: metadata.len(),
            max: max_size,
        });
    }
    std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("Cannot read '{}': {}", path.display(), e)))
}

fn print_json(output: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(output).unwrap_or_default()
    );
}

// =============================================================================
// TEXT COMMANDS
// =============================================================================

/// Closest candidates to `word`. Flags override the configured options.
pub fn cmd_match(
    config: &Config,
    json_mode: bool,
    word: &str,
    candidates: &[String],
    n: Option<usize>,
    cutoff: Option<f64>,
) -> Result<(), CliError> {
    let options = MatchOptions::new(
        n.unwrap_or(config.matching.n),
        cutoff.unwrap_or(config.matching.cutoff),
    );
    let matches = TextUtility::from(word).closest_matches(candidates, options)?;

    if json_mode {
        print_json(&serde_json::json!({
            "word": word,
            "n": options.n,
            "cutoff": options.cutoff,
            "matches": matches,
        }));
        return Ok(());
    }

    if matches.is_empty() {
        println!("No candidate within the cutoff");
    }
    for candidate in &matches {
        println!("{} (distance {})", candidate, edit_distance(word, candidate));
    }
    Ok(())
}

pub fn cmd_distance(json_mode: bool, a: &str, b: &str) -> Result<(), CliError> {
    let distance = edit_distance(a, b);
    if json_mode {
        print_json(&serde_json::json!({ "a": a, "b": b, "distance": distance }));
    } else {
        println!("{}", distance);
    }
    Ok(())
}

pub fn cmd_common(json_mode: bool, a: &str, b: &str) -> Result<(), CliError> {
    let text = TextUtility::from(a);
    let prefix = text.longest_common_prefix(b);
    let suffix = text.longest_common_suffix(b);
    let substring = text.longest_common_substring(b);

    if json_mode {
        print_json(&serde_json::json!({
            "prefix": prefix,
            "suffix": suffix,
            "substring": substring,
        }));
        return Ok(());
    }

    println!("Prefix:    {:?}", prefix.as_str());
    println!("Suffix:    {:?}", suffix.as_str());
    println!("Substring: {:?}", substring.as_str());
    Ok(())
}

pub fn cmd_inspect(json_mode: bool, input: &str) -> Result<(), CliError> {
    let text = TextUtility::from(input);
    let numbers: Vec<String> = text
        .extract_numbers()?
        .iter()
        .map(ToString::to_string)
        .collect();

    if json_mode {
        print_json(&serde_json::json!({
            "chars": text.char_count(),
            "reversed": text.reverse(),
            "palindrome": text.is_palindrome(),
            "numbers": numbers,
            "email": text.is_valid_email(),
        }));
        return Ok(());
    }

    println!("Text Inspection");
    println!("===============");
    println!("Chars:      {}", text.char_count());
    println!("Reversed:   {}", text.reverse());
    println!("Palindrome: {}", text.is_palindrome());
    println!("Numbers:    {}", numbers.join(", "));
    println!("E-mail:     {}", text.is_valid_email());
    Ok(())
}

pub fn cmd_mask(json_mode: bool, input: &str) -> Result<(), CliError> {
    let masked = TextUtility::from(input).mask_credit_card()?;
    if json_mode {
        print_json(&serde_json::json!({ "masked": masked }));
    } else {
        println!("{}", masked);
    }
    Ok(())
}

/// Digest under the named algorithm, or the configured one.
pub fn cmd_digest(
    config: &Config,
    json_mode: bool,
    input: &str,
    algorithm: Option<&str>,
    expected: Option<&str>,
) -> Result<(), CliError> {
    let algorithm: DigestAlgorithm = match algorithm {
        Some(name) => name.parse()?,
        None => config.digest.algorithm,
    };
    let digest = TextUtility::from(input).hash_digest(algorithm);
    let matches = expected.map(|other| digest.compare_hashes(other));

    if json_mode {
        print_json(&serde_json::json!({
            "algorithm": algorithm.name(),
            "digest": digest,
            "matches": matches,
        }));
        return Ok(());
    }

    println!("{}  ({})", digest, algorithm);
    if let Some(matches) = matches {
        println!("Match: {}", if matches { "yes" } else { "no" });
    }
    Ok(())
}

// =============================================================================
// NUMERIC COMMANDS
// =============================================================================

pub fn cmd_base(json_mode: bool, value: &str, from: u32, to: u32) -> Result<(), CliError> {
    let number = WeakInt::from_base(value, from)?;
    let converted = number.to_base(to)?;

    if json_mode {
        print_json(&serde_json::json!({
            "value": number.get(),
            "base": to,
            "digits": converted,
        }));
    } else {
        println!("{}", converted);
    }
    Ok(())
}

pub fn cmd_prime(json_mode: bool, value: i64) -> Result<(), CliError> {
    let prime = WeakInt::new(value).is_prime();
    if json_mode {
        print_json(&serde_json::json!({ "value": value, "prime": prime }));
    } else {
        println!("{} is {}prime", value, if prime { "" } else { "not " });
    }
    Ok(())
}

/// Left-to-right sum with rounding after every addition.
pub fn cmd_add(json_mode: bool, values: &[f64]) -> Result<(), CliError> {
    let sum = values
        .iter()
        .copied()
        .map(CorrectFloat::new)
        .reduce(|acc, x| acc + x)
        .unwrap_or_default();

    if json_mode {
        print_json(&serde_json::json!({ "values": values, "sum": sum }));
    } else {
        println!("{}", sum);
    }
    Ok(())
}

// =============================================================================
// MAPPING COMMAND
// =============================================================================

/// What `map` does with the loaded object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapAction {
    /// Summary: length, depth and keys.
    Show,
    /// Print the object sorted by value (or key).
    Sort { by_key: bool, reverse: bool },
    /// Print the pair(s) selected by a key or position.
    Get(String),
}

impl MapAction {
    /// A lookup wins over sorting; `--by-key` and `--reverse` imply `--sort`.
    #[must_use]
    pub fn from_flags(sort: bool, by_key: bool, reverse: bool, get: Option<String>) -> Self {
        match get {
            Some(at) => Self::Get(at),
            None if sort || by_key || reverse => Self::Sort { by_key, reverse },
            None => Self::Show,
        }
    }
}

/// JSON keys are always text, so an existing text key wins. Otherwise an
/// integer addresses a position and anything else stays a (missing) key.
fn lookup_key(mapping: &IndexedMapping, at: &str) -> Key {
    let key = Key::from(at);
    if mapping.contains_key(&key) {
        return key;
    }
    at.parse::<i64>().map(Key::Int).unwrap_or(key)
}

pub fn cmd_map(json_mode: bool, file: &Path, action: MapAction) -> Result<(), CliError> {
    let text = read_input_file(file, MAX_INPUT_FILE_SIZE)?;
    let mut mapping = mapping_from_json(&text)?;
    debug!(pairs = mapping.len(), "mapping loaded");

    match action {
        MapAction::Show => show_mapping(json_mode, &mapping),
        MapAction::Sort { by_key, reverse } => {
            if by_key {
                mapping.sort_by_key(|key, _| key.clone(), reverse);
            } else {
                mapping.sort(reverse);
            }
            println!("{}", mapping_to_json(&mapping, true)?);
            Ok(())
        }
        MapAction::Get(at) => {
            let selected = mapping.get(lookup_key(&mapping, &at))?;
            println!("{}", mapping_to_json(&selected, json_mode)?);
            Ok(())
        }
    }
}

fn show_mapping(json_mode: bool, mapping: &IndexedMapping) -> Result<(), CliError> {
    let keys: Vec<String> = mapping.keys().iter().map(ToString::to_string).collect();
    let nested = mapping
        .values()
        .iter()
        .filter(|v| matches!(v, Value::Map(_)))
        .count();

    if json_mode {
        print_json(&serde_json::json!({
            "pairs": mapping.len(),
            "depth": mapping.check_depth(),
            "nested_mappings": nested,
            "keys": keys,
        }));
        return Ok(());
    }

    println!("Mapping Summary");
    println!("===============");
    println!("Pairs:           {}", mapping.len());
    println!("Depth:           {}", mapping.check_depth());
    println!("Nested mappings: {}", nested);
    println!("Keys:            {}", keys.join(", "));
    Ok(())
}

// =============================================================================
// CONFIG COMMAND
// =============================================================================

pub fn cmd_config(config: &Config, json_mode: bool) -> Result<(), CliError> {
    if json_mode {
        print_json(&serde_json::to_value(config).unwrap_or_default());
        return Ok(());
    }

    println!("Effective Configuration");
    println!("=======================");
    println!("[matching] n         = {}", config.matching.n);
    println!("[matching] cutoff    = {}", config.matching.cutoff);
    println!("[digest]   algorithm = {}", config.digest.algorithm);
    println!("[output]   json      = {}", config.output.json);
    Ok(())
}
