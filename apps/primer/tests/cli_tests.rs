//! Integration tests for argument parsing, configuration loading and the
//! file-reading commands.

// Allow panic in tests - match arms on unexpected variants
#![allow(clippy::panic)]

use clap::Parser;
use primer::cli::{Cli, Commands, MapAction, cmd_map, execute};
use primer::{CliError, Config};
use primer_core::{DigestAlgorithm, PrimitiveError};
use std::io::Write;
use tempfile::NamedTempFile;

fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write");
    file
}

// =============================================================================
// CONFIGURATION
// =============================================================================

#[test]
fn config_file_is_loaded() {
    let file = temp_file("[matching]\nn = 1\ncutoff = 0.25\n\n[output]\njson = true\n");
    let config = Config::load(Some(file.path())).expect("load");
    assert_eq!(config.matching.n, 1);
    assert_eq!(config.matching.cutoff, 0.25);
    assert!(config.output.json);
    assert_eq!(config.digest.algorithm, DigestAlgorithm::Sha256);
}

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = tempfile::tempdir().expect("dir");
    let missing = dir.path().join("absent.toml");
    assert!(matches!(
        Config::load(Some(missing.as_path())),
        Err(CliError::Io(_))
    ));
}

#[test]
fn malformed_config_names_the_file() {
    let file = temp_file("[matching\n");
    match Config::load(Some(file.path())) {
        Err(CliError::Config { path, .. }) => {
            assert_eq!(path, file.path().display().to_string());
        }
        other => panic!("expected a config error, got {other:?}"),
    }
}

// =============================================================================
// ARGUMENT PARSING
// =============================================================================

#[test]
fn match_flags_are_parsed() {
    let cli = Cli::try_parse_from(["primer", "match", "cat", "cot", "bat", "-n", "2"])
        .expect("parse");
    match cli.command {
        Commands::Match {
            word,
            candidates,
            n,
            cutoff,
        } => {
            assert_eq!(word, "cat");
            assert_eq!(candidates, vec!["cot", "bat"]);
            assert_eq!(n, Some(2));
            assert_eq!(cutoff, None);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn add_accepts_negative_numbers() {
    let cli = Cli::try_parse_from(["primer", "add", "-0.5", "0.25"]).expect("parse");
    assert!(matches!(cli.command, Commands::Add { ref values } if values == &[-0.5, 0.25]));
}

#[test]
fn match_requires_candidates() {
    assert!(Cli::try_parse_from(["primer", "match", "cat"]).is_err());
}

// =============================================================================
// COMMANDS
// =============================================================================

#[test]
fn execute_surfaces_core_errors() {
    let config = temp_file("");
    let path = config.path().to_string_lossy().into_owned();
    let cli = Cli::try_parse_from([
        "primer", "-q", "--config", path.as_str(), "match", "cat", "cot", "--cutoff", "1.5",
    ])
    .expect("parse");
    assert!(matches!(
        execute(cli),
        Err(CliError::Primitive(PrimitiveError::Interval { .. }))
    ));
}

#[test]
fn execute_runs_numeric_commands() {
    let config = temp_file("");
    let path = config.path().to_string_lossy().into_owned();
    for args in [
        vec!["primer", "--config", path.as_str(), "base", "ff", "--from", "16", "--to", "2"],
        vec!["primer", "--config", path.as_str(), "prime", "97"],
        vec!["primer", "--config", path.as_str(), "add", "0.1", "0.2"],
    ] {
        let cli = Cli::try_parse_from(args).expect("parse");
        execute(cli).expect("execute");
    }
}

#[test]
fn map_command_reads_json_objects() {
    let json = temp_file(r#"{"b": 2, "a": {"x": 1}, "c": 0}"#);
    for action in [
        MapAction::Show,
        MapAction::Sort {
            by_key: false,
            reverse: true,
        },
        MapAction::Get("a".to_string()),
        MapAction::Get("-1".to_string()),
    ] {
        cmd_map(true, json.path(), action).expect("map");
    }
}

#[test]
fn map_command_finds_numeric_text_keys() {
    let json = temp_file(r#"{"a": 1, "5": "five"}"#);
    cmd_map(false, json.path(), MapAction::Get("5".to_string())).expect("key 5");
    cmd_map(false, json.path(), MapAction::Get("1".to_string())).expect("position 1");
    assert!(matches!(
        cmd_map(false, json.path(), MapAction::Get("9".to_string())),
        Err(CliError::Primitive(PrimitiveError::IndexOutOfRange { index: 9, len: 2 }))
    ));
}

#[test]
fn map_command_rejects_bad_input() {
    let array = temp_file("[1, 2, 3]");
    assert!(matches!(
        cmd_map(false, array.path(), MapAction::Show),
        Err(CliError::Primitive(PrimitiveError::TypeMismatch { .. }))
    ));

    let object = temp_file(r#"{"a": 1}"#);
    assert!(matches!(
        cmd_map(false, object.path(), MapAction::Get("missing".to_string())),
        Err(CliError::Primitive(PrimitiveError::KeyNotFound(_)))
    ));

    let dir = tempfile::tempdir().expect("dir");
    assert!(matches!(
        cmd_map(false, dir.path(), MapAction::Show),
        Err(CliError::Io(_))
    ));
}
