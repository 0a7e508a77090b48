//! # Formats
//!
//! Conversions between the primer value model and external encodings.
//! File I/O stays in the app layer.

pub mod json;

pub use json::{mapping_from_json, mapping_to_json};
