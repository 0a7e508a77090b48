//! # JSON Bridge
//!
//! `serde_json::Value` ⇄ `Value`, plus string helpers for whole mappings.
//!
//! Object key order is kept in both directions. Mapping keys that are not
//! text (integers, booleans) are written as their decimal/`true`/`false`
//! spelling, so they come back as text keys.

use crate::{IndexedMapping, Key, Kinded, PrimitiveError, Value};
use serde_json::{Map, Number};

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or_default(),
            serde_json::Value::String(s) => Self::Text(s.clone()),
            serde_json::Value::Array(items) => Self::List(items.iter().map(Self::from).collect()),
            serde_json::Value::Object(object) => Self::Map(mapping_from_object(object)),
        }
    }
}

impl TryFrom<&Value> for serde_json::Value {
    type Error = PrimitiveError;

    /// Fails only on non-finite floats, which JSON cannot represent.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Int(i) => Self::Number((*i).into()),
            Value::Float(x) => Number::from_f64(*x)
                .map(Self::Number)
                .ok_or_else(|| PrimitiveError::InvalidNumber(x.to_string()))?,
            Value::Text(s) => Self::String(s.clone()),
            Value::List(items) => Self::Array(
                items
                    .iter()
                    .map(Self::try_from)
                    .collect::<Result<Vec<_>, PrimitiveError>>()?,
            ),
            Value::Map(mapping) => Self::Object(object_from_mapping(mapping)?),
        })
    }
}

fn mapping_from_object(object: &Map<String, serde_json::Value>) -> IndexedMapping {
    object
        .iter()
        .map(|(k, v)| (Key::from(k.as_str()), Value::from(v)))
        .collect()
}

fn object_from_mapping(
    mapping: &IndexedMapping,
) -> Result<Map<String, serde_json::Value>, PrimitiveError> {
    mapping
        .iter()
        .map(|(key, value)| {
            let name = match key {
                Key::Text(s) => s.clone(),
                Key::Int(i) => i.to_string(),
                Key::Bool(b) => b.to_string(),
            };
            Ok((name, serde_json::Value::try_from(value)?))
        })
        .collect()
}

/// Parse a JSON document whose top level is an object.
pub fn mapping_from_json(text: &str) -> Result<IndexedMapping, PrimitiveError> {
    let json: serde_json::Value =
        serde_json::from_str(text).map_err(|e| PrimitiveError::InvalidJson(e.to_string()))?;
    match json {
        serde_json::Value::Object(object) => Ok(mapping_from_object(&object)),
        other => Err(PrimitiveError::TypeMismatch {
            operation: "build a mapping from",
            kind: Value::from(&other).kind(),
        }),
    }
}

/// Render a mapping as a JSON object, compact or pretty.
pub fn mapping_to_json(mapping: &IndexedMapping, pretty: bool) -> Result<String, PrimitiveError> {
    let object = serde_json::Value::Object(object_from_mapping(mapping)?);
    let rendered = if pretty {
        serde_json::to_string_pretty(&object)
    } else {
        serde_json::to_string(&object)
    };
    rendered.map_err(|e| PrimitiveError::InvalidJson(e.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_order_survives_a_round_trip() {
        let text = r#"{"zeta":1,"alpha":{"inner":[1,2.5,"x",null]},"mid":true}"#;
        let mapping = mapping_from_json(text).expect("parse");
        assert_eq!(
            mapping.keys(),
            vec![Key::from("zeta"), Key::from("alpha"), Key::from("mid")]
        );
        assert_eq!(mapping.check_depth(), 2);
        assert_eq!(mapping_to_json(&mapping, false).expect("render"), text);
    }

    #[test]
    fn non_text_keys_are_spelled_out() {
        let mapping: IndexedMapping = [
            (Key::Int(7), Value::from("seven")),
            (Key::Bool(true), Value::Null),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            mapping_to_json(&mapping, false).expect("render"),
            r#"{"7":"seven","true":null}"#
        );
    }

    #[test]
    fn rejects_non_objects_and_bad_input() {
        assert!(matches!(
            mapping_from_json("[1, 2]"),
            Err(PrimitiveError::TypeMismatch { .. })
        ));
        assert!(matches!(
            mapping_from_json("{"),
            Err(PrimitiveError::InvalidJson(_))
        ));
    }

    #[test]
    fn non_finite_floats_cannot_be_written() {
        let mapping: IndexedMapping = [("x", Value::Float(f64::NAN))].into_iter().collect();
        assert!(matches!(
            mapping_to_json(&mapping, false),
            Err(PrimitiveError::InvalidNumber(_))
        ));
    }

    #[test]
    fn large_unsigned_numbers_become_floats() {
        let json: serde_json::Value = serde_json::from_str("18446744073709551615").expect("json");
        assert!(matches!(Value::from(&json), Value::Float(_)));
    }
}
