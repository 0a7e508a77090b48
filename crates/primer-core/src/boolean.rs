//! Boolean with conversions to JSON, integers and human labels.

use crate::{Kinded, Value, ValueKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichBool(bool);

impl RichBool {
    #[must_use]
    pub const fn new(value: bool) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> bool {
        self.0
    }

    /// `{"value": true}` / `{"value": false}`.
    #[must_use]
    pub fn to_json(self) -> String {
        serde_json::json!({ "value": self.0 }).to_string()
    }

    #[must_use]
    pub const fn to_int(self) -> i64 {
        self.0 as i64
    }

    /// `"Yes"` or `"No"`.
    #[must_use]
    pub const fn to_label(self) -> &'static str {
        if self.0 { "Yes" } else { "No" }
    }
}

impl Kinded for RichBool {
    fn kind(&self) -> ValueKind {
        ValueKind::Boolean
    }
}

impl fmt::Display for RichBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_label())
    }
}

impl From<bool> for RichBool {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl From<RichBool> for Value {
    fn from(value: RichBool) -> Self {
        Self::Bool(value.0)
    }
}

/// Sum of the two truth values as integers (0, 1 or 2).
impl Add for RichBool {
    type Output = i64;

    fn add(self, other: Self) -> i64 {
        self.to_int() + other.to_int()
    }
}
