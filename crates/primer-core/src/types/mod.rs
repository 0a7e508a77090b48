//! # Core Type Definitions
//!
//! The dynamic value model shared by every primer container:
//! - Runtime type tags (`ValueKind`) and type selectors (`KindSet`)
//! - Hashable mapping keys (`Key`)
//! - Dynamically typed values (`Value`)
//! - Error types (`PrimitiveError`)
//!
//! ## Equality and Ordering
//!
//! `Value` equality is numeric across the integer and float kinds (`1 == 1.0`),
//! structural everywhere else. `Value::total_cmp` provides a deterministic total
//! order used for sorting and for `max`/`min` aggregates.

use crate::mapping::IndexedMapping;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// VALUE KIND
// =============================================================================

/// Runtime type tag of a value.
///
/// This is what a caller names when filtering a sequence by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    Text,
    List,
    Map,
}

impl ValueKind {
    /// Every kind, in rank order.
    pub const ALL: [Self; 7] = [
        Self::Null,
        Self::Boolean,
        Self::Integer,
        Self::Float,
        Self::Text,
        Self::List,
        Self::Map,
    ];

    /// Check if this kind is numeric.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// Check if this kind is a collection.
    #[must_use]
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::List | Self::Map)
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::List => "list",
            Self::Map => "map",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueKind {
    type Err = PrimitiveError;

    /// Accepts the canonical names plus the usual aliases (`int`, `str`, `dict`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "null" | "none" | "nil" => Ok(Self::Null),
            "bool" | "boolean" => Ok(Self::Boolean),
            "int" | "integer" | "i64" => Ok(Self::Integer),
            "float" | "f64" | "double" => Ok(Self::Float),
            "text" | "str" | "string" => Ok(Self::Text),
            "list" | "array" | "vec" | "tuple" => Ok(Self::List),
            "map" | "dict" | "object" => Ok(Self::Map),
            _ => Err(PrimitiveError::UnknownKind(s.to_string())),
        }
    }
}

/// Anything that can report its runtime kind.
///
/// Sequences use this to answer type-filtered queries.
pub trait Kinded {
    fn kind(&self) -> ValueKind;
}

impl Kinded for bool {
    fn kind(&self) -> ValueKind {
        ValueKind::Boolean
    }
}

impl Kinded for i64 {
    fn kind(&self) -> ValueKind {
        ValueKind::Integer
    }
}

impl Kinded for f64 {
    fn kind(&self) -> ValueKind {
        ValueKind::Float
    }
}

impl Kinded for String {
    fn kind(&self) -> ValueKind {
        ValueKind::Text
    }
}

impl Kinded for &str {
    fn kind(&self) -> ValueKind {
        ValueKind::Text
    }
}

// =============================================================================
// KIND SET (type selector)
// =============================================================================

/// A type selector: one kind or a set of kinds.
///
/// Built from a single `ValueKind`, an array, a slice or a `Vec` of kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindSet(BTreeSet<ValueKind>);

impl KindSet {
    /// Create an empty selector (matches nothing).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `kind` is selected.
    #[must_use]
    pub fn contains(&self, kind: ValueKind) -> bool {
        self.0.contains(&kind)
    }

    /// Check whether the runtime kind of `item` is selected.
    #[must_use]
    pub fn matches<T: Kinded + ?Sized>(&self, item: &T) -> bool {
        self.contains(item.kind())
    }

    /// Iterate over the selected kinds in rank order.
    pub fn iter(&self) -> impl Iterator<Item = ValueKind> + '_ {
        self.0.iter().copied()
    }
}

impl From<ValueKind> for KindSet {
    fn from(kind: ValueKind) -> Self {
        Self(BTreeSet::from([kind]))
    }
}

impl<const N: usize> From<[ValueKind; N]> for KindSet {
    fn from(kinds: [ValueKind; N]) -> Self {
        Self(kinds.into_iter().collect())
    }
}

impl From<&[ValueKind]> for KindSet {
    fn from(kinds: &[ValueKind]) -> Self {
        Self(kinds.iter().copied().collect())
    }
}

impl From<Vec<ValueKind>> for KindSet {
    fn from(kinds: Vec<ValueKind>) -> Self {
        Self(kinds.into_iter().collect())
    }
}

impl FromIterator<ValueKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = ValueKind>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// =============================================================================
// KEY
// =============================================================================

/// A hashable mapping key.
///
/// Floats, lists and maps are not hashable and cannot be keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl Key {
    /// The integer payload, if this is an integer key.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The text payload, if this is a text key.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Kinded for Key {
    fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Boolean,
            Self::Int(_) => ValueKind::Integer,
            Self::Text(_) => ValueKind::Text,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Bool(b) => Self::Bool(b),
            Key::Int(i) => Self::Int(i),
            Key::Text(s) => Self::Text(s),
        }
    }
}

// =============================================================================
// VALUE
// =============================================================================

/// A dynamically typed value.
///
/// Values own their contents; nested maps are owned `IndexedMapping`s, so a
/// value tree never contains cycles or shared mutable state.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    Map(IndexedMapping),
}

impl Value {
    /// Numeric view of integer and float values.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&IndexedMapping> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut IndexedMapping> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Add two numeric values.
    ///
    /// Integer + integer stays integer (overflow is an error); any float
    /// operand promotes the result to float.
    pub fn checked_add(&self, other: &Self) -> Result<Self, PrimitiveError> {
        if let (Self::Int(a), Self::Int(b)) = (self, other) {
            return a
                .checked_add(*b)
                .map(Self::Int)
                .ok_or(PrimitiveError::Overflow("add"));
        }
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => Ok(Self::Float(a + b)),
            (None, _) => Err(PrimitiveError::TypeMismatch {
                operation: "add",
                kind: self.kind(),
            }),
            (Some(_), None) => Err(PrimitiveError::TypeMismatch {
                operation: "add",
                kind: other.kind(),
            }),
        }
    }

    /// Deterministic total order over all values.
    ///
    /// Values of different kinds order by kind rank (null, boolean, number,
    /// text, list, map). Integers and floats share a rank and compare
    /// numerically. Maps compare by length only.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Int(a), Self::Float(b)) => (*a as f64).total_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.total_cmp(&(*b as f64)),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) => a
                .iter()
                .zip(b)
                .map(|(x, y)| x.total_cmp(y))
                .find(|o| o.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            (Self::Map(a), Self::Map(b)) => a.len().cmp(&b.len()),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Text(_) => 3,
            Self::List(_) => 4,
            Self::Map(_) => 5,
        }
    }
}

impl Kinded for Value {
    fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Boolean,
            Self::Int(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => *a as f64 == *b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => write!(f, "{map}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<IndexedMapping> for Value {
    fn from(map: IndexedMapping) -> Self {
        Self::Map(map)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised by the primer containers.
///
/// - Raised synchronously at the point of violation
/// - Never retried, never logged, never downgraded to a default value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PrimitiveError {
    /// An append would push a bounded sequence past its limit.
    #[error("Maximum size exceeded: limit is {limit}")]
    MaxSize { limit: usize },

    /// A positional access or removal fell outside the current length.
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    /// Neither a key nor a valid position matched a lookup.
    #[error("Key or index not found: {0}")]
    KeyNotFound(String),

    /// A numeric parameter fell outside its valid interval.
    #[error("{name} must lie in {interval}, got {value}")]
    Interval {
        name: &'static str,
        value: String,
        interval: &'static str,
    },

    /// An operand of an unsupported kind.
    #[error("Cannot {operation} a value of kind {kind}")]
    TypeMismatch {
        operation: &'static str,
        kind: ValueKind,
    },

    /// An aggregate was requested over an empty sequence.
    #[error("Cannot compute {0} of an empty sequence")]
    EmptySequence(&'static str),

    /// Text that does not parse as a number.
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// Integer arithmetic overflowed.
    #[error("Arithmetic overflow in {0}")]
    Overflow(&'static str),

    /// A regular expression failed to compile.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// The named digest algorithm is not available.
    #[error("Unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// A type name that does not denote a `ValueKind`.
    #[error("Unknown value kind: {0}")]
    UnknownKind(String),

    /// JSON input that failed to parse.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
}

impl PrimitiveError {
    /// Build an `Interval` error from any displayable offending value.
    pub fn interval(name: &'static str, value: impl fmt::Display, interval: &'static str) -> Self {
        Self::Interval {
            name,
            value: value.to_string(),
            interval,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
