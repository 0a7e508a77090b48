//! # Indexed Mapping
//!
//! An insertion-ordered key/value store addressable by key, by ordinal
//! position, or by slice.
//!
//! ## Addressing Rules
//!
//! - `get` with a slice returns a new mapping of the sliced pairs.
//! - `get` with a key present in the mapping returns a single-pair mapping.
//! - `get` with an integer that is NOT a key treats it as a position
//!   (negative positions count from the end).
//! - `set` with an integer always addresses a position; any other key upserts.
//!
//! An existing integer key shadows the position of the same value on `get`.
//! A mapping keyed by small integers therefore cannot be addressed
//! positionally without ambiguity. Use `get_index` for unambiguous positional
//! reads and `insert` for unambiguous key writes.

use crate::{Key, PrimitiveError, Value};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

// =============================================================================
// SLICE
// =============================================================================

/// A positional slice with optional bounds and step.
///
/// Bounds follow the usual half-open convention; negative bounds count from
/// the end and out-of-range bounds are clamped. A negative step walks
/// backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slice {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

impl Slice {
    /// Slice `[start, stop)` with step 1.
    #[must_use]
    pub const fn new(start: Option<isize>, stop: Option<isize>) -> Self {
        Self {
            start,
            stop,
            step: None,
        }
    }

    /// The whole range.
    #[must_use]
    pub const fn full() -> Self {
        Self::new(None, None)
    }

    /// Replace the step.
    #[must_use]
    pub const fn with_step(mut self, step: isize) -> Self {
        self.step = Some(step);
        self
    }

    /// Resolve the slice against a length into concrete positions, in
    /// traversal order.
    ///
    /// Returns `PrimitiveError::Interval` for a zero step.
    pub fn indices(&self, len: usize) -> Result<Vec<usize>, PrimitiveError> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(PrimitiveError::interval(
                "slice step",
                step,
                "non-zero integers",
            ));
        }

        let len = len as isize;
        let (lower, upper) = if step > 0 { (0, len) } else { (-1, len - 1) };
        let clamp = |bound: Option<isize>, default: isize| match bound {
            None => default,
            Some(b) if b < 0 => (b + len).max(lower),
            Some(b) => b.min(upper),
        };
        let (start, stop) = if step > 0 {
            (clamp(self.start, lower), clamp(self.stop, upper))
        } else {
            (clamp(self.start, upper), clamp(self.stop, lower))
        };

        let mut positions = Vec::new();
        let mut i = start;
        while (step > 0 && i < stop) || (step < 0 && i > stop) {
            positions.push(i as usize);
            i += step;
        }
        Ok(positions)
    }
}

/// The argument of `IndexedMapping::get`: a key (or position) or a slice.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Key(Key),
    Slice(Slice),
}

impl From<Key> for Lookup {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}

impl From<Slice> for Lookup {
    fn from(slice: Slice) -> Self {
        Self::Slice(slice)
    }
}

impl From<i64> for Lookup {
    fn from(i: i64) -> Self {
        Self::Key(Key::Int(i))
    }
}

impl From<i32> for Lookup {
    fn from(i: i32) -> Self {
        Self::Key(Key::from(i))
    }
}

impl From<bool> for Lookup {
    fn from(b: bool) -> Self {
        Self::Key(Key::Bool(b))
    }
}

impl From<&str> for Lookup {
    fn from(s: &str) -> Self {
        Self::Key(Key::from(s))
    }
}

impl From<String> for Lookup {
    fn from(s: String) -> Self {
        Self::Key(Key::Text(s))
    }
}

// =============================================================================
// INDEXED MAPPING
// =============================================================================

/// Ordered key/value store with positional addressing.
///
/// Position `i` always refers to the `i`-th pair in current insertion order.
/// Removals shift later positions down by one. Replacing the value of an
/// existing key keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMapping {
    entries: IndexMap<Key, Value>,
}

impl IndexedMapping {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn single(key: Key, value: Value) -> Self {
        let mut map = Self::new();
        map.entries.insert(key, value);
        map
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Plain key lookup, no positional fallback.
    #[must_use]
    pub fn value_of(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Plain positional lookup, no key precedence.
    pub fn get_index(&self, position: isize) -> Result<(&Key, &Value), PrimitiveError> {
        let index = self.resolve(position as i64)?;
        self.entries
            .get_index(index)
            .ok_or(PrimitiveError::IndexOutOfRange {
                index: position as i64,
                len: self.len(),
            })
    }

    /// Snapshot of the keys in order.
    #[must_use]
    pub fn keys(&self) -> Vec<Key> {
        self.entries.keys().cloned().collect()
    }

    /// Snapshot of the values in order.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.entries.values().cloned().collect()
    }

    /// Snapshot of the pairs in order.
    #[must_use]
    pub fn items(&self) -> Vec<(Key, Value)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Borrowing iterator over the pairs in order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.entries.iter()
    }

    /// Map a possibly negative position onto `0..len`.
    fn resolve(&self, position: i64) -> Result<usize, PrimitiveError> {
        let len = self.len() as i64;
        let index = if position < 0 { position + len } else { position };
        if (0..len).contains(&index) {
            Ok(index as usize)
        } else {
            Err(PrimitiveError::IndexOutOfRange {
                index: position,
                len: self.len(),
            })
        }
    }

    // =========================================================================
    // LOOKUP / ASSIGNMENT
    // =========================================================================

    /// Look up by slice, key or position (in that order of precedence for
    /// keys over positions).
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` for an integer that is neither a key nor a valid
    ///   position.
    /// - `KeyNotFound` for any other missing key.
    /// - `Interval` for a slice with a zero step.
    pub fn get(&self, at: impl Into<Lookup>) -> Result<Self, PrimitiveError> {
        match at.into() {
            Lookup::Slice(slice) => Ok(slice
                .indices(self.len())?
                .into_iter()
                .filter_map(|i| self.entries.get_index(i))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()),
            Lookup::Key(key) => {
                if let Some(value) = self.entries.get(&key) {
                    return Ok(Self::single(key, value.clone()));
                }
                match key {
                    Key::Int(position) => {
                        let index = self.resolve(position)?;
                        let (k, v) = self.entries.get_index(index).ok_or(
                            PrimitiveError::IndexOutOfRange {
                                index: position,
                                len: self.len(),
                            },
                        )?;
                        Ok(Self::single(k.clone(), v.clone()))
                    }
                    other => Err(PrimitiveError::KeyNotFound(other.to_string())),
                }
            }
        }
    }

    /// Assign by position (integer argument) or by key (anything else).
    ///
    /// A positional write replaces the value of the pair at that position.
    /// A key write inserts a new pair or replaces in place.
    ///
    /// An integer is always a position here, even when the mapping holds that
    /// integer as a key, so `set` followed by `get` does not round-trip for
    /// integer keys. Use `insert` to write an integer key.
    pub fn set(
        &mut self,
        at: impl Into<Key>,
        value: impl Into<Value>,
    ) -> Result<(), PrimitiveError> {
        let value = value.into();
        match at.into() {
            Key::Int(position) => {
                let index = self.resolve(position)?;
                let len = self.len();
                let (key, slot) =
                    self.entries
                        .get_index_mut(index)
                        .ok_or(PrimitiveError::IndexOutOfRange {
                            index: position,
                            len,
                        })?;
                debug!(position, key = %key, "positional write");
                *slot = value;
            }
            key => {
                self.entries.insert(key, value);
            }
        }
        Ok(())
    }

    /// Key upsert that never interprets integers as positions.
    ///
    /// Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    // =========================================================================
    // REMOVAL
    // =========================================================================

    /// Remove and return the pair at `position` (negative counts from the end;
    /// pass `-1` for the last pair).
    pub fn remove_by_index(&mut self, position: isize) -> Result<(Key, Value), PrimitiveError> {
        let index = self.resolve(position as i64)?;
        self.entries
            .shift_remove_index(index)
            .ok_or(PrimitiveError::IndexOutOfRange {
                index: position as i64,
                len: self.len(),
            })
    }

    /// Remove the first pair whose value equals `value`.
    pub fn remove_first_by_value(&mut self, value: &Value) -> Option<(Key, Value)> {
        let index = self.entries.values().position(|v| v == value)?;
        self.entries.shift_remove_index(index)
    }

    /// Remove every pair whose value equals `value`. Returns how many were removed.
    pub fn remove_all_by_value(&mut self, value: &Value) -> usize {
        let before = self.len();
        self.entries.retain(|_, v| v != value);
        before - self.len()
    }

    // =========================================================================
    // DEPTH / RULES
    // =========================================================================

    /// Nesting depth: `1 + max(depth(child))`, where a non-mapping value has
    /// depth 0. An empty mapping has depth 1.
    #[must_use]
    pub fn check_depth(&self) -> usize {
        1 + self
            .entries
            .values()
            .map(|v| v.as_map().map_or(0, Self::check_depth))
            .max()
            .unwrap_or(0)
    }

    /// Replace every top-level value `v` with `rule(v)`.
    pub fn apply_rule<F>(&mut self, mut rule: F) -> &mut Self
    where
        F: FnMut(Value) -> Value,
    {
        for value in self.entries.values_mut() {
            *value = rule(std::mem::take(value));
        }
        self
    }

    /// Replace every leaf value with `rule(leaf)`, descending into nested
    /// mappings. Lists are leaves.
    pub fn apply_rule_depth<F>(&mut self, mut rule: F) -> &mut Self
    where
        F: FnMut(Value) -> Value,
    {
        self.apply_leaves(&mut rule);
        self
    }

    fn apply_leaves<F>(&mut self, rule: &mut F)
    where
        F: FnMut(Value) -> Value,
    {
        for value in self.entries.values_mut() {
            match value {
                Value::Map(inner) => inner.apply_leaves(rule),
                leaf => *leaf = rule(std::mem::take(leaf)),
            }
        }
    }

    // =========================================================================
    // SORTING
    // =========================================================================

    /// Sort pairs by value (`Value::total_cmp`).
    pub fn sort(&mut self, reverse: bool) -> &mut Self {
        self.sort_by(|(_, a), (_, b)| a.total_cmp(b), reverse)
    }

    /// Sort pairs with a comparator over `(key, value)`.
    ///
    /// The sort is stable. With `reverse`, the ascending result is reversed
    /// as a whole, so equal pairs also appear in reverse order. The reorder
    /// happens in place; a panicking comparator leaves the pairs intact but
    /// possibly permuted.
    pub fn sort_by<F>(&mut self, mut compare: F, reverse: bool) -> &mut Self
    where
        F: FnMut((&Key, &Value), (&Key, &Value)) -> Ordering,
    {
        self.entries
            .sort_by(|k1, v1, k2, v2| compare((k1, v1), (k2, v2)));
        if reverse {
            self.entries.reverse();
        }
        debug!(len = self.len(), reverse, "mapping sorted");
        self
    }

    /// Sort pairs by a derived key.
    pub fn sort_by_key<T, F>(&mut self, mut key: F, reverse: bool) -> &mut Self
    where
        T: Ord,
        F: FnMut(&Key, &Value) -> T,
    {
        self.sort_by(|(k1, v1), (k2, v2)| key(k1, v1).cmp(&key(k2, v2)), reverse)
    }
}

impl<K, V> FromIterator<(K, V)> for IndexedMapping
where
    K: Into<Key>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for IndexedMapping {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a IndexedMapping {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for IndexedMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}

// =============================================================================
// TESTS
// =============================================================================
