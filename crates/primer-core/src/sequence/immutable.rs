//! Copy-on-write sequence.
//!
//! Every structural operation leaves the receiver untouched and returns a new
//! value. Elements are shared between a value and its clones, never between
//! a value and the values derived from it.

use super::{check_capacity, resolve_position, CycleState, SequenceOps};
use crate::{KindSet, Kinded, PrimitiveError};
use std::ops::{Add, Sub};
use std::sync::Arc;

/// An ordered, fixed sequence.
///
/// The optional maximum length belongs to the value it was set on (the value
/// returned by `limit`). Values derived from it by any other operation start
/// without a limit.
#[derive(Debug)]
pub struct ImmutableSequence<T> {
    items: Arc<[T]>,
    max_size: Option<usize>,
    cycle: CycleState,
}

impl<T> ImmutableSequence<T> {
    /// Create an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// New sequence with `item` appended.
    ///
    /// Fails with `MaxSize` when this value carries a limit that the new
    /// length would exceed. The returned value carries no limit, so only the
    /// first append after `limit` is checked.
    pub fn append(&self, item: T) -> Result<Self, PrimitiveError>
    where
        T: Clone,
    {
        check_capacity(self.max_size, self.items.len())?;
        Ok(self.items.iter().cloned().chain(std::iter::once(item)).collect())
    }

    /// New sequence without the element at `position` (negative counts from
    /// the end).
    pub fn pop(&self, position: isize) -> Result<Self, PrimitiveError>
    where
        T: Clone,
    {
        let index = resolve_position(position, self.items.len())?;
        Ok(self
            .items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, item)| item.clone())
            .collect())
    }

    /// New sequence without any element equal to `item`.
    #[must_use]
    pub fn remove(&self, item: &T) -> Self
    where
        T: Clone + PartialEq,
    {
        self.filter(|x| x != item)
    }

    /// Alias of `remove`, matching the in-place variant's name.
    #[must_use]
    pub fn remove_all(&self, item: &T) -> Self
    where
        T: Clone + PartialEq,
    {
        self.remove(item)
    }

    /// New sequence holding only the elements for which `predicate` holds.
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        T: Clone,
        P: FnMut(&T) -> bool,
    {
        self.items.iter().filter(|item| predicate(item)).cloned().collect()
    }

    /// New sequence with every element replaced by `rule(element)`.
    #[must_use]
    pub fn apply_rule<F>(&self, rule: F) -> Self
    where
        T: Clone,
        F: FnMut(T) -> T,
    {
        self.items.iter().cloned().map(rule).collect()
    }

    /// New sequence with every element of a selected kind replaced by
    /// `rule(element)`.
    #[must_use]
    pub fn apply_rule_by_type<F>(&self, kinds: impl Into<KindSet>, mut rule: F) -> Self
    where
        T: Clone + Kinded,
        F: FnMut(T) -> T,
    {
        let kinds = kinds.into();
        self.apply_rule(|item| if kinds.matches(&item) { rule(item) } else { item })
    }

    /// New sequence without the elements of a selected kind.
    #[must_use]
    pub fn remove_by_type(&self, kinds: impl Into<KindSet>) -> Self
    where
        T: Clone + Kinded,
    {
        let kinds = kinds.into();
        self.filter(|item| !kinds.matches(item))
    }

    /// New sequence truncated to `max_size` elements and carrying that limit.
    #[must_use]
    pub fn limit(&self, max_size: usize) -> Self
    where
        T: Clone,
    {
        let mut limited: Self = self.items.iter().take(max_size).cloned().collect();
        limited.max_size = Some(max_size);
        limited
    }

    /// Copy of this sequence without a limit.
    #[must_use]
    pub fn stop_limit(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            max_size: None,
            cycle: CycleState::default(),
        }
    }
}

impl<T> SequenceOps<T> for ImmutableSequence<T> {
    fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn from_vec(items: Vec<T>) -> Self {
        Self {
            items: items.into(),
            max_size: None,
            cycle: CycleState::default(),
        }
    }

    fn cycle_state(&self) -> &CycleState {
        &self.cycle
    }

    fn max_size(&self) -> Option<usize> {
        self.max_size
    }
}

impl<T> Default for ImmutableSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ImmutableSequence<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            max_size: self.max_size,
            cycle: CycleState::default(),
        }
    }
}

/// Structural equality: same elements in the same order. The limit and the
/// cycle flag do not take part.
impl<T: PartialEq> PartialEq for ImmutableSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for ImmutableSequence<T> {}

impl<T> From<Vec<T>> for ImmutableSequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T> FromIterator<T> for ImmutableSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

/// `seq + x` is `seq.append(x)`.
impl<T: Clone> Add<T> for &ImmutableSequence<T> {
    type Output = Result<ImmutableSequence<T>, PrimitiveError>;

    fn add(self, item: T) -> Self::Output {
        self.append(item)
    }
}

/// `seq - x` is `seq.remove(&x)`.
impl<T: Clone + PartialEq> Sub<T> for &ImmutableSequence<T> {
    type Output = ImmutableSequence<T>;

    fn sub(self, item: T) -> Self::Output {
        self.remove(&item)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Value, ValueKind};

    #[test]
    fn append_returns_new_value() {
        let original = ImmutableSequence::from(vec![1, 2, 3]);
        let grown = original.append(4).expect("append");
        assert_eq!(grown.to_vec(), vec![1, 2, 3, 4]);
        assert_eq!(original.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn limit_is_carried_by_returned_value_only() {
        let original: ImmutableSequence<i32> = (1..=5).collect();
        let limited = original.limit(3);
        assert_eq!(limited.to_vec(), vec![1, 2, 3]);
        assert_eq!(limited.max_size(), Some(3));
        assert_eq!(original.len(), 5);
        assert_eq!(original.max_size(), None);

        assert_eq!(limited.append(4), Err(PrimitiveError::MaxSize { limit: 3 }));
        assert_eq!(limited.stop_limit().append(4).expect("append").len(), 4);

        let filtered = limited.filter(|x| *x > 1);
        assert_eq!(filtered.max_size(), None);
    }

    #[test]
    fn append_result_drops_the_limit() {
        let limited = ImmutableSequence::from(vec![1]).limit(2);
        let grown = limited.append(2).expect("within limit");
        assert_eq!(grown.max_size(), None);
        assert_eq!(grown.append(3).expect("unchecked").len(), 3);
    }

    #[test]
    fn pop_and_remove() {
        let seq = ImmutableSequence::from(vec!['a', 'b', 'a', 'c']);
        assert_eq!(seq.pop(1).expect("pop").to_vec(), vec!['a', 'a', 'c']);
        assert_eq!(seq.pop(-1).expect("pop").to_vec(), vec!['a', 'b', 'a']);
        assert!(seq.pop(4).is_err());
        assert_eq!(seq.remove(&'a').to_vec(), vec!['b', 'c']);
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn filter_keeps_matching_elements() {
        let seq = ImmutableSequence::from(vec![1, 2, 3, 4]);
        assert_eq!(seq.filter(|x| x % 2 == 0).to_vec(), vec![2, 4]);
    }

    #[test]
    fn rules_and_type_removal() {
        let seq = ImmutableSequence::from(vec![Value::Int(1), Value::from("x"), Value::Float(0.5)]);
        let doubled = seq.apply_rule_by_type(ValueKind::Integer, |v| match v {
            Value::Int(i) => Value::Int(i * 2),
            other => other,
        });
        assert_eq!(doubled.get(0), Some(&Value::Int(2)));
        assert_eq!(seq.get(0), Some(&Value::Int(1)));

        let text_only = seq.remove_by_type([ValueKind::Integer, ValueKind::Float]);
        assert_eq!(text_only.to_vec(), vec![Value::from("x")]);
        assert_eq!(seq.get_by_type(ValueKind::Float).len(), 1);
    }

    #[test]
    fn equality_ignores_limit() {
        let a = ImmutableSequence::from(vec![1, 2]);
        let b = ImmutableSequence::from(vec![1, 2, 3]).limit(2);
        assert_eq!(a, b);
        assert_ne!(a, ImmutableSequence::from(vec![2, 1]));
    }

    #[test]
    fn operators_on_references() {
        let seq = ImmutableSequence::from(vec![1, 2, 1]);
        let grown = (&seq + 3).expect("append");
        let shrunk = &grown - 1;
        assert_eq!(shrunk.to_vec(), vec![2, 3]);
        assert_eq!(seq.to_vec(), vec![1, 2, 1]);
    }

    #[test]
    fn cycle_over_immutable_values() {
        let seq = ImmutableSequence::from(vec!["x", "y"]);
        let mut reader = seq.cycle();
        assert_eq!(reader.next(), Some(&"x"));
        assert_eq!(reader.next(), Some(&"y"));
        assert_eq!(reader.next(), Some(&"x"));
        seq.stop_cycle();
        assert_eq!(reader.next(), None);
    }
}
