//! In-place sequence with an optional soft maximum length.

use super::{check_capacity, resolve_position, CycleState, SequenceOps};
use crate::{KindSet, Kinded, PrimitiveError};
use std::ops::{Add, Div, Sub};
use tracing::debug;

/// A mutable, growable sequence.
///
/// Session state: an optional maximum length, enforced only by `append`,
/// and the cyclic-read flag. `Clone` copies the limit; the clone starts with
/// a stopped cycle flag.
#[derive(Debug, Clone)]
pub struct BoundedSequence<T> {
    items: Vec<T>,
    max_size: Option<usize>,
    cycle: CycleState,
}

impl<T> Default for BoundedSequence<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            max_size: None,
            cycle: CycleState::default(),
        }
    }
}

impl<T> BoundedSequence<T> {
    /// Create an empty, unbounded sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item`, failing if a limit is set and would be exceeded.
    ///
    /// A failed append leaves the sequence unchanged.
    pub fn append(&mut self, item: T) -> Result<(), PrimitiveError> {
        check_capacity(self.max_size, self.items.len())?;
        self.items.push(item);
        Ok(())
    }

    /// Remove and return the element at `position` (negative counts from the end).
    pub fn pop(&mut self, position: isize) -> Result<T, PrimitiveError> {
        let index = resolve_position(position, self.items.len())?;
        Ok(self.items.remove(index))
    }

    /// Replace every element with `rule(element)`.
    pub fn apply_rule<F>(&mut self, rule: F) -> &mut Self
    where
        F: FnMut(T) -> T,
    {
        self.items = std::mem::take(&mut self.items)
            .into_iter()
            .map(rule)
            .collect();
        self
    }

    /// Replace every element of a selected kind with `rule(element)`.
    pub fn apply_rule_by_type<F>(&mut self, kinds: impl Into<KindSet>, mut rule: F) -> &mut Self
    where
        T: Kinded,
        F: FnMut(T) -> T,
    {
        let kinds = kinds.into();
        self.apply_rule(|item| if kinds.matches(&item) { rule(item) } else { item })
    }

    /// Remove every element of a selected kind.
    ///
    /// Removal is a single pass; surviving elements shift down to fill the
    /// gaps, so positions taken before the call are stale afterwards.
    pub fn remove_by_type(&mut self, kinds: impl Into<KindSet>) -> &mut Self
    where
        T: Kinded,
    {
        let kinds = kinds.into();
        self.items.retain(|item| !kinds.matches(item));
        self
    }

    /// Keep only the elements for which `predicate` holds.
    pub fn filter<P>(&mut self, mut predicate: P) -> &mut Self
    where
        P: FnMut(&T) -> bool,
    {
        self.items.retain(|item| predicate(item));
        self
    }

    /// Remove every element equal to `item`.
    pub fn remove_all(&mut self, item: &T) -> &mut Self
    where
        T: PartialEq,
    {
        self.items.retain(|x| x != item);
        self
    }

    /// Set the maximum length to `max_size`, dropping elements from the tail
    /// until the sequence fits.
    pub fn limit(&mut self, max_size: usize) -> &mut Self {
        self.max_size = Some(max_size);
        if self.items.len() > max_size {
            debug!(
                from = self.items.len(),
                to = max_size,
                "truncating bounded sequence"
            );
            self.items.truncate(max_size);
        }
        self
    }

    /// Clear the maximum length without touching the contents.
    pub fn stop_limit(&mut self) -> &mut Self {
        self.max_size = None;
        self
    }

    /// Keep the first `len / divisor` elements (integer division).
    pub fn keep_fraction(&mut self, divisor: usize) -> Result<&mut Self, PrimitiveError> {
        if divisor == 0 {
            return Err(PrimitiveError::interval("divisor", divisor, "[1, inf)"));
        }
        self.items.truncate(self.items.len() / divisor);
        Ok(self)
    }
}

impl<T> SequenceOps<T> for BoundedSequence<T> {
    fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn from_vec(items: Vec<T>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    fn cycle_state(&self) -> &CycleState {
        &self.cycle
    }

    fn max_size(&self) -> Option<usize> {
        self.max_size
    }
}

impl<T> From<Vec<T>> for BoundedSequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T> FromIterator<T> for BoundedSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: PartialEq> PartialEq for BoundedSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

// =============================================================================
// OPERATORS
// =============================================================================

/// `seq + x` appends `x` and yields the same sequence.
impl<T> Add<T> for BoundedSequence<T> {
    type Output = Result<Self, PrimitiveError>;

    fn add(mut self, item: T) -> Self::Output {
        self.append(item)?;
        Ok(self)
    }
}

/// `seq - x` removes every element equal to `x`.
impl<T: PartialEq> Sub<T> for BoundedSequence<T> {
    type Output = Self;

    fn sub(mut self, item: T) -> Self::Output {
        self.remove_all(&item);
        self
    }
}

/// `seq / n` keeps the first `len / n` elements.
impl<T> Div<usize> for BoundedSequence<T> {
    type Output = Result<Self, PrimitiveError>;

    fn div(mut self, divisor: usize) -> Self::Output {
        self.keep_fraction(divisor)?;
        Ok(self)
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
    fn append_respects_limit() {
        let mut seq = BoundedSequence::from(vec![1, 2]);
        seq.limit(3);
        seq.append(3).expect("fits");
        assert_eq!(seq.append(4), Err(PrimitiveError::MaxSize { limit: 3 }));
        assert_eq!(seq.len(), 3);

        seq.stop_limit();
        seq.append(4).expect("unbounded again");
        assert_eq!(seq.to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn limit_truncates_tail() {
        let mut seq: BoundedSequence<i32> = (1..=6).collect();
        seq.limit(4);
        assert_eq!(seq.to_vec(), vec![1, 2, 3, 4]);
        assert_eq!(seq.max_size(), Some(4));

        seq.limit(10);
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn zero_limit_blocks_every_append() {
        let mut seq = BoundedSequence::from(vec!['x']);
        seq.limit(0);
        assert!(seq.is_empty());
        assert_eq!(seq.append('y'), Err(PrimitiveError::MaxSize { limit: 0 }));
    }

    #[test]
    fn apply_rules_in_place() {
        let mut seq = BoundedSequence::from(vec![Value::Int(1), Value::from("a"), Value::Int(2)]);
        seq.apply_rule_by_type(ValueKind::Integer, |v| match v {
            Value::Int(i) => Value::Int(i * 2),
            other => other,
        });
        assert_eq!(
            seq.to_vec(),
            vec![Value::Int(2), Value::from("a"), Value::Int(4)]
        );

        seq.apply_rule(|v| Value::from(v.to_string()));
        assert_eq!(seq.get(1), Some(&Value::from("\"a\"")));
    }

    #[test]
    fn remove_by_type_removes_adjacent_matches() {
        let mut seq = BoundedSequence::from(vec![
            Value::Int(1),
            Value::Int(2),
            Value::from("keep"),
            Value::Int(3),
        ]);
        seq.remove_by_type(ValueKind::Integer);
        assert_eq!(seq.to_vec(), vec![Value::from("keep")]);
    }

    #[test]
    fn filter_and_remove_all() {
        let mut seq = BoundedSequence::from(vec![1, 2, 3, 4, 2, 6]);
        seq.filter(|x| x % 2 == 0);
        assert_eq!(seq.to_vec(), vec![2, 4, 2, 6]);
        seq.remove_all(&2);
        assert_eq!(seq.to_vec(), vec![4, 6]);
    }

    #[test]
    fn pop_supports_negative_positions() {
        let mut seq = BoundedSequence::from(vec!['a', 'b', 'c']);
        assert_eq!(seq.pop(-1).expect("pop"), 'c');
        assert_eq!(seq.pop(0).expect("pop"), 'a');
        assert_eq!(
            seq.pop(3),
            Err(PrimitiveError::IndexOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn operators() {
        let seq = BoundedSequence::from(vec![1, 2, 1, 3, 4, 5, 6]);
        let seq = (seq + 1).expect("append");
        assert_eq!(seq.len(), 8);

        let seq = seq - 1;
        assert_eq!(seq.to_vec(), vec![2, 3, 4, 5, 6]);

        let seq = (seq / 2).expect("divide");
        assert_eq!(seq.to_vec(), vec![2, 3]);

        assert!(matches!(seq / 0, Err(PrimitiveError::Interval { .. })));
    }

    #[test]
    fn add_over_limit_fails() {
        let mut seq = BoundedSequence::from(vec![1]);
        seq.limit(1);
        assert_eq!(seq + 2, Err(PrimitiveError::MaxSize { limit: 1 }));
    }

    #[test]
    fn cycle_stops_on_request() {
        let seq = BoundedSequence::from(vec![10, 20, 30]);
        let mut seen = Vec::new();
        for item in seq.cycle() {
            seen.push(*item);
            if seen.len() == 5 {
                seq.stop_cycle();
            }
        }
        assert_eq!(seen, vec![10, 20, 30, 10, 20]);

        let restarted: Vec<_> = seq.cycle().take(2).copied().collect();
        assert_eq!(restarted, vec![10, 20]);
    }
}
