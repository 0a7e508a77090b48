//! # Sequences
//!
//! Two sequence variants sharing one operation set:
//!
//! - `BoundedSequence` mutates in place; changes are visible on the receiver.
//! - `ImmutableSequence` never changes; every structural operation returns a
//!   new value.
//!
//! The read-only half of the operation set (cyclic reading, type-filtered
//! queries, aggregates and conversions) lives on the `SequenceOps` trait.
//! The mutating half is inherent on each variant because the two differ in
//! what a mutation returns.
//!
//! Both variants carry an optional soft maximum length, enforced only when
//! appending.

mod bounded;
mod cycle;
mod immutable;

pub use bounded::BoundedSequence;
pub use cycle::{Cycle, CycleState};
pub use immutable::ImmutableSequence;

use crate::{KindSet, Kinded, PrimitiveError, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;

// =============================================================================
// AGGREGATE ELEMENTS
// =============================================================================

/// Element types that support `sum`, `avg`, `max` and `min`.
pub trait Aggregate: Sized + Clone {
    /// Additive identity used as the starting value of `sum`.
    fn zero() -> Self;

    fn try_add(&self, other: &Self) -> Result<Self, PrimitiveError>;

    fn to_f64(&self) -> Result<f64, PrimitiveError>;

    fn try_cmp(&self, other: &Self) -> Result<Ordering, PrimitiveError>;
}

impl Aggregate for i64 {
    fn zero() -> Self {
        0
    }

    fn try_add(&self, other: &Self) -> Result<Self, PrimitiveError> {
        self.checked_add(*other).ok_or(PrimitiveError::Overflow("sum"))
    }

    fn to_f64(&self) -> Result<f64, PrimitiveError> {
        Ok(*self as f64)
    }

    fn try_cmp(&self, other: &Self) -> Result<Ordering, PrimitiveError> {
        Ok(self.cmp(other))
    }
}

impl Aggregate for f64 {
    fn zero() -> Self {
        0.0
    }

    fn try_add(&self, other: &Self) -> Result<Self, PrimitiveError> {
        Ok(self + other)
    }

    fn to_f64(&self) -> Result<f64, PrimitiveError> {
        Ok(*self)
    }

    fn try_cmp(&self, other: &Self) -> Result<Ordering, PrimitiveError> {
        Ok(self.total_cmp(other))
    }
}

impl Aggregate for Value {
    fn zero() -> Self {
        Self::Int(0)
    }

    fn try_add(&self, other: &Self) -> Result<Self, PrimitiveError> {
        self.checked_add(other)
    }

    fn to_f64(&self) -> Result<f64, PrimitiveError> {
        self.as_f64().ok_or(PrimitiveError::TypeMismatch {
            operation: "average",
            kind: self.kind(),
        })
    }

    /// Numbers compare with numbers, and values of one kind compare with each
    /// other. Anything else is a type mismatch.
    fn try_cmp(&self, other: &Self) -> Result<Ordering, PrimitiveError> {
        let (a, b) = (self.kind(), other.kind());
        if a == b || (a.is_numeric() && b.is_numeric()) {
            Ok(self.total_cmp(other))
        } else {
            Err(PrimitiveError::TypeMismatch {
                operation: "compare",
                kind: b,
            })
        }
    }
}

/// Reject an append that would grow a sequence of length `len` past `max_size`.
fn check_capacity(max_size: Option<usize>, len: usize) -> Result<(), PrimitiveError> {
    match max_size {
        Some(limit) if len >= limit => Err(PrimitiveError::MaxSize { limit }),
        _ => Ok(()),
    }
}

/// Map a possibly negative position onto `0..len`.
fn resolve_position(position: isize, len: usize) -> Result<usize, PrimitiveError> {
    let signed_len = len as isize;
    let index = if position < 0 {
        position + signed_len
    } else {
        position
    };
    if (0..signed_len).contains(&index) {
        Ok(index as usize)
    } else {
        Err(PrimitiveError::IndexOutOfRange {
            index: position as i64,
            len,
        })
    }
}

// =============================================================================
// SHARED OPERATION SET
// =============================================================================

/// The operation set shared by both sequence variants.
pub trait SequenceOps<T>: Sized {
    /// The elements, in order.
    fn as_slice(&self) -> &[T];

    /// Build a fresh value of the same variant (no limit, stopped cycle).
    fn from_vec(items: Vec<T>) -> Self;

    /// The value's cyclic-read flag.
    fn cycle_state(&self) -> &CycleState;

    /// The soft maximum length, if one is set.
    fn max_size(&self) -> Option<usize>;

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Start an infinite cyclic traversal from position 0.
    ///
    /// The traversal runs until `stop_cycle` is called (observed before the
    /// next element is produced). An empty sequence yields nothing.
    fn cycle(&self) -> Cycle<'_, T> {
        self.cycle_state().start(self.as_slice())
    }

    /// Stop the running cyclic traversal.
    fn stop_cycle(&self) {
        self.cycle_state().stop();
    }

    /// New sequence holding only the elements whose kind is selected.
    fn get_by_type(&self, kinds: impl Into<KindSet>) -> Self
    where
        T: Kinded + Clone,
    {
        let kinds = kinds.into();
        Self::from_vec(
            self.as_slice()
                .iter()
                .filter(|item| kinds.matches(*item))
                .cloned()
                .collect(),
        )
    }

    // -------------------------------------------------------------------------
    // Aggregates
    // -------------------------------------------------------------------------

    /// Sum of the elements; the sum of an empty sequence is `T::zero()`.
    fn sum(&self) -> Result<T, PrimitiveError>
    where
        T: Aggregate,
    {
        self.as_slice()
            .iter()
            .try_fold(T::zero(), |acc, item| acc.try_add(item))
    }

    fn avg(&self) -> Result<f64, PrimitiveError>
    where
        T: Aggregate,
    {
        if self.is_empty() {
            return Err(PrimitiveError::EmptySequence("average"));
        }
        Ok(self.sum()?.to_f64()? / self.len() as f64)
    }

    /// Largest element; the first one wins on ties.
    fn max(&self) -> Result<T, PrimitiveError>
    where
        T: Aggregate,
    {
        extreme(self.as_slice(), Ordering::Greater, "maximum")
    }

    /// Smallest element; the first one wins on ties.
    fn min(&self) -> Result<T, PrimitiveError>
    where
        T: Aggregate,
    {
        extreme(self.as_slice(), Ordering::Less, "minimum")
    }

    // -------------------------------------------------------------------------
    // Conversions
    // -------------------------------------------------------------------------

    fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.as_slice().to_vec()
    }

    /// Fixed-length view.
    fn to_array(&self) -> Box<[T]>
    where
        T: Clone,
    {
        self.as_slice().into()
    }

    /// Distinct elements in first-seen order.
    fn to_set(&self) -> Vec<T>
    where
        T: Clone + PartialEq,
    {
        let mut unique: Vec<T> = Vec::with_capacity(self.len());
        for item in self.as_slice() {
            if !unique.contains(item) {
                unique.push(item.clone());
            }
        }
        unique
    }

    /// Position → element view.
    fn to_indexed(&self) -> BTreeMap<usize, T>
    where
        T: Clone,
    {
        self.as_slice().iter().cloned().enumerate().collect()
    }
}

fn extreme<T: Aggregate>(
    items: &[T],
    wanted: Ordering,
    operation: &'static str,
) -> Result<T, PrimitiveError> {
    let (first, rest) = items
        .split_first()
        .ok_or(PrimitiveError::EmptySequence(operation))?;
    let mut best = first;
    for item in rest {
        if item.try_cmp(best)? == wanted {
            best = item;
        }
    }
    Ok(best.clone())
}

// =============================================================================
// TESTS
// =============================================================================
