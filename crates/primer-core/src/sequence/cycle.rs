//! # Cyclic Reader
//!
//! A lazily produced, infinite, restartable traversal of a sequence.
//!
//! - One running flag per sequence value, shared with every reader it hands out
//! - `stop` flips the flag; the reader observes it at its next `next()` call
//! - Calling `cycle()` again restarts from position 0 and re-arms the flag
//!
//! The reader borrows the sequence, so the sequence cannot be mutated while a
//! traversal is alive. Running two readers over the same value at once is
//! allowed by the borrow checker but they share one flag: stopping either
//! stops both. Only one traversal at a time is meaningful.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::trace;

/// The running flag owned by a sequence value.
///
/// Cloning a sequence gives the clone its own, stopped flag.
#[derive(Debug, Default)]
pub struct CycleState {
    running: Arc<AtomicBool>,
}

impl CycleState {
    /// Arm the flag and hand out a reader starting at position 0.
    pub(crate) fn start<'a, T>(&self, items: &'a [T]) -> Cycle<'a, T> {
        self.running.store(true, Ordering::Release);
        trace!(len = items.len(), "cycle started");
        Cycle {
            items,
            position: 0,
            running: Arc::clone(&self.running),
        }
    }

    pub(crate) fn stop(&self) {
        self.running.store(false, Ordering::Release);
        trace!("cycle stopped");
    }

    /// Check whether a cyclic traversal is currently armed.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl Clone for CycleState {
    fn clone(&self) -> Self {
        Self::default()
    }
}

/// Infinite reader over a borrowed sequence. Wraps to the start after the
/// last element and ends only when stopped (or when the sequence is empty).
#[derive(Debug)]
pub struct Cycle<'a, T> {
    items: &'a [T],
    position: usize,
    running: Arc<AtomicBool>,
}

impl<T> Cycle<'_, T> {
    /// Stop this traversal (and any other reader sharing the flag).
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Position of the element the next call will yield.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}

impl<'a, T> Iterator for Cycle<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.running.load(Ordering::Acquire) {
            return None;
        }
        let item = self.items.get(self.position)?;
        self.position = (self.position + 1) % self.items.len();
        Some(item)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_around_until_stopped() {
        let state = CycleState::default();
        let items = [1, 2, 3];
        let mut reader = state.start(&items);

        let first: Vec<_> = reader.by_ref().take(7).copied().collect();
        assert_eq!(first, vec![1, 2, 3, 1, 2, 3, 1]);
        assert_eq!(reader.position(), 1);

        state.stop();
        assert_eq!(reader.next(), None);
        assert!(!state.is_running());
    }

    #[test]
    fn restart_begins_at_zero() {
        let state = CycleState::default();
        let items = ['a', 'b'];
        let mut reader = state.start(&items);
        assert_eq!(reader.next(), Some(&'a'));
        reader.stop();

        let mut again = state.start(&items);
        assert_eq!(again.next(), Some(&'a'));
        assert_eq!(again.next(), Some(&'b'));
    }

    #[test]
    fn empty_sequence_yields_nothing() {
        let state = CycleState::default();
        let items: [u8; 0] = [];
        assert_eq!(state.start(&items).next(), None);
    }

    #[test]
    fn cloned_state_is_independent() {
        let state = CycleState::default();
        let items = [1];
        let _reader = state.start(&items);
        let copy = state.clone();
        assert!(state.is_running());
        assert!(!copy.is_running());
    }
}
