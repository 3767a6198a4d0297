//! Running median over an append-only stream of amounts.
//!
//! [`MedianTracker`] keeps the values in two heaps: a max-heap holding the
//! lower half and a min-heap holding the upper half. After every insertion
//!
//! * every value in the lower half is `<=` every value in the upper half, and
//! * `lower.len() - upper.len()` is either 0 or 1,
//!
//! so the median is always available from the heap tops.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

// ── Amount ────────────────────────────────────────────────────────────────────

/// Heap element with a total order over `f64` (`f64::total_cmp`).
#[derive(Debug, Clone, Copy)]
struct Amount(f64);

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Amount {}

impl PartialOrd for Amount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Amount {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

// ── MedianTracker ─────────────────────────────────────────────────────────────

/// Balanced pair of priority queues answering median queries in O(1).
///
/// `insert` is the only mutator; values can never be removed.
#[derive(Debug, Clone, Default)]
pub struct MedianTracker {
    lower: BinaryHeap<Amount>,
    upper: BinaryHeap<Reverse<Amount>>,
}

impl MedianTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` in O(log n).
    ///
    /// The value goes through the upper half first, whose minimum is then
    /// handed to the lower half. If that leaves the lower half two elements
    /// ahead, its maximum moves back up.
    pub fn insert(&mut self, value: f64) {
        self.upper.push(Reverse(Amount(value)));
        if let Some(Reverse(smallest)) = self.upper.pop() {
            self.lower.push(smallest);
        }
        if self.lower.len() > self.upper.len() + 1 {
            if let Some(largest) = self.lower.pop() {
                self.upper.push(Reverse(largest));
            }
        }
    }

    /// Current median, or `None` when nothing has been inserted.
    pub fn median(&self) -> Option<f64> {
        let Amount(low) = *self.lower.peek()?;
        if self.lower.len() > self.upper.len() {
            return Some(low);
        }
        let Reverse(Amount(high)) = *self.upper.peek()?;
        Some((low + high) / 2.0)
    }

    /// Number of values inserted so far.
    pub fn len(&self) -> usize {
        self.lower.len() + self.upper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// `(lower.len(), upper.len())`, for checking the balance invariant.
    pub fn half_sizes(&self) -> (usize, usize) {
        (self.lower.len(), self.upper.len())
    }

    /// Largest value of the lower half and smallest of the upper half.
    pub fn boundaries(&self) -> (Option<f64>, Option<f64>) {
        (
            self.lower.peek().map(|a| a.0),
            self.upper.peek().map(|r| r.0 .0),
        )
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
