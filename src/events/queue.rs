//! Min-ordered priority queue
//!
//! A thin wrapper over [`BinaryHeap`] that hands back the *least* item first.
//! Items comparing equal come out in no particular order; callers that need a
//! stable order among them must sort after extraction.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use thiserror::Error;

/// Errors raised by [`PriorityQueue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Extraction was attempted on an empty queue
    #[error("cannot extract from an empty priority queue")]
    Empty,
}

/// A min-heap keyed by the item's total order
///
/// # Examples
///
/// ```
/// use bikeshare_simulator::events::PriorityQueue;
///
/// let mut queue = PriorityQueue::new();
/// queue.insert(3);
/// queue.insert(1);
/// queue.insert(2);
///
/// assert_eq!(queue.extract_min(), Ok(1));
/// assert_eq!(queue.peek_min(), Some(&2));
/// assert_eq!(queue.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PriorityQueue<T: Ord> {
    heap: BinaryHeap<Reverse<T>>,
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self { heap: BinaryHeap::new() }
    }
}

impl<T: Ord> PriorityQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item in O(log n)
    pub fn insert(&mut self, item: T) {
        self.heap.push(Reverse(item));
    }

    /// Remove and return the least item.
    ///
    /// Calling this on an empty queue is a caller bug reported as
    /// [`QueueError::Empty`]; check [`is_empty`](Self::is_empty) first.
    pub fn extract_min(&mut self) -> Result<T, QueueError> {
        self.heap.pop().map(|Reverse(item)| item).ok_or(QueueError::Empty)
    }

    /// The least item, if any, without removing it
    pub fn peek_min(&self) -> Option<&T> {
        self.heap.peek().map(|Reverse(item)| item)
    }

    /// Whether the queue holds no items
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T: Ord> Extend<T> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.heap.extend(iter.into_iter().map(Reverse));
    }
}
