//! Merge ordering for tree construction.
use core::cmp::Ordering;
use std::collections::BinaryHeap;

/// Compares two `(count, symbol)` keys by merge priority.
///
/// Returns [`Ordering::Greater`] when `a` should be merged before `b`: a smaller count wins,
/// and on equal counts the larger symbol wins.
pub fn merge_priority(a: (u64, u8), b: (u64, u8)) -> Ordering {
    b.0.cmp(&a.0).then(a.1.cmp(&b.1))
}

#[derive(Clone, Copy, Debug)]
struct Entry<T> {
    count: u64,
    symbol: u8,
    item: T,
}

// item takes no part in the ordering, symbols are unique among queued subtrees
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        merge_priority((self.count, self.symbol), (other.count, other.symbol))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

/// A max-heap keyed by [`merge_priority`], carrying an arbitrary payload per entry.
#[derive(Debug)]
pub struct MergeQueue<T> {
    heap: BinaryHeap<Entry<T>>,
}

impl<T> MergeQueue<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, count: u64, symbol: u8, item: T) {
        self.heap.push(Entry { count, symbol, item });
    }

    /// Removes the highest-priority entry as `(count, symbol, item)`.
    pub fn pop(&mut self) -> Option<(u64, u8, T)> {
        self.heap.pop().map(|e| (e.count, e.symbol, e.item))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
