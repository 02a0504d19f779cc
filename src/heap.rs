//! Minimum-priority extraction over (item, weight) pairs
//!
//! Backs Huffman tree construction: leaves and merged subtrees are queued by
//! weight and the two lightest entries are extracted per merge step. Entries
//! with equal weight extract in insertion order, which keeps code assignment
//! deterministic across runs and platforms.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

struct Entry<T> {
    weight: u64,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Minimum-priority queue with insertion-order tie-breaking
pub struct MinHeap<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    next_seq: u64,
}

impl<T> MinHeap<T> {
    /// Create an empty heap
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Create an empty heap with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Insert an item with the given weight
    pub fn insert(&mut self, item: T, weight: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { weight, seq, item }));
    }

    /// Remove and return the (item, weight) pair with the lowest weight,
    /// or `None` if the heap is empty
    pub fn extract_min(&mut self) -> Option<(T, u64)> {
        self.heap.pop().map(|Reverse(entry)| (entry.item, entry.weight))
    }

    /// Number of entries currently queued
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check whether the heap holds no entries
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
