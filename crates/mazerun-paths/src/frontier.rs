//! Min-priority frontier keyed by `(priority, insertion order)`.
//!
//! Lower priorities pop first; ties pop in insertion order (FIFO), which
//! keeps expansion order deterministic.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy)]
struct Entry {
    priority: f32,
    /// Monotonically increasing counter used to break ties.
    seq: u64,
    idx: usize,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap (max-heap) pops the smallest priority, then
        // the earliest insertion.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Priority queue of flat cell indices.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, idx: usize, priority: f32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Entry { priority, seq, idx });
    }

    pub(crate) fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|e| e.idx)
    }

    pub(crate) fn peek(&self) -> Option<usize> {
        self.heap.peek().map(|e| e.idx)
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
