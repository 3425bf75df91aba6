// Open list for A* search.
//
// A `BinaryHeap` turned into a min-heap by reversing `Ord`. Entries carry
// the f-score (g + h) they were pushed with and a monotonically increasing
// sequence number, so equal scores pop in insertion order.

use crate::types::NodeId;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// One frontier entry.
#[derive(Clone, Copy, Debug)]
pub struct OpenEntry {
    pub node: NodeId,
    pub f_score: f32,
    seq: u64,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap: smallest f_score, then oldest entry, is "greatest".
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Nodes discovered but not yet expanded.
#[derive(Debug, Default)]
pub struct OpenList {
    heap: BinaryHeap<OpenEntry>,
    next_seq: u64,
}

impl OpenList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: NodeId, f_score: f32) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(OpenEntry { node, f_score, seq });
    }

    /// Remove the entry with the lowest f-score. `None` when empty.
    pub fn pop(&mut self) -> Option<OpenEntry> {
        self.heap.pop()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
