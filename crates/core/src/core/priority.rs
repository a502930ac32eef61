//! Priority queue for BPE merge candidates.
//!
//! Used by incremental training to find the most frequent pair without
//! rescanning the whole sequence after every merge.

use super::merges::Pair;
use ahash::AHashMap;
use dary_heap::OctonaryHeap;
use std::cmp::Ordering;

/// A merge candidate during BPE training.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeCandidate {
    /// The pair of token IDs to merge
    pub pair: Pair,
    /// The frequency/count of this pair
    pub count: u64,
}

impl MergeCandidate {
    /// Create a new merge candidate.
    pub fn new(pair: Pair, count: u64) -> Self {
        Self { pair, count }
    }
}

// Higher count first; on equal counts the smaller pair comes first.
impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| other.pair.cmp(&self.pair))
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue for BPE merge operations.
///
/// Uses an 8-ary heap for better cache locality than a binary heap. Counts
/// change while entries sit in the heap; instead of removing them, the queue
/// remembers the live count of every pair and drops mismatching entries on pop.
pub struct PairPriorityQueue {
    /// The heap storing merge candidates
    heap: OctonaryHeap<MergeCandidate>,
    /// Live count per pair; entries that disagree are stale
    current_counts: AHashMap<Pair, u64>,
}

impl PairPriorityQueue {
    /// Create a new priority queue with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: OctonaryHeap::with_capacity(capacity),
            current_counts: AHashMap::with_capacity(capacity),
        }
    }

    /// Create a new empty priority queue.
    pub fn new() -> Self {
        Self {
            heap: OctonaryHeap::new(),
            current_counts: AHashMap::new(),
        }
    }

    /// Record the live count for a pair.
    ///
    /// Any older entry for the pair becomes stale. A count of zero removes
    /// the pair from consideration.
    pub fn update(&mut self, pair: Pair, count: u64) {
        if count == 0 {
            self.current_counts.remove(&pair);
            return;
        }
        self.current_counts.insert(pair, count);
        self.heap.push(MergeCandidate::new(pair, count));
    }

    /// Pop the highest priority live merge candidate.
    ///
    /// Returns None once only stale entries (or nothing) remain.
    pub fn pop(&mut self) -> Option<MergeCandidate> {
        while let Some(candidate) = self.heap.pop() {
            if self.current_counts.get(&candidate.pair) == Some(&candidate.count) {
                self.current_counts.remove(&candidate.pair);
                return Some(candidate);
            }
        }
        None
    }

    /// Get the number of (potentially stale) entries in the queue.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if the queue holds no live pairs.
    pub fn is_empty(&self) -> bool {
        self.current_counts.is_empty()
    }

    /// Get the live count for a pair.
    pub fn get_count(&self, pair: Pair) -> Option<u64> {
        self.current_counts.get(&pair).copied()
    }
}

impl Default for PairPriorityQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(Pair, u64)> for PairPriorityQueue {
    fn from_iter<I: IntoIterator<Item = (Pair, u64)>>(iter: I) -> Self {
        let mut queue = Self::new();
        for (pair, count) in iter {
            queue.update(pair, count);
        }
        queue
    }
}
