//! Pair counting for BPE training.
//!
//! A [`PairCounter`] owns the working token sequence of a training run and
//! answers pair statistics over it, sequentially or in parallel.

use ahash::AHashMap;
use bytebpe_core::{bytes_to_ids, merge_pair, pair_counts, Pair, PairCounts, TokenId};

/// Working sequence plus pair statistics for BPE training.
#[derive(Debug, Clone, Default)]
pub struct PairCounter {
    /// The current token sequence
    ids: Vec<TokenId>,
}

impl PairCounter {
    /// Create a counter over an existing token sequence.
    pub fn new(ids: Vec<TokenId>) -> Self {
        Self { ids }
    }

    /// Create a counter with one base symbol per input byte.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(bytes_to_ids(bytes))
    }

    /// Count all pairs in parallel.
    ///
    /// Produces exactly the same map as [`Self::count_pairs_sequential`].
    pub fn count_pairs_parallel(&self) -> PairCounts {
        use rayon::prelude::*;

        self.ids
            .par_windows(2)
            .fold(PairCounts::new, |mut acc, window| {
                *acc.entry((window[0], window[1])).or_insert(0) += 1;
                acc
            })
            .reduce(PairCounts::new, |mut acc, pair_counts| {
                for (pair, count) in pair_counts {
                    *acc.entry(pair).or_insert(0) += count;
                }
                acc
            })
    }

    /// Count all pairs sequentially.
    pub fn count_pairs_sequential(&self) -> PairCounts {
        pair_counts(&self.ids)
    }

    /// The current token sequence.
    pub fn ids(&self) -> &[TokenId] {
        &self.ids
    }

    /// Consume the counter, returning the token sequence.
    pub fn into_ids(self) -> Vec<TokenId> {
        self.ids
    }

    /// Number of symbols in the current sequence.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Replace the sequence by one merge pass of `pair` into `new_token_id`.
    pub fn merge_pair(&mut self, pair: Pair, new_token_id: TokenId) {
        self.ids = merge_pair(&self.ids, pair, new_token_id);
    }

    /// Replace the sequence by one merge pass and report how pair counts moved.
    ///
    /// Returns (pair, delta) tuples; summing them onto the counts of the old
    /// sequence gives exactly the counts of the new one. Only windows touching
    /// a merged position change, every other window carries over as is.
    pub fn merge_pair_tracked(&mut self, pair: Pair, new_token_id: TokenId) -> Vec<(Pair, i64)> {
        let old = &self.ids;
        let mut new_ids = Vec::with_capacity(old.len());
        let mut changes: Vec<(Pair, i64)> = Vec::new();

        // Windows are identified by their start index; `next_*` is the first
        // start not yet emitted, so shared windows are counted once.
        let mut next_removed = 0usize;
        let mut merged_at: Vec<usize> = Vec::new();

        let mut i = 0;
        while i < old.len() {
            if i + 1 < old.len() && old[i] == pair.0 && old[i + 1] == pair.1 {
                let first = i.saturating_sub(1).max(next_removed);
                let last = (i + 1).min(old.len().saturating_sub(2));
                for start in first..=last {
                    changes.push(((old[start], old[start + 1]), -1));
                }
                next_removed = last + 1;

                merged_at.push(new_ids.len());
                new_ids.push(new_token_id);
                i += 2;
            } else {
                new_ids.push(old[i]);
                i += 1;
            }
        }

        let mut next_added = 0usize;
        for &j in &merged_at {
            let first = j.saturating_sub(1).max(next_added);
            let last = j.min(new_ids.len().saturating_sub(2));
            // A lone merged symbol has no windows at all.
            if new_ids.len() < 2 || first > last {
                continue;
            }
            for start in first..=last {
                changes.push(((new_ids[start], new_ids[start + 1]), 1));
            }
            next_added = last + 1;
        }

        self.ids = new_ids;
        changes
    }
}

/// Sum (pair, delta) tuples per pair.
pub(crate) fn aggregate_changes(changes: Vec<(Pair, i64)>) -> AHashMap<Pair, i64> {
    let mut aggregated: AHashMap<Pair, i64> = AHashMap::with_capacity(changes.len());
    for (pair, delta) in changes {
        *aggregated.entry(pair).or_insert(0) += delta;
    }
    aggregated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(mut counts: PairCounts, changes: Vec<(Pair, i64)>) -> PairCounts {
        for (pair, delta) in aggregate_changes(changes) {
            let current = counts.get(&pair).copied().unwrap_or(0) as i64;
            let updated = current + delta;
            assert!(updated >= 0, "negative count for {:?}", pair);
            if updated == 0 {
                counts.remove(&pair);
            } else {
                counts.insert(pair, updated as u64);
            }
        }
        counts
    }

    fn check_tracked(ids: Vec<TokenId>, pair: Pair) {
        let mut counter = PairCounter::new(ids.clone());
        let before = counter.count_pairs_sequential();
        let changes = counter.merge_pair_tracked(pair, 1000);

        assert_eq!(counter.ids(), merge_pair(&ids, pair, 1000).as_slice());
        assert_eq!(apply(before, changes), counter.count_pairs_sequential());
    }

    #[test]
    fn test_from_bytes() {
        let counter = PairCounter::from_bytes(b"abc");
        assert_eq!(counter.ids(), &[97, 98, 99]);
        assert_eq!(counter.len(), 3);
        assert!(PairCounter::from_bytes(b"").is_empty());
    }

    #[test]
    fn test_count_pairs_sequential() {
        let counter = PairCounter::from_bytes(b"abab");
        let pairs = counter.count_pairs_sequential();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs.get(&(97, 98)), Some(&2));
        assert_eq!(pairs.get(&(98, 97)), Some(&1));
    }

    #[test]
    fn test_count_pairs_parallel_matches_sequential() {
        let text: Vec<u8> = (0..10_000u32).map(|i| (i * 31 % 7) as u8 + b'a').collect();
        let counter = PairCounter::from_bytes(&text);
        assert_eq!(counter.count_pairs_parallel(), counter.count_pairs_sequential());

        assert!(PairCounter::from_bytes(b"x").count_pairs_parallel().is_empty());
    }

    #[test]
    fn test_merge_pair() {
        let mut counter = PairCounter::from_bytes(b"aaab");
        counter.merge_pair((97, 97), 256);
        assert_eq!(counter.into_ids(), vec![256, 97, 98]);
    }

    #[test]
    fn test_tracked_changes_match_recount() {
        check_tracked(vec![1, 2, 3, 1, 2], (1, 2));
        check_tracked(vec![5, 5, 5], (5, 5));
        check_tracked(vec![5, 5, 5, 5], (5, 5));
        check_tracked(vec![5, 5, 5, 5, 5], (5, 5));
        check_tracked(vec![1, 2], (1, 2));
        check_tracked(vec![1, 2, 1, 2], (1, 2));
        check_tracked(vec![3, 1, 2, 1, 2, 3], (1, 2));
        check_tracked(vec![2, 1, 2, 1], (1, 2));
        check_tracked(vec![1, 2, 3], (9, 9));
        check_tracked(vec![7], (7, 7));
        check_tracked(vec![], (7, 7));
    }

    #[test]
    fn test_tracked_changes_on_generated_sequences() {
        let mut state = 0x2545_f491u32;
        for len in 0..40 {
            let ids: Vec<TokenId> = (0..len)
                .map(|_| {
                    state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                    (state >> 16) % 3
                })
                .collect();
            for a in 0..3 {
                for b in 0..3 {
                    check_tracked(ids.clone(), (a, b));
                }
            }
        }
    }
}
