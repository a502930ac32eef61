//! Adjacent pair statistics.
//!
//! Counting is overlap-inclusive: every window of two adjacent symbols is
//! counted, so `[a, a, a]` reports `(a, a)` twice even though a single merge
//! pass can only consume one of them.

use super::merges::{Pair, TokenId};
use ahash::AHashMap;

/// Pair -> occurrence count for one token sequence snapshot.
pub type PairCounts = AHashMap<Pair, u64>;

/// Count every adjacent pair in `ids`.
///
/// Sequences shorter than two symbols produce an empty map.
pub fn pair_counts(ids: &[TokenId]) -> PairCounts {
    let mut counts = PairCounts::with_capacity(ids.len().min(1 << 16));

    for window in ids.windows(2) {
        *counts.entry((window[0], window[1])).or_insert(0) += 1;
    }

    counts
}

/// Select the pair to merge next.
///
/// Highest count wins; among equal counts the lexicographically smallest
/// pair wins. The map is unordered, so the tie-break lives in the comparison.
pub fn most_frequent(counts: &PairCounts) -> Option<(Pair, u64)> {
    counts
        .iter()
        .map(|(&pair, &count)| (pair, count))
        .max_by(|(pa, ca), (pb, cb)| ca.cmp(cb).then_with(|| pb.cmp(pa)))
}
