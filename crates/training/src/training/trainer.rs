//! BPE trainer implementation.
//!
//! Training repeatedly selects the most frequent adjacent pair, records a merge
//! rule for it and rewrites the working sequence, until the target vocabulary
//! size is reached or no pair is left.
//!
//! Two strategies produce bit-identical rule lists:
//!
//! - [`TrainingStrategy::FullRescan`] recounts every pair before each merge.
//! - [`TrainingStrategy::Incremental`] counts once, then updates only the
//!   windows a merge touched and keeps candidates in a lazy max-heap.

use super::counter::{aggregate_changes, PairCounter};
use bytebpe_core::{
    most_frequent, MergeRules, Pair, PairCounts, PairPriorityQueue, TokenId, BYTE_VOCAB_SIZE,
};

/// How the trainer finds the next pair to merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrainingStrategy {
    /// Recount all pairs before every merge
    FullRescan,
    /// Count once, then apply per-merge deltas
    #[default]
    Incremental,
}

/// Configuration for BPE training.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Target vocabulary size, including the 256 byte symbols
    pub vocab_size: usize,
    /// Whether to count pairs with rayon
    pub parallel: bool,
    /// Pair selection strategy
    pub strategy: TrainingStrategy,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            vocab_size: 512,
            parallel: false,
            strategy: TrainingStrategy::default(),
        }
    }
}

impl TrainingConfig {
    /// Number of merges to learn, or None if the vocabulary leaves no room.
    pub fn num_merges(&self) -> Option<usize> {
        self.vocab_size
            .checked_sub(BYTE_VOCAB_SIZE)
            .filter(|&n| n > 0)
    }
}

/// Result of a training run.
#[derive(Debug, Clone, Default)]
pub struct TrainingOutcome {
    /// Learned rules, in creation order
    pub merges: MergeRules,
    /// The token sequence after the last merge
    pub ids: Vec<TokenId>,
}

/// BPE trainer.
///
/// Trains merge rules from raw bytes by iteratively merging the most frequent
/// adjacent pair. Ties go to the lexicographically smallest pair.
#[derive(Debug, Clone, Default)]
pub struct BpeTrainer {
    /// Configuration
    config: TrainingConfig,
}

impl BpeTrainer {
    /// Create a new BPE trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Create a new BPE trainer with default configuration.
    pub fn with_vocab_size(vocab_size: usize) -> Self {
        Self::new(TrainingConfig {
            vocab_size,
            ..Default::default()
        })
    }

    /// The trainer configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train merge rules on the given bytes.
    ///
    /// A vocabulary of 256 or fewer symbols, or empty input, learns nothing;
    /// both are reported as warnings. Training stops early once the sequence
    /// has no pairs left, so fewer rules than requested may come back.
    pub fn train(&self, bytes: &[u8]) -> TrainingOutcome {
        log::info!("Starting BPE training on {} bytes", bytes.len());
        let counter = PairCounter::from_bytes(bytes);

        let Some(num_merges) = self.config.num_merges() else {
            log::warn!(
                "vocab_size ({}) must be greater than {}; no merges will be performed",
                self.config.vocab_size,
                BYTE_VOCAB_SIZE
            );
            return TrainingOutcome {
                merges: MergeRules::new(),
                ids: counter.into_ids(),
            };
        };

        if counter.is_empty() {
            log::warn!("Input text for training is empty");
            return TrainingOutcome::default();
        }

        let mut progress = Progress::new(num_merges);
        let outcome = match self.config.strategy {
            TrainingStrategy::FullRescan => self.train_full_rescan(counter, &mut progress),
            TrainingStrategy::Incremental => self.train_incremental(counter, &mut progress),
        };

        if outcome.merges.len() < num_merges {
            log::info!("No more pairs to merge; stopping training early");
        }
        log::info!(
            "BPE training finished: learned {} merges, {} -> {} symbols",
            outcome.merges.len(),
            bytes.len(),
            outcome.ids.len()
        );

        outcome
    }

    /// Reference loop: recount every pair before every merge.
    fn train_full_rescan(
        &self,
        mut counter: PairCounter,
        progress: &mut Progress,
    ) -> TrainingOutcome {
        let mut merges = MergeRules::with_capacity(progress.total.min(counter.len()));

        while merges.len() < progress.total {
            let pair_counts = self.count(&counter);
            let Some((pair, count)) = most_frequent(&pair_counts) else {
                break;
            };

            let new_token_id = merges.add_merge(pair);
            counter.merge_pair(pair, new_token_id);
            progress.record(pair, new_token_id, count);
        }

        TrainingOutcome {
            merges,
            ids: counter.into_ids(),
        }
    }

    /// Count once, then update only the pairs each merge touched.
    fn train_incremental(
        &self,
        mut counter: PairCounter,
        progress: &mut Progress,
    ) -> TrainingOutcome {
        let mut merges = MergeRules::with_capacity(progress.total.min(counter.len()));

        let mut pair_counts = self.count(&counter);
        let mut queue = PairPriorityQueue::with_capacity(pair_counts.len());
        for (&pair, &count) in &pair_counts {
            queue.update(pair, count);
        }

        while merges.len() < progress.total {
            let Some(candidate) = queue.pop() else {
                break;
            };

            let new_token_id = merges.add_merge(candidate.pair);
            let changes = counter.merge_pair_tracked(candidate.pair, new_token_id);
            Self::update_pair_counts(&mut pair_counts, &mut queue, changes);
            progress.record(candidate.pair, new_token_id, candidate.count);
        }

        TrainingOutcome {
            merges,
            ids: counter.into_ids(),
        }
    }

    fn count(&self, counter: &PairCounter) -> PairCounts {
        if self.config.parallel {
            counter.count_pairs_parallel()
        } else {
            counter.count_pairs_sequential()
        }
    }

    /// Update pair counts after a merge.
    fn update_pair_counts(
        pair_counts: &mut PairCounts,
        queue: &mut PairPriorityQueue,
        changes: Vec<(Pair, i64)>,
    ) {
        for (pair, delta) in aggregate_changes(changes) {
            if delta == 0 {
                continue;
            }

            let current = pair_counts.get(&pair).copied().unwrap_or(0);
            let new_count = (current as i64 + delta).max(0) as u64;

            if new_count > 0 {
                pair_counts.insert(pair, new_count);
            } else {
                pair_counts.remove(&pair);
            }
            queue.update(pair, new_count);
        }
    }
}

/// Per-merge progress reporting.
struct Progress {
    total: usize,
    done: usize,
    last_percent: usize,
}

impl Progress {
    fn new(total: usize) -> Self {
        log::info!("Computing up to {} merges", total);
        Self {
            total,
            done: 0,
            last_percent: 0,
        }
    }

    fn record(&mut self, pair: Pair, new_token_id: TokenId, count: u64) {
        self.done += 1;
        log::debug!(
            "Merge {}/{}: ({}, {}) -> {} (frequency: {})",
            self.done,
            self.total,
            pair.0,
            pair.1,
            new_token_id,
            count
        );

        let percent = self.done * 100 / self.total;
        if percent > self.last_percent {
            log::info!(
                "Progress: {}% ({}/{} merges) - last merge: ({}, {}) -> {} (frequency: {})",
                percent,
                self.done,
                self.total,
                pair.0,
                pair.1,
                new_token_id,
                count
            );
            self.last_percent = percent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytebpe_core::{ByteLevelEncoder, MergeRule};

    fn trainer(vocab_size: usize, strategy: TrainingStrategy) -> BpeTrainer {
        BpeTrainer::new(TrainingConfig {
            vocab_size,
            parallel: false,
            strategy,
        })
    }

    const STRATEGIES: [TrainingStrategy; 2] =
        [TrainingStrategy::FullRescan, TrainingStrategy::Incremental];

    /// Deterministic pseudo-random bytes over a small alphabet.
    fn generated_text(seed: u32, len: usize, alphabet: u8) -> Vec<u8> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                b'a' + ((state >> 16) % alphabet as u32) as u8
            })
            .collect()
    }

    #[test]
    fn test_num_merges() {
        let config = |vocab_size| TrainingConfig {
            vocab_size,
            ..Default::default()
        };
        assert_eq!(config(0).num_merges(), None);
        assert_eq!(config(256).num_merges(), None);
        assert_eq!(config(257).num_merges(), Some(1));
        assert_eq!(config(1000).num_merges(), Some(744));
    }

    #[test]
    fn test_aaab_single_merge() {
        for strategy in STRATEGIES {
            let outcome = trainer(257, strategy).train(b"aaab");

            assert_eq!(outcome.merges.as_slice(), &[MergeRule::new((97, 97), 256)]);
            assert_eq!(outcome.ids, vec![256, 97, 98]);

            let encoder = ByteLevelEncoder::new(outcome.merges);
            assert_eq!(encoder.encode(b"aaab"), vec![256, 97, 98]);
        }
    }

    #[test]
    fn test_small_vocab_learns_nothing() {
        for strategy in STRATEGIES {
            for vocab_size in [0, 100, 256] {
                let outcome = trainer(vocab_size, strategy).train(b"hello hello");
                assert!(outcome.merges.is_empty());
                assert_eq!(outcome.ids.len(), 11);
            }
        }
    }

    #[test]
    fn test_empty_input_learns_nothing() {
        for strategy in STRATEGIES {
            let outcome = trainer(300, strategy).train(b"");
            assert!(outcome.merges.is_empty());
            assert!(outcome.ids.is_empty());
        }
    }

    #[test]
    fn test_stops_when_no_pairs_left() {
        for strategy in STRATEGIES {
            // "abcd" collapses to one symbol after three merges.
            let outcome = trainer(1000, strategy).train(b"abcd");
            assert_eq!(outcome.merges.len(), 3);
            assert_eq!(outcome.ids.len(), 1);

            let outcome = trainer(1000, strategy).train(b"z");
            assert!(outcome.merges.is_empty());
            assert_eq!(outcome.ids, vec![122]);
        }
    }

    #[test]
    fn test_new_ids_are_sequential() {
        let text = b"the quick brown fox jumps over the lazy dog, the end";
        let outcome = BpeTrainer::with_vocab_size(270).train(text);
        for (rank, rule) in outcome.merges.iter().enumerate() {
            assert_eq!(rule.new_id as usize, 256 + rank);
        }
    }

    #[test]
    fn test_tie_break_prefers_smallest_pair() {
        for strategy in STRATEGIES {
            // "ab" and "cd" both occur twice; (97, 98) < (99, 100).
            let outcome = trainer(257, strategy).train(b"cdabcdab");
            assert_eq!(outcome.merges.as_slice(), &[MergeRule::new((97, 98), 256)]);

            // Equal left element: the right element decides.
            let outcome = trainer(257, strategy).train(b"xzxyxzxy");
            assert_eq!(outcome.merges.get(0).map(|r| r.pair), Some((120, 121)));
        }
    }

    #[test]
    fn test_training_is_reproducible() {
        let text = generated_text(7, 2_000, 5);
        let first = BpeTrainer::with_vocab_size(320).train(&text);
        for _ in 0..3 {
            let again = BpeTrainer::with_vocab_size(320).train(&text);
            assert_eq!(again.merges, first.merges);
        }
    }

    #[test]
    fn test_overlapping_runs() {
        for strategy in STRATEGIES {
            // (97, 97) counts 4 in "aaaaa", merging gives [256, 256, 97];
            // then (256, 256) and (256, 97) tie at 1 and the smaller wins.
            let outcome = trainer(258, strategy).train(b"aaaaa");
            assert_eq!(
                outcome.merges.as_slice(),
                &[
                    MergeRule::new((97, 97), 256),
                    MergeRule::new((256, 97), 257)
                ]
            );
            assert_eq!(outcome.ids, vec![256, 257]);
        }
    }

    #[test]
    fn test_strategies_agree() {
        for seed in 0..12 {
            let alphabet = 2 + (seed % 5) as u8;
            let text = generated_text(seed, 300 + 50 * seed as usize, alphabet);

            let full = trainer(400, TrainingStrategy::FullRescan).train(&text);
            let incremental = trainer(400, TrainingStrategy::Incremental).train(&text);

            assert_eq!(full.merges, incremental.merges, "seed {}", seed);
            assert_eq!(full.ids, incremental.ids, "seed {}", seed);
        }
    }

    #[test]
    fn test_parallel_counting_agrees() {
        let text = generated_text(99, 5_000, 4);
        for strategy in STRATEGIES {
            let sequential = trainer(300, strategy).train(&text);
            let parallel = BpeTrainer::new(TrainingConfig {
                vocab_size: 300,
                parallel: true,
                strategy,
            })
            .train(&text);
            assert_eq!(sequential.merges, parallel.merges);
        }
    }

    #[test]
    fn test_encode_reproduces_final_sequence() {
        for seed in 0..8 {
            let text = generated_text(seed + 100, 1_000, 3 + (seed % 4) as u8);
            for strategy in STRATEGIES {
                let outcome = trainer(300, strategy).train(&text);
                let encoder = ByteLevelEncoder::new(outcome.merges.clone());
                assert_eq!(encoder.encode(&text), outcome.ids);
            }
        }
    }
}
