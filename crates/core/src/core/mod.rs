//! Core BPE algorithm implementation.
//!
//! This module contains the fundamental data structures and algorithms
//! for byte-pair encoding, independent of any training strategy.

pub mod merges;
pub mod priority;
pub mod stats;

pub use merges::{merge_pair, MergeRule, MergeRules, Pair, TokenId, BYTE_VOCAB_SIZE};
pub use priority::{MergeCandidate, PairPriorityQueue};
pub use stats::{most_frequent, pair_counts, PairCounts};
