//! bytebpe-core - Core byte-pair encoding algorithms
//!
//! This crate provides the fundamental data structures and algorithms for
//! byte-level BPE, independent of training strategy or file formats.
//!
//! # Features
//!
//! - Ordered merge rule lists with rank lookup
//! - Overlap-inclusive pair statistics with a deterministic tie-break
//! - Greedy, non-overlapping merge application
//! - Lazy-invalidation priority queue for incremental training
//!
//! # Example
//!
//! ```rust
//! use bytebpe_core::{ByteLevelEncoder, MergeRule, MergeRules};
//!
//! let mut rules = MergeRules::new();
//! rules.push(MergeRule::new((97, 97), 256));
//!
//! let encoder = ByteLevelEncoder::new(rules);
//! assert_eq!(encoder.encode(b"aaab"), vec![256, 97, 98]);
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Core BPE algorithm modules
pub mod core;
pub use core::{
    merge_pair, most_frequent, pair_counts, MergeCandidate, MergeRule, MergeRules, Pair,
    PairCounts, PairPriorityQueue, TokenId, BYTE_VOCAB_SIZE,
};

// Encoding
pub mod encoding;
pub use encoding::{bytes_to_ids, ByteLevelEncoder};
