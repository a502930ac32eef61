//! bytebpe-training - BPE training infrastructure
//!
//! This crate learns an ordered list of merge rules from raw bytes.
//!
//! # Features
//!
//! - Overlap-inclusive pair counting, optionally parallel with rayon
//! - Full-rescan reference trainer and an incremental trainer with identical output
//! - Deterministic tie-break: the lexicographically smallest pair wins
//!
//! # Example
//!
//! ```rust
//! use bytebpe_training::{BpeTrainer, TrainingConfig, TrainingStrategy};
//!
//! let trainer = BpeTrainer::new(TrainingConfig {
//!     vocab_size: 257,
//!     parallel: false,
//!     strategy: TrainingStrategy::FullRescan,
//! });
//!
//! let outcome = trainer.train(b"aaab");
//! assert_eq!(outcome.merges.len(), 1);
//! assert_eq!(outcome.ids, vec![256, 97, 98]);
//! ```

pub use bytebpe_core::{MergeRule, MergeRules, Result, TokenizerError};

// Training infrastructure
pub mod training;
pub use training::{BpeTrainer, PairCounter, TrainingConfig, TrainingOutcome, TrainingStrategy};
