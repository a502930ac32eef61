//! Training infrastructure for BPE tokenizers.
//!
//! This module provides the training algorithms and utilities for
//! learning BPE merge rules from raw bytes.

pub mod counter;
pub mod trainer;

pub use counter::PairCounter;
pub use trainer::{BpeTrainer, TrainingConfig, TrainingOutcome, TrainingStrategy};
