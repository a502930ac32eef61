//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that ties training,
//! encoding and rule persistence together.

use crate::io::{MergesLoader, MergesSaver, ModelFormat};
use bytebpe_core::{ByteLevelEncoder, MergeRules, Result, TokenId, BYTE_VOCAB_SIZE};
use bytebpe_training::{BpeTrainer, TrainingConfig, TrainingStrategy};
use std::fmt;
use std::path::Path;

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TrainingConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target vocabulary size.
    pub fn vocab_size(mut self, size: usize) -> Self {
        self.config.vocab_size = size;
        self
    }

    /// Count pairs in parallel during training.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Set the training strategy.
    pub fn strategy(mut self, strategy: TrainingStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Build the tokenizer.
    pub fn build(self) -> Tokenizer {
        Tokenizer::new(self.config)
    }
}

/// Result of encoding a byte sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoding {
    /// Token IDs
    pub ids: Vec<TokenId>,
}

impl Encoding {
    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if no tokens were produced.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Space-separated IDs on a single line.
impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.ids.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

/// Main tokenizer struct.
///
/// Holds a training configuration and the current ordered rule list.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    /// Training configuration
    config: TrainingConfig,
    /// Encoder over the current rules
    encoder: ByteLevelEncoder,
}

impl Tokenizer {
    /// Create an untrained tokenizer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            encoder: ByteLevelEncoder::default(),
        }
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Create a tokenizer from already learned rules.
    pub fn from_merges(merges: MergeRules) -> Self {
        Self {
            config: TrainingConfig {
                vocab_size: BYTE_VOCAB_SIZE + merges.len(),
                ..Default::default()
            },
            encoder: ByteLevelEncoder::new(merges),
        }
    }

    /// Learn rules from `bytes`, replacing any rules held before.
    pub fn train(&mut self, bytes: &[u8]) -> &MergeRules {
        let outcome = BpeTrainer::new(self.config.clone()).train(bytes);
        self.encoder = ByteLevelEncoder::new(outcome.merges);
        self.encoder.merges()
    }

    /// Encode bytes into token IDs.
    pub fn encode(&self, bytes: &[u8]) -> Encoding {
        Encoding {
            ids: self.encoder.encode(bytes),
        }
    }

    /// The current rules, in application order.
    pub fn merges(&self) -> &MergeRules {
        self.encoder.merges()
    }

    /// The training configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Number of symbols: 256 byte symbols plus one per rule.
    pub fn vocab_size(&self) -> usize {
        BYTE_VOCAB_SIZE + self.merges().len()
    }

    /// Save the rules to `path`.
    pub fn save(&self, path: &Path, format: ModelFormat) -> Result<()> {
        MergesSaver::new(self.merges()).save(path, format)
    }

    /// Load rules from `path`.
    ///
    /// Malformed text lines are skipped; a file with no usable rules gives an
    /// identity tokenizer and a warning.
    pub fn load(path: &Path, format: ModelFormat) -> Result<Self> {
        let report = MergesLoader::load(path, format)?;
        if report.merges.is_empty() {
            log::warn!(
                "Loaded merges file is empty or invalid: {}",
                path.display()
            );
        } else if !report.skipped.is_empty() {
            log::warn!(
                "Skipped {} invalid lines in {}",
                report.skipped.len(),
                path.display()
            );
        }
        Ok(Self::from_merges(report.merges))
    }
}
