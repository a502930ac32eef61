//! bytebpe-tokenizer - High-level tokenizer API
//!
//! This crate provides a user-friendly interface for byte-level BPE,
//! integrating training, encoding and rule persistence into a single API.
//!
//! # Features
//!
//! - Simple builder pattern for tokenizer configuration
//! - Binary-safe: input is an opaque byte stream
//! - Line-oriented text and JSON rule files
//!
//! # Example
//!
//! ```rust
//! use bytebpe_tokenizer::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::builder().vocab_size(257).build();
//! tokenizer.train(b"aaab");
//!
//! let encoding = tokenizer.encode(b"aaab");
//! assert_eq!(encoding.ids, vec![256, 97, 98]);
//! assert_eq!(encoding.to_string(), "256 97 98");
//! ```

// Re-export core types
pub use bytebpe_core::{MergeRule, MergeRules, Result, TokenId, TokenizerError};
pub use bytebpe_training::{TrainingConfig, TrainingStrategy};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Encoding, Tokenizer, TokenizerBuilder};

// IO/Serialization
pub mod io;
pub use io::{LoadReport, MergesLoader, MergesSaver, ModelFormat};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
