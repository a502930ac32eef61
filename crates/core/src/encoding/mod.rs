//! Encoding of raw bytes into token IDs.
//!
//! Input is treated as an opaque byte stream: every byte becomes one base
//! symbol (0-255) and learned merge rules are applied on top.

pub mod byte_level;

pub use byte_level::{bytes_to_ids, ByteLevelEncoder};
