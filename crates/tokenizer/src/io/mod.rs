//! Serialization and deserialization of merge rules.
//!
//! Rules are stored either as a line-oriented text file (`left right new_id`
//! per line) or as JSON.

pub mod format;
pub mod load;
pub mod save;

pub use format::{format_rule_line, parse_rule_line, ModelFormat, SerializedMerges};
pub use load::{LoadReport, MergesLoader, SkippedLine};
pub use save::MergesSaver;
