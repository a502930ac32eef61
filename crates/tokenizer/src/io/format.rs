//! Format definitions for merge rule serialization.

use bytebpe_core::{MergeRule, MergeRules, Result, TokenId, TokenizerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Model format types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModelFormat {
    /// One `left right new_id` rule per line
    #[default]
    Text,
    /// Custom JSON format
    Json,
}

impl ModelFormat {
    /// Pick a format from a file extension: `.json` is JSON, anything else text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

impl FromStr for ModelFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown format {s:?} (expected \"text\" or \"json\")")),
        }
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// JSON file layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedMerges {
    /// Format version
    pub version: String,
    /// Merge rules in application order
    pub merges: MergeRules,
}

/// Render one rule as a text line (without the newline).
pub fn format_rule_line(rule: &MergeRule) -> String {
    format!("{} {} {}", rule.pair.0, rule.pair.1, rule.new_id)
}

/// Parse one text line: exactly three whitespace-separated unsigned integers.
pub fn parse_rule_line(line: &str) -> Result<MergeRule> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(TokenizerError::InvalidMerge(format!(
            "expected 3 fields, found {}",
            fields.len()
        )));
    }

    let parse = |field: &str| {
        field
            .parse::<TokenId>()
            .map_err(|e| TokenizerError::InvalidMerge(format!("bad token id {field:?}: {e}")))
    };

    Ok(MergeRule::new(
        (parse(fields[0])?, parse(fields[1])?),
        parse(fields[2])?,
    ))
}
