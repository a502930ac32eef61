//! Save functionality for learned merge rules.

use super::format::{format_rule_line, ModelFormat, SerializedMerges};
use bytebpe_core::{MergeRules, Result, TokenizerError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Merge rule saver.
pub struct MergesSaver<'a> {
    /// Merge rules reference
    merges: &'a MergeRules,
}

impl<'a> MergesSaver<'a> {
    /// Create a new merges saver.
    pub fn new(merges: &'a MergeRules) -> Self {
        Self { merges }
    }

    /// Save the rules to `path` in the given format.
    ///
    /// The file is created before anything is serialized; if it cannot be
    /// created, nothing is written.
    pub fn save(&self, path: &Path, format: ModelFormat) -> Result<()> {
        let file = File::create(path).map_err(|e| TokenizerError::io(path, e))?;
        let mut writer = BufWriter::new(file);

        match format {
            ModelFormat::Text => self
                .write_text(&mut writer)
                .map_err(|e| TokenizerError::io(path, e))?,
            ModelFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, &self.serialize()).map_err(|e| {
                    TokenizerError::Save(format!(
                        "Failed to serialize merges to {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                writer
                    .write_all(b"\n")
                    .map_err(|e| TokenizerError::io(path, e))?;
            }
        }

        writer.flush().map_err(|e| TokenizerError::io(path, e))?;

        log::info!("Saved {} merges to {}", self.merges.len(), path.display());
        Ok(())
    }

    /// Write the rules as text, one `left right new_id` line each.
    pub fn write_text<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for rule in self.merges {
            writeln!(writer, "{}", format_rule_line(rule))?;
        }
        Ok(())
    }

    /// Build the JSON structure.
    fn serialize(&self) -> SerializedMerges {
        SerializedMerges {
            version: env!("CARGO_PKG_VERSION").to_string(),
            merges: self.merges.clone(),
        }
    }
}
