//! Load functionality for merge rule files.
//!
//! Text files are parsed leniently: a malformed line is skipped with a warning
//! and parsing continues, so a file with N valid lines yields N rules no matter
//! how many bad lines surround them.

use super::format::{parse_rule_line, ModelFormat, SerializedMerges};
use bytebpe_core::{MergeRules, Result, TokenizerError};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A text line that did not parse as a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line_number: usize,
    /// The line as read, lossily decoded
    pub content: String,
    /// Why it was rejected
    pub reason: String,
}

/// Rules read from a file plus the lines that were skipped.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Successfully parsed rules, in file order
    pub merges: MergeRules,
    /// Lines that failed to parse
    pub skipped: Vec<SkippedLine>,
}

/// Merge rule loader.
pub struct MergesLoader;

impl MergesLoader {
    /// Load rules from `path` in the given format.
    pub fn load(path: &Path, format: ModelFormat) -> Result<LoadReport> {
        let report = match format {
            ModelFormat::Text => Self::load_text(path)?,
            ModelFormat::Json => Self::load_json(path)?,
        };

        log::info!(
            "Loaded {} merges from {}",
            report.merges.len(),
            path.display()
        );
        Ok(report)
    }

    /// Load a line-oriented text rule file.
    pub fn load_text(path: &Path) -> Result<LoadReport> {
        let bytes = std::fs::read(path).map_err(|e| TokenizerError::io(path, e))?;
        Ok(Self::parse_text(&bytes))
    }

    /// Load a JSON rule file.
    pub fn load_json(path: &Path) -> Result<LoadReport> {
        let file = File::open(path).map_err(|e| TokenizerError::io(path, e))?;

        let reader = BufReader::new(file);
        let serialized: SerializedMerges = serde_json::from_reader(reader).map_err(|e| {
            TokenizerError::Load(format!("Failed to deserialize {}: {}", path.display(), e))
        })?;

        Ok(LoadReport {
            merges: serialized.merges,
            skipped: Vec::new(),
        })
    }

    /// Parse text rule file contents.
    ///
    /// Blank lines are ignored; any other line that is not exactly three
    /// unsigned integers is skipped and reported.
    pub fn parse_text(contents: &[u8]) -> LoadReport {
        let mut report = LoadReport::default();

        for (index, raw) in contents.split(|&b| b == b'\n').enumerate() {
            let line = String::from_utf8_lossy(raw.strip_suffix(b"\r").unwrap_or(raw));
            if line.trim().is_empty() {
                continue;
            }

            match parse_rule_line(&line) {
                Ok(rule) => report.merges.push(rule),
                Err(err) => {
                    log::warn!(
                        "Skipping invalid line {} in merges file: {:?} ({})",
                        index + 1,
                        line,
                        err
                    );
                    report.skipped.push(SkippedLine {
                        line_number: index + 1,
                        content: line.into_owned(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytebpe_core::MergeRule;

    #[test]
    fn test_parse_text() {
        let report = MergesLoader::parse_text(b"97 97 256\n256 98 257\n");
        assert_eq!(
            report.merges.as_slice(),
            &[
                MergeRule::new((97, 97), 256),
                MergeRule::new((256, 98), 257)
            ]
        );
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_parse_text_skips_invalid_lines() {
        let contents = b"97 97 256\nnot a rule\n1 2\n\n256 98 257\r\n1 2 3 4\n98 99 258";
        let report = MergesLoader::parse_text(contents);

        assert_eq!(report.merges.len(), 3);
        assert_eq!(report.merges.get(2), Some(&MergeRule::new((98, 99), 258)));

        let skipped: Vec<usize> = report.skipped.iter().map(|s| s.line_number).collect();
        assert_eq!(skipped, vec![2, 3, 6]);
        assert_eq!(report.skipped[0].content, "not a rule");
    }

    #[test]
    fn test_parse_text_invalid_utf8_is_skipped() {
        let report = MergesLoader::parse_text(b"\xff\xfe 1 2\n1 2 256\n");
        assert_eq!(report.merges.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line_number, 1);
    }

    #[test]
    fn test_parse_text_empty() {
        let report = MergesLoader::parse_text(b"");
        assert!(report.merges.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        match MergesLoader::load(&path, ModelFormat::Text) {
            Err(TokenizerError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected I/O error, got {:?}", other),
        }
        assert!(matches!(
            MergesLoader::load(&path, ModelFormat::Json),
            Err(TokenizerError::Io { .. })
        ));
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merges.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            MergesLoader::load(&path, ModelFormat::Json),
            Err(TokenizerError::Load(_))
        ));
    }
}
