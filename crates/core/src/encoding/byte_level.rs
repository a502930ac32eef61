//! Byte-level BPE encoding.
//!
//! Rules are applied strictly in list order. Each rule gets exactly one full
//! left-to-right pass over the current sequence; there is no re-ranking and no
//! revisiting of earlier rules.

use crate::core::merges::{MergeRules, TokenId};

/// Map every byte to its base symbol ID.
#[inline]
pub fn bytes_to_ids(bytes: &[u8]) -> Vec<TokenId> {
    bytes.iter().map(|&b| TokenId::from(b)).collect()
}

/// Byte-level BPE encoder over an ordered rule list.
#[derive(Debug, Clone, Default)]
pub struct ByteLevelEncoder {
    /// Merge rules in application order
    merges: MergeRules,
}

impl ByteLevelEncoder {
    /// Create a new byte-level encoder.
    pub fn new(merges: MergeRules) -> Self {
        Self { merges }
    }

    /// The rules this encoder applies.
    pub fn merges(&self) -> &MergeRules {
        &self.merges
    }

    /// Encode bytes to token IDs.
    ///
    /// Empty input yields an empty sequence; an empty rule list yields the
    /// raw byte IDs.
    pub fn encode(&self, bytes: &[u8]) -> Vec<TokenId> {
        if bytes.is_empty() {
            log::warn!("Input for encoding is empty");
            return Vec::new();
        }

        let mut ids = bytes_to_ids(bytes);

        for rule in &self.merges {
            // A sequence of one symbol cannot contain any pair.
            if ids.len() < 2 {
                break;
            }
            let before = ids.len();
            ids = rule.apply(&ids);
            log::trace!(
                "Applied {:?} -> {}: {} -> {} symbols",
                rule.pair,
                rule.new_id,
                before,
                ids.len()
            );
        }

        ids
    }
}
