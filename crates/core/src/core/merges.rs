//! Merge rule management for BPE.
//!
//! This module provides data structures for storing and applying BPE merge rules.
//! Rules are kept in creation order: the position of a rule in the list is both
//! its training rank and the order in which it must be applied when encoding.

use serde::{Deserialize, Serialize};

/// A symbol ID: a raw byte (0-255) or a merged symbol (>= 256).
pub type TokenId = u32;

/// A pair of adjacent token IDs that can be merged.
pub type Pair = (TokenId, TokenId);

/// Number of base symbols: one per byte value.
pub const BYTE_VOCAB_SIZE: usize = 256;

/// A single learned merge: `pair` is replaced by `new_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergeRule {
    /// The adjacent pair this rule matches
    pub pair: Pair,
    /// The symbol that replaces the pair
    pub new_id: TokenId,
}

impl MergeRule {
    /// Create a new merge rule.
    pub fn new(pair: Pair, new_id: TokenId) -> Self {
        Self { pair, new_id }
    }

    /// Apply this rule once across `ids`.
    #[inline]
    pub fn apply(&self, ids: &[TokenId]) -> Vec<TokenId> {
        merge_pair(ids, self.pair, self.new_id)
    }
}

/// Ordered collection of BPE merge rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergeRules {
    rules: Vec<MergeRule>,
}

impl MergeRules {
    /// Create a new empty collection of merge rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a new collection with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rules: Vec::with_capacity(capacity),
        }
    }

    /// Append a rule; it is applied after every rule already present.
    pub fn push(&mut self, rule: MergeRule) {
        self.rules.push(rule);
    }

    /// Append a rule for `pair` using the next unused ID.
    ///
    /// Returns the new ID.
    pub fn add_merge(&mut self, pair: Pair) -> TokenId {
        let new_id = self.next_id();
        self.rules.push(MergeRule::new(pair, new_id));
        new_id
    }

    /// The ID the next learned rule receives: `256 + len`.
    #[inline]
    pub fn next_id(&self) -> TokenId {
        (BYTE_VOCAB_SIZE + self.rules.len()) as TokenId
    }

    /// Get the rule at the given rank.
    #[inline]
    pub fn get(&self, rank: usize) -> Option<&MergeRule> {
        self.rules.get(rank)
    }

    /// Iterate the rules in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, MergeRule> {
        self.rules.iter()
    }

    /// View the rules as a slice.
    pub fn as_slice(&self) -> &[MergeRule] {
        &self.rules
    }

    /// Get the number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Vec<MergeRule>> for MergeRules {
    fn from(rules: Vec<MergeRule>) -> Self {
        Self { rules }
    }
}

impl FromIterator<MergeRule> for MergeRules {
    fn from_iter<I: IntoIterator<Item = MergeRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MergeRules {
    type Item = MergeRule;
    type IntoIter = std::vec::IntoIter<MergeRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<'a> IntoIterator for &'a MergeRules {
    type Item = &'a MergeRule;
    type IntoIter = std::slice::Iter<'a, MergeRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Replace every non-overlapping occurrence of `pair` in `ids` with `new_id`.
///
/// Scans left to right; a match consumes both elements, so in `[a, a, a]`
/// only the leftmost `(a, a)` is merged.
pub fn merge_pair(ids: &[TokenId], pair: Pair, new_id: TokenId) -> Vec<TokenId> {
    let mut out = Vec::with_capacity(ids.len());
    let mut i = 0;

    while i < ids.len() {
        if i + 1 < ids.len() && ids[i] == pair.0 && ids[i + 1] == pair.1 {
            out.push(new_id);
            i += 2;
        } else {
            out.push(ids[i]);
            i += 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_pair_basic() {
        let ids = vec![1, 2, 3, 1, 2];
        assert_eq!(merge_pair(&ids, (1, 2), 256), vec![256, 3, 256]);
    }

    #[test]
    fn test_merge_pair_no_overlap() {
        // The leftmost pair wins, the trailing element is left alone.
        assert_eq!(merge_pair(&[5, 5, 5], (5, 5), 300), vec![300, 5]);
        assert_eq!(merge_pair(&[5, 5, 5, 5], (5, 5), 300), vec![300, 300]);
    }

    #[test]
    fn test_merge_pair_no_match() {
        let ids = vec![1, 2, 3];
        assert_eq!(merge_pair(&ids, (3, 1), 256), ids);
        assert!(merge_pair(&[], (1, 2), 256).is_empty());
        assert_eq!(merge_pair(&[1], (1, 1), 256), vec![1]);
    }

    #[test]
    fn test_merge_pair_repeat_is_noop() {
        let once = merge_pair(&[5, 5, 5], (5, 5), 300);
        let twice = merge_pair(&once, (5, 5), 300);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_add_merge_assigns_sequential_ids() {
        let mut rules = MergeRules::new();
        assert_eq!(rules.next_id(), 256);
        assert_eq!(rules.add_merge((97, 97)), 256);
        assert_eq!(rules.add_merge((256, 98)), 257);

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.get(1), Some(&MergeRule::new((256, 98), 257)));
        assert_eq!(rules.get(2), None);
    }

    #[test]
    fn test_rule_apply() {
        let rule = MergeRule::new((97, 97), 256);
        assert_eq!(rule.apply(&[97, 97, 97, 98]), vec![256, 97, 98]);
    }
}
