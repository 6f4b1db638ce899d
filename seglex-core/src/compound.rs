//! Compound merging automaton
//!
//! A single left-to-right pass over the document runs several trie walks at
//! once, one per candidate start offset. Each walk owns a [`PendingMatch`]
//! that remembers the longest terminal boundary reached so far; when the walk
//! falls off the trie, the match fires if it covers at least one character.
//!
//! New walks are only started at the root when every walk has died, or right
//! after some walk reaches a terminal node. Candidates starting inside a live,
//! not-yet-complete walk are therefore not tracked.

use crate::bank::{category, SegmentBank};
use crate::span::TextSpan;
use crate::trie::{fold, NodeId, SegmentTrie};
use std::collections::BTreeMap;

/// Transient match state owned by one walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMatch {
    /// Offset where the walk started
    pub begin: usize,
    /// Longest terminal boundary seen along the walk (0 = none yet)
    pub end: usize,
}

impl PendingMatch {
    /// Fresh walk starting at `begin`
    pub fn new(begin: usize) -> Self {
        Self { begin, end: 0 }
    }

    /// Record a terminal boundary
    pub fn update(&mut self, end: usize) {
        self.end = end;
    }

    /// The compound span, if the walk ever completed a pattern
    pub fn fire(&self) -> Option<TextSpan> {
        TextSpan::non_empty(self.begin, self.end)
    }
}

/// Finds compound expressions over a whole document
#[derive(Debug, Clone, Copy)]
pub struct CompoundMerger<'a> {
    trie: &'a SegmentTrie,
    flush_trailing: bool,
}

impl<'a> CompoundMerger<'a> {
    /// Merger over a compound trie; trailing matches are flushed
    pub fn new(trie: &'a SegmentTrie) -> Self {
        Self {
            trie,
            flush_trailing: true,
        }
    }

    /// Merger for a bank, or `None` when `compound` is missing
    pub fn from_bank(bank: &'a SegmentBank) -> Option<Self> {
        bank.get(category::COMPOUND).map(Self::new)
    }

    /// Whether walks still alive at end of text fire their best match.
    ///
    /// With `false`, a compound ending exactly at the end of the document is
    /// lost, since no failing transition can follow it.
    pub fn flush_trailing(mut self, flush: bool) -> Self {
        self.flush_trailing = flush;
        self
    }

    /// Compound spans in the order they fired
    pub fn merge(&self, chars: &[char]) -> Vec<TextSpan> {
        let trie = self.trie;
        let root = trie.root();

        // Keyed by node: a node fixes the walked string, hence the start
        // offset, so two walks can only collide if they are identical.
        let mut states: BTreeMap<NodeId, PendingMatch> = BTreeMap::new();
        let mut nexts: BTreeMap<NodeId, PendingMatch> = BTreeMap::new();
        let mut compounds = Vec::new();

        states.insert(root, PendingMatch::new(0));

        for (index, &ch) in chars.iter().enumerate() {
            let ch = fold(ch);

            nexts.clear();
            for (&node, &pending) in &states {
                match trie.get(node, ch) {
                    Some(child) => {
                        let previous = nexts.insert(child, pending);
                        debug_assert!(previous.map_or(true, |p| p.begin == pending.begin));
                    }
                    None => compounds.extend(pending.fire()),
                }
            }
            std::mem::swap(&mut states, &mut nexts);

            if states.is_empty() {
                states.insert(root, PendingMatch::new(index + 1));
                continue;
            }

            let mut completed = false;
            for (&node, pending) in states.iter_mut() {
                if trie.is_terminal(node) {
                    pending.update(index + 1);
                    completed = true;
                }
            }
            if completed {
                states.insert(root, PendingMatch::new(index + 1));
            }
        }

        if self.flush_trailing {
            compounds.extend(states.values().filter_map(PendingMatch::fire));
        }

        tracing::trace!(compounds = compounds.len(), "compounds merged");
        compounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merge(patterns: &[&str], text: &str, flush: bool) -> Vec<(usize, usize)> {
        let trie = SegmentTrie::from_patterns(patterns.iter().map(|p| (*p, false)));
        let chars: Vec<char> = text.chars().collect();
        let mut spans = CompoundMerger::new(&trie).flush_trailing(flush).merge(&chars);
        spans.sort();
        spans.into_iter().map(|s| (s.begin, s.end)).collect()
    }

    #[test]
    fn test_compound_inside_sentence() {
        assert_eq!(
            merge(&["c'est-à-dire"], "Ce c'est-à-dire reste.", false),
            vec![(3, 15)]
        );
    }

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(merge(&["c'est-à-dire"], "C'EST-À-DIRE !", false), vec![(0, 12)]);
    }

    #[test]
    fn test_longest_terminal_wins() {
        assert_eq!(merge(&["ab", "abcd"], "abcdx", false), vec![(0, 4)]);
    }

    #[test]
    fn test_falls_back_to_last_terminal() {
        assert_eq!(merge(&["ab", "abcd"], "abcx", false), vec![(0, 2)]);
    }

    #[test]
    fn test_trailing_match_flushed() {
        assert_eq!(
            merge(&["c'est-à-dire"], "voilà c'est-à-dire", true),
            vec![(6, 18)]
        );
    }

    #[test]
    fn test_trailing_match_lost_without_flush() {
        assert!(merge(&["c'est-à-dire"], "voilà c'est-à-dire", false).is_empty());
    }

    #[test]
    fn test_multiword_compound() {
        assert_eq!(
            merge(&["pomme de terre"], "une pomme de terre cuite", false),
            vec![(4, 18)]
        );
    }

    #[test]
    fn test_adjacent_compounds() {
        assert_eq!(merge(&["ab"], "abab", true), vec![(0, 2), (2, 4)]);
    }

    #[test]
    fn test_start_inside_live_walk_is_not_tracked() {
        assert!(merge(&["abd", "bc"], "abc", true).is_empty());
    }

    #[test]
    fn test_no_match_yields_nothing() {
        assert!(merge(&["peut-être"], "rien ici", true).is_empty());
        assert!(merge(&["peut-être"], "", true).is_empty());
    }

    #[test]
    fn test_pending_match_fires_only_when_extended() {
        let mut pending = PendingMatch::new(3);
        assert_eq!(pending.fire(), None);
        pending.update(7);
        assert_eq!(pending.fire(), Some(TextSpan::new(3, 7)));
    }
}
