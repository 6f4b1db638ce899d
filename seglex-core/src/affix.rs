//! Prefix and suffix stripping
//!
//! Each token is walked against the `initial` trie from its start and the
//! `final` trie from its end. A match is only accepted where the walk falls
//! off the trie on a terminal node while characters remain, so a dictionary
//! entry equal to the whole token is never split off.

use crate::abbreviation::AbbreviationGuard;
use crate::bank::{category, SegmentBank};
use crate::span::TextSpan;
use crate::trie::{fold, SegmentTrie};
use smallvec::SmallVec;

/// Outcome of splitting one token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSplit {
    /// Affixes in stripping order: prefixes first, then suffixes
    pub affixes: SmallVec<[TextSpan; 4]>,
    /// What remains of the token once affixes are removed
    pub core: Option<TextSpan>,
}

impl TokenSplit {
    fn unsplit(token: TextSpan) -> Self {
        Self {
            affixes: SmallVec::new(),
            core: Some(token),
        }
    }

    /// All resulting spans, affixes then core
    pub fn spans(&self) -> impl Iterator<Item = TextSpan> + '_ {
        self.affixes.iter().copied().chain(self.core)
    }

    /// True if nothing was stripped
    pub fn is_unsplit(&self) -> bool {
        self.affixes.is_empty()
    }
}

/// Strips known prefixes and suffixes from tokens
#[derive(Debug, Clone, Copy)]
pub struct AffixSplitter<'a> {
    prefixes: &'a SegmentTrie,
    suffixes: &'a SegmentTrie,
    guard: AbbreviationGuard<'a>,
}

impl<'a> AffixSplitter<'a> {
    /// Splitter over a prefix trie and a (reversed) suffix trie
    pub fn new(prefixes: &'a SegmentTrie, suffixes: &'a SegmentTrie) -> Self {
        Self {
            prefixes,
            suffixes,
            guard: AbbreviationGuard::default(),
        }
    }

    /// Also protect tokens listed in an abbreviation trie
    pub fn with_abbreviations(mut self, listed: Option<&'a SegmentTrie>) -> Self {
        self.guard = AbbreviationGuard::new(listed);
        self
    }

    /// Splitter for a bank, or `None` when `initial` or `final` is missing
    pub fn from_bank(bank: &'a SegmentBank) -> Option<Self> {
        let prefixes = bank.get(category::INITIAL)?;
        let suffixes = bank.get(category::FINAL)?;
        Some(Self::new(prefixes, suffixes).with_abbreviations(bank.get(category::ABBREVIATION)))
    }

    /// Longest-walk prefix of `span`, if the walk stops on a terminal node
    pub fn find_prefix(&self, chars: &[char], span: TextSpan) -> Option<TextSpan> {
        let trie = self.prefixes;
        let mut node = trie.root();

        for index in span.begin..span.end {
            match trie.get(node, fold(chars[index])) {
                Some(next) => node = next,
                None if trie.is_terminal(node) => return TextSpan::non_empty(span.begin, index),
                None => return None,
            }
        }
        None
    }

    /// Mirror of [`find_prefix`](Self::find_prefix), walking back from the end
    pub fn find_suffix(&self, chars: &[char], span: TextSpan) -> Option<TextSpan> {
        let trie = self.suffixes;
        let mut node = trie.root();

        for index in (span.begin..span.end).rev() {
            match trie.get(node, fold(chars[index])) {
                Some(next) => node = next,
                None if trie.is_terminal(node) => return TextSpan::non_empty(index + 1, span.end),
                None => return None,
            }
        }
        None
    }

    /// Strip stacked prefixes, then stacked suffixes, from one token
    pub fn split(&self, chars: &[char], token: TextSpan) -> TokenSplit {
        if self.guard.protects(token.slice(chars)) {
            return TokenSplit::unsplit(token);
        }

        let mut affixes = SmallVec::new();
        let mut covering = token;

        while let Some(prefix) = self.find_prefix(chars, covering) {
            let Some(rest) = fill(covering, prefix) else {
                break;
            };
            affixes.push(prefix);
            covering = rest;
            if self.guard.protects(covering.slice(chars)) {
                break;
            }
        }

        if !self.guard.protects(covering.slice(chars)) {
            while let Some(suffix) = self.find_suffix(chars, covering) {
                let Some(rest) = fill(covering, suffix) else {
                    break;
                };
                affixes.push(suffix);
                covering = rest;
                if self.guard.protects(covering.slice(chars)) {
                    break;
                }
            }
        }

        TokenSplit {
            affixes,
            core: Some(covering),
        }
    }

    /// Replace every token by its split, in annotation index order
    pub fn split_tokens(&self, chars: &[char], tokens: &[TextSpan]) -> Vec<TextSpan> {
        let mut spans = Vec::with_capacity(tokens.len());
        let mut split_count = 0usize;

        for &token in tokens {
            let split = self.split(chars, token);
            if !split.is_unsplit() {
                split_count += 1;
            }
            spans.extend(split.spans());
        }
        spans.sort();

        tracing::trace!(
            tokens = tokens.len(),
            split = split_count,
            spans = spans.len(),
            "affixes stripped"
        );
        spans
    }
}

/// Shrink `covering` to the part not covered by the affix `covered`.
///
/// Trims one side only. Returns `None` when nothing would be left.
fn fill(covering: TextSpan, covered: TextSpan) -> Option<TextSpan> {
    if covering.begin < covered.begin {
        TextSpan::non_empty(covering.begin, covered.begin)
    } else if covered.end < covering.end {
        TextSpan::non_empty(covered.end, covering.end)
    } else {
        None
    }
}
