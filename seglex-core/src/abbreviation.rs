//! Abbreviation exception for affix splitting
//!
//! Multi-part abbreviations and initials (`M.M.`, `C.A.F.`) are never
//! shredded into letters and dots. Tokens listed in the optional
//! `abbreviation` dictionary category (`M.`, `Mme.`) are protected too.

use crate::trie::SegmentTrie;
use regex::Regex;
use std::sync::OnceLock;

static ABBREVIATION: OnceLock<Regex> = OnceLock::new();

fn pattern() -> &'static Regex {
    ABBREVIATION.get_or_init(|| {
        Regex::new(r"^\p{Lu}\p{Ll}*\.(?:\p{Lu}\p{Ll}*\.)+$")
            .expect("abbreviation pattern is a valid regex")
    })
}

/// True if `text` is two or more `Capital lowercase* .` groups
pub fn is_abbreviation(text: &str) -> bool {
    pattern().is_match(text)
}

/// Decides whether a token is exempt from affix splitting
#[derive(Debug, Clone, Copy, Default)]
pub struct AbbreviationGuard<'a> {
    listed: Option<&'a SegmentTrie>,
}

impl<'a> AbbreviationGuard<'a> {
    /// Guard using the built-in pattern and an optional dictionary of
    /// listed abbreviations
    pub fn new(listed: Option<&'a SegmentTrie>) -> Self {
        Self { listed }
    }

    /// True if the covered characters must stay in one piece
    pub fn protects(&self, token: &[char]) -> bool {
        if let Some(trie) = self.listed {
            if trie.contains(token.iter().copied()) {
                return true;
            }
        }
        let text: String = token.iter().collect();
        is_abbreviation(&text)
    }
}
