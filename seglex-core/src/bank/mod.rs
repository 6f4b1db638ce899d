//! Compiled dictionary bank: one segment trie per category
//!
//! The bank is compiled once from a [`DictionarySource`] and is read-only
//! afterwards, so it can be shared behind an `Arc` by every document.

mod loader;
mod source;

pub use loader::{builtin_dictionary, list_builtin_dictionaries, DictionaryFormat};
pub use source::{DictionaryMetadata, DictionarySource, SegmentEntry};

use crate::error::Result;
use crate::trie::{SegmentTrie, SegmentTrieBuilder};
use std::collections::BTreeMap;

/// Well-known category names
pub mod category {
    /// Prefixes stripped from the start of tokens
    pub const INITIAL: &str = "initial";
    /// Suffixes stripped from the end of tokens (entries usually reversed)
    pub const FINAL: &str = "final";
    /// Multi-character compounds merged into one span
    pub const COMPOUND: &str = "compound";
    /// Whole tokens protected from affix splitting
    pub const ABBREVIATION: &str = "abbreviation";
}

/// Per-category statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStats {
    /// Entries compiled into the category
    pub entries: usize,
    /// Trie nodes, root included
    pub nodes: usize,
}

/// Dictionary bank holding one compiled trie per category
#[derive(Debug, Clone)]
pub struct SegmentBank {
    metadata: Option<DictionaryMetadata>,
    entries: Vec<SegmentEntry>,
    tries: BTreeMap<String, SegmentTrie>,
}

impl SegmentBank {
    /// Validate and compile a dictionary source
    pub fn compile(source: DictionarySource) -> Result<Self> {
        source.validate()?;

        let mut builders: BTreeMap<String, SegmentTrieBuilder> = BTreeMap::new();
        for entry in &source.segments {
            builders
                .entry(entry.category.clone())
                .or_default()
                .insert(&entry.value, entry.is_reversed());
        }

        let tries: BTreeMap<String, SegmentTrie> = builders
            .into_iter()
            .map(|(category, builder)| (category, builder.build()))
            .collect();

        tracing::debug!(
            entries = source.segments.len(),
            categories = tries.len(),
            "compiled segment bank"
        );

        Ok(Self {
            metadata: source.metadata,
            entries: source.segments,
            tries,
        })
    }

    /// Compile a bank from bare entries
    pub fn from_entries(entries: Vec<SegmentEntry>) -> Result<Self> {
        Self::compile(DictionarySource {
            metadata: None,
            segments: entries,
        })
    }

    /// Trie compiled for `category`, if the category has entries
    pub fn get(&self, category: &str) -> Option<&SegmentTrie> {
        self.tries.get(category)
    }

    /// Compiled category names, sorted
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.tries.keys().map(String::as_str)
    }

    /// Source entries, including categories the engine does not use
    pub fn entries(&self) -> &[SegmentEntry] {
        &self.entries
    }

    /// Dictionary metadata, if the source carried any
    pub fn metadata(&self) -> Option<&DictionaryMetadata> {
        self.metadata.as_ref()
    }

    /// Entry and node counts for each category
    pub fn category_stats(&self) -> BTreeMap<&str, CategoryStats> {
        self.tries
            .iter()
            .map(|(name, trie)| {
                (
                    name.as_str(),
                    CategoryStats {
                        entries: trie.pattern_count(),
                        nodes: trie.len(),
                    },
                )
            })
            .collect()
    }

    /// Recover the source this bank was compiled from
    pub fn to_source(&self) -> DictionarySource {
        DictionarySource {
            metadata: self.metadata.clone(),
            segments: self.entries.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bank() -> SegmentBank {
        SegmentBank::from_entries(vec![
            SegmentEntry::new(category::INITIAL, "l'"),
            SegmentEntry::new(category::INITIAL, "jusqu'"),
            SegmentEntry::reversed(category::FINAL, "-t-il"),
            SegmentEntry::new("lemma", "aller"),
        ])
        .unwrap()
    }

    #[test]
    fn test_one_trie_per_category() {
        let bank = sample_bank();
        let categories: Vec<&str> = bank.categories().collect();
        assert_eq!(categories, vec!["final", "initial", "lemma"]);
        assert!(bank.get(category::COMPOUND).is_none());
    }

    #[test]
    fn test_reverse_flag_applies_per_entry() {
        let bank = sample_bank();
        let suffixes = bank.get(category::FINAL).unwrap();
        assert!(suffixes.contains("li-t-".chars()));
        let prefixes = bank.get(category::INITIAL).unwrap();
        assert!(prefixes.contains("jusqu'".chars()));
    }

    #[test]
    fn test_unknown_categories_are_preserved() {
        let bank = sample_bank();
        assert_eq!(bank.entries().len(), 4);
        assert!(bank.entries().iter().any(|e| e.category == "lemma"));
    }

    #[test]
    fn test_category_stats() {
        let bank = sample_bank();
        let stats = bank.category_stats();
        assert_eq!(stats["initial"].entries, 2);
        // root + l ' + j u s q u '
        assert_eq!(stats["initial"].nodes, 9);
    }

    #[test]
    fn test_compile_rejects_malformed_entry() {
        let result = SegmentBank::from_entries(vec![SegmentEntry::new("", "x")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_bank_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SegmentBank>();
    }
}
