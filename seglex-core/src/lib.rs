//! Dictionary-driven word segmentation
//!
//! This crate holds the pure parts of the segmenter: the character trie,
//! the dictionary bank that compiles entries into one trie per category,
//! the whitespace tokenizer, the affix splitter, the compound merger and the
//! containment cleanup. It also provides the annotation store contract and
//! an in-memory [`Document`] implementing it.
//!
//! # Pipeline
//!
//! 1. [`tokenize`] cuts the text on whitespace.
//! 2. [`AffixSplitter`] strips known prefixes (`initial`) and suffixes
//!    (`final`) from each token.
//! 3. [`CompoundMerger`] scans the whole text for `compound` entries.
//! 4. [`OverlapCleaner`] drops spans contained in another span.
//!
//! The engine crate runs these stages over an [`AnnotationStore`].
//!
//! # Example
//!
//! ```rust
//! use seglex_core::{builtin_dictionary, tokenize, AffixSplitter};
//!
//! let bank = builtin_dictionary("fr").unwrap();
//! let splitter = AffixSplitter::from_bank(&bank).unwrap();
//!
//! let chars: Vec<char> = "Fermé jusqu'à demain.".chars().collect();
//! let tokens = tokenize(&chars);
//! let words: Vec<String> = splitter
//!     .split_tokens(&chars, &tokens)
//!     .iter()
//!     .map(|span| span.text(&chars))
//!     .collect();
//!
//! assert_eq!(words, vec!["Fermé", "jusqu'", "à", "demain", "."]);
//! ```

pub mod abbreviation;
pub mod affix;
pub mod bank;
pub mod cleaner;
pub mod compound;
pub mod error;
pub mod span;
pub mod store;
pub mod tokenizer;
pub mod trie;

pub use abbreviation::{is_abbreviation, AbbreviationGuard};
pub use affix::{AffixSplitter, TokenSplit};
pub use bank::{
    builtin_dictionary, category, list_builtin_dictionaries, CategoryStats, DictionaryFormat,
    DictionaryMetadata, DictionarySource, SegmentBank, SegmentEntry,
};
pub use cleaner::{contained_indices, remove_contained, OverlapCleaner};
pub use compound::{CompoundMerger, PendingMatch};
pub use error::{BankError, Result};
pub use span::TextSpan;
pub use store::{Annotation, AnnotationStore, Document, SpanHandle, TypeId, TypeSystem};
pub use tokenizer::{is_separator, tokenize};
pub use trie::{fold, NodeId, SegmentTrie, SegmentTrieBuilder};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_compose_on_plain_spans() {
        let bank = builtin_dictionary("fr").unwrap();
        let splitter = AffixSplitter::from_bank(&bank).unwrap();
        let merger = CompoundMerger::from_bank(&bank).unwrap();

        let chars: Vec<char> = "Ce c'est-à-dire reste.".chars().collect();
        let mut spans = splitter.split_tokens(&chars, &tokenize(&chars));
        spans.extend(merger.merge(&chars));

        let spans = remove_contained(spans);
        let words: Vec<String> = spans.iter().map(|s| s.text(&chars)).collect();
        assert_eq!(words, vec!["Ce", "c'est-à-dire", "reste", "."]);
    }
}
