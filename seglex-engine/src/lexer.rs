//! Per-document segmentation pipeline and its builder

use crate::{
    config::{LexerConfig, LexerConfigBuilder},
    error::{EngineError, Result},
};
use seglex_core::{
    builtin_dictionary, tokenize, AffixSplitter, Annotation, AnnotationStore, CompoundMerger,
    Document, OverlapCleaner, SegmentBank, TextSpan, TypeId, TypeSystem,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Counts for one processed document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentReport {
    /// Whitespace tokens found
    pub tokens: usize,
    /// Word spans materialized after affix splitting
    pub words: usize,
    /// Compound spans materialized
    pub compounds: usize,
    /// Spans removed because another span contains them
    pub removed: usize,
    /// Wall time spent on the document
    pub elapsed: Duration,
}

impl DocumentReport {
    /// Spans left in the index for the lexer's type
    pub fn spans(&self) -> usize {
        (self.words + self.compounds).saturating_sub(self.removed)
    }
}

/// Totals accumulated by a lexer across documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerMetrics {
    /// Documents processed successfully
    pub documents: u64,
    /// Total processing time
    pub cumulative: Duration,
}

/// Dictionary-driven word segmenter
///
/// Holds one compiled bank shared by every document. Processing only needs
/// `&self`, so a lexer can be shared between threads.
#[derive(Debug)]
pub struct Lexer {
    bank: Arc<SegmentBank>,
    config: LexerConfig,
    types: Arc<TypeSystem>,
    documents: AtomicU64,
    cumulative_nanos: AtomicU64,
}

impl Lexer {
    /// Lexer over a compiled bank
    pub fn new(bank: Arc<SegmentBank>, config: LexerConfig) -> Result<Self> {
        config.validate()?;
        let types = Arc::new(TypeSystem::with_types([config.type_name.as_str()]));

        tracing::debug!(
            type_name = %config.type_name,
            categories = ?bank.categories().collect::<Vec<_>>(),
            "lexer ready"
        );

        Ok(Self {
            bank,
            config,
            types,
            documents: AtomicU64::new(0),
            cumulative_nanos: AtomicU64::new(0),
        })
    }

    /// Lexer over an embedded dictionary with the default configuration
    pub fn with_dictionary(code: &str) -> Result<Self> {
        Self::new(builtin_dictionary(code)?, LexerConfig::default())
    }

    /// Start building a lexer
    pub fn builder() -> LexerBuilder {
        LexerBuilder::new()
    }

    /// The configuration in use
    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// The compiled bank in use
    pub fn bank(&self) -> &SegmentBank {
        &self.bank
    }

    /// Type system holding the configured annotation type
    pub fn type_system(&self) -> Arc<TypeSystem> {
        Arc::clone(&self.types)
    }

    /// Fresh document whose type system knows the configured type
    pub fn document(&self, text: impl Into<String>) -> Document {
        Document::new(text, self.type_system())
    }

    /// Run every stage whose dictionary category is present.
    ///
    /// Word spans are created for the configured type; when a `compound`
    /// category exists, compounds are added and every contained span of the
    /// type is removed from the index.
    pub fn process<S: AnnotationStore + ?Sized>(&self, store: &mut S) -> Result<DocumentReport> {
        let start = Instant::now();
        let type_id = store
            .resolve_type(&self.config.type_name)
            .ok_or_else(|| EngineError::UnknownType {
                name: self.config.type_name.clone(),
            })?;

        let chars = store.chars().to_vec();
        let mut report = DocumentReport::default();

        let tokens = tokenize(&chars);
        report.tokens = tokens.len();

        let words = match AffixSplitter::from_bank(&self.bank) {
            Some(splitter) => splitter.split_tokens(&chars, &tokens),
            None => {
                tracing::trace!("no initial/final categories, affix stage skipped");
                tokens
            }
        };
        report.words = materialize(store, type_id, &words, chars.len());

        if let Some(merger) = CompoundMerger::from_bank(&self.bank) {
            let compounds = merger
                .flush_trailing(self.config.flush_trailing_compounds)
                .merge(&chars);
            report.compounds = materialize(store, type_id, &compounds, chars.len());
            report.removed = OverlapCleaner.clean(store, type_id);
        } else {
            tracing::trace!("no compound category, compound stage skipped");
        }

        report.elapsed = start.elapsed();
        self.record(report.elapsed);
        Ok(report)
    }

    /// Segment a text and return the resulting annotations in index order
    pub fn segment(&self, text: &str) -> Result<Vec<Annotation>> {
        let mut document = self.document(text);
        self.process(&mut document)?;
        Ok(document.annotations_named(&self.config.type_name))
    }

    /// Process independent documents, in parallel when the `parallel`
    /// feature is enabled. Results keep the order of `documents`.
    pub fn process_batch(&self, documents: &mut [Document]) -> Vec<Result<DocumentReport>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            documents
                .par_iter_mut()
                .map(|document| self.process(document))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            documents
                .iter_mut()
                .map(|document| self.process(document))
                .collect()
        }
    }

    /// Totals since the lexer was built
    pub fn metrics(&self) -> LexerMetrics {
        LexerMetrics {
            documents: self.documents.load(Ordering::Relaxed),
            cumulative: Duration::from_nanos(self.cumulative_nanos.load(Ordering::Relaxed)),
        }
    }

    fn record(&self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        let total = self
            .cumulative_nanos
            .fetch_add(nanos, Ordering::Relaxed)
            .saturating_add(nanos);
        self.documents.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(
            "Tokenized document in {}ms [Cumulated: {}ms]",
            elapsed.as_millis(),
            total / 1_000_000
        );
    }
}

/// Create and index spans, skipping void or out-of-range ones
fn materialize<S: AnnotationStore + ?Sized>(
    store: &mut S,
    type_id: TypeId,
    spans: &[TextSpan],
    len: usize,
) -> usize {
    let mut created = 0;
    for span in spans {
        if span.is_empty() || span.end > len {
            tracing::trace!(%span, "dropping void span");
            continue;
        }
        let handle = store.create_span(type_id, span.begin, span.end);
        store.add_to_index(handle);
        created += 1;
    }
    created
}

/// Where the builder takes its dictionary from
#[derive(Debug, Clone)]
enum DictionaryChoice {
    Builtin(String),
    File(PathBuf),
    Bank(Arc<SegmentBank>),
}

/// Builder for [`Lexer`]
///
/// Defaults to the embedded French dictionary.
#[derive(Debug)]
pub struct LexerBuilder {
    dictionary: DictionaryChoice,
    config_builder: LexerConfigBuilder,
}

impl Default for LexerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LexerBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            dictionary: DictionaryChoice::Builtin("fr".to_string()),
            config_builder: LexerConfigBuilder::new(),
        }
    }

    /// Use an embedded dictionary
    pub fn builtin_dictionary<S: Into<String>>(mut self, code: S) -> Self {
        self.dictionary = DictionaryChoice::Builtin(code.into());
        self
    }

    /// Load the dictionary from a TOML or JSON file
    pub fn dictionary_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.dictionary = DictionaryChoice::File(path.into());
        self
    }

    /// Use an already compiled bank
    pub fn bank(mut self, bank: Arc<SegmentBank>) -> Self {
        self.dictionary = DictionaryChoice::Bank(bank);
        self
    }

    /// Set the annotation type name
    pub fn type_name<S: Into<String>>(mut self, name: S) -> Self {
        self.config_builder = self.config_builder.type_name(name);
        self
    }

    /// Enable or disable the end-of-text compound flush
    pub fn flush_trailing_compounds(mut self, flush: bool) -> Self {
        self.config_builder = self.config_builder.flush_trailing_compounds(flush);
        self
    }

    /// Build the lexer
    pub fn build(self) -> Result<Lexer> {
        let config = self.config_builder.build()?;
        let bank = match self.dictionary {
            DictionaryChoice::Builtin(code) => builtin_dictionary(&code)?,
            DictionaryChoice::File(path) => Arc::new(SegmentBank::from_file(&path)?),
            DictionaryChoice::Bank(bank) => bank,
        };
        Lexer::new(bank, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seglex_core::{category, SegmentEntry};

    fn texts(annotations: &[Annotation]) -> Vec<&str> {
        annotations.iter().map(|a| a.covered_text.as_str()).collect()
    }

    #[test]
    fn test_segment_with_french_dictionary() {
        let lexer = Lexer::with_dictionary("fr").unwrap();
        let words = lexer.segment("Ce c'est-à-dire reste.").unwrap();
        assert_eq!(texts(&words), vec!["Ce", "c'est-à-dire", "reste", "."]);
    }

    #[test]
    fn test_report_counts() {
        let lexer = Lexer::with_dictionary("fr").unwrap();
        let mut document = lexer.document("Ce c'est-à-dire reste.");
        let report = lexer.process(&mut document).unwrap();

        assert_eq!(report.tokens, 3);
        // Ce, c', est-à-dire, reste, .
        assert_eq!(report.words, 5);
        assert_eq!(report.compounds, 1);
        assert_eq!(report.removed, 2);
        assert_eq!(report.spans(), 4);
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let lexer = Lexer::with_dictionary("fr").unwrap();
        let types = Arc::new(TypeSystem::with_types(["other.Type"]));
        let mut document = Document::new("texte", types);

        let err = lexer.process(&mut document).unwrap_err();
        assert!(matches!(err, EngineError::UnknownType { ref name } if name == crate::DEFAULT_TYPE));
        assert_eq!(document.indexed_len(), 0);
    }

    #[test]
    fn test_missing_categories_still_tokenize() {
        let bank = SegmentBank::from_entries(vec![SegmentEntry::new("lemma", "aller")]).unwrap();
        let lexer = Lexer::builder().bank(Arc::new(bank)).build().unwrap();

        let words = lexer.segment("L'ami  arrive.").unwrap();
        assert_eq!(texts(&words), vec!["L'ami", "arrive."]);
    }

    #[test]
    fn test_compound_only_bank() {
        let bank =
            SegmentBank::from_entries(vec![SegmentEntry::new(category::COMPOUND, "a priori")])
                .unwrap();
        let lexer = Lexer::builder().bank(Arc::new(bank)).build().unwrap();

        let words = lexer.segment("Il est a priori juste").unwrap();
        assert_eq!(texts(&words), vec!["Il", "est", "a priori", "juste"]);
    }

    #[test]
    fn test_metrics_accumulate() {
        let lexer = Lexer::with_dictionary("fr").unwrap();
        lexer.segment("Bonjour.").unwrap();
        lexer.segment("Au revoir.").unwrap();

        let metrics = lexer.metrics();
        assert_eq!(metrics.documents, 2);
    }

    #[test]
    fn test_builder_rejects_unknown_dictionary() {
        let result = Lexer::builder().builtin_dictionary("zz").build();
        assert!(matches!(result, Err(EngineError::Bank(_))));
    }

    #[test]
    fn test_lexer_is_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Lexer>();
    }
}
