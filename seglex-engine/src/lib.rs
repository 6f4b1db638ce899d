//! Segmentation pipeline for seglex
//!
//! A [`Lexer`] runs the core stages over any
//! [`AnnotationStore`](seglex_core::AnnotationStore): whitespace
//! tokenization, affix splitting, compound merging and containment cleanup.
//! Stages whose dictionary category is missing are skipped.
//!
//! ```rust
//! use seglex_engine::Lexer;
//!
//! let lexer = Lexer::builder()
//!     .builtin_dictionary("fr")
//!     .type_name("demo.Word")
//!     .build()
//!     .unwrap();
//!
//! let words = lexer.segment("Tout (va-t-il) bien?").unwrap();
//! let texts: Vec<&str> = words.iter().map(|w| w.covered_text.as_str()).collect();
//! assert_eq!(texts, vec!["Tout", "(", "va", "-t-il", ")", "bien", "?"]);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod lexer;

pub use config::{LexerConfig, LexerConfigBuilder, DEFAULT_TYPE};
pub use error::{EngineError, Result};
pub use lexer::{DocumentReport, Lexer, LexerBuilder, LexerMetrics};

// Re-export from core for convenience
pub use seglex_core::{
    Annotation, AnnotationStore, Document, SegmentBank, SegmentEntry, TextSpan, TypeSystem,
};
