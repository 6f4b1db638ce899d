//! Lexer configuration

use crate::error::{EngineError, Result};

/// Annotation type used when none is configured
pub const DEFAULT_TYPE: &str = "seglex.types.WordAnnotation";

/// Runtime options of a [`Lexer`](crate::Lexer)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerConfig {
    /// Name of the annotation type the lexer creates and cleans
    pub type_name: String,
    /// Fire compound matches still pending at end of text
    pub flush_trailing_compounds: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            type_name: DEFAULT_TYPE.to_string(),
            flush_trailing_compounds: true,
        }
    }
}

impl LexerConfig {
    /// Configuration targeting `type_name`
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    /// Check the configuration before a lexer is built
    pub fn validate(&self) -> Result<()> {
        if self.type_name.trim().is_empty() {
            return Err(EngineError::Config(
                "annotation type name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`LexerConfig`]
#[derive(Debug, Default)]
pub struct LexerConfigBuilder {
    config: LexerConfig,
}

impl LexerConfigBuilder {
    /// Start from the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the annotation type name
    pub fn type_name<S: Into<String>>(mut self, name: S) -> Self {
        self.config.type_name = name.into();
        self
    }

    /// Enable or disable the end-of-text compound flush
    pub fn flush_trailing_compounds(mut self, flush: bool) -> Self {
        self.config.flush_trailing_compounds = flush;
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<LexerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LexerConfig::default();
        assert_eq!(config.type_name, DEFAULT_TYPE);
        assert!(config.flush_trailing_compounds);
    }

    #[test]
    fn test_builder() {
        let config = LexerConfigBuilder::new()
            .type_name("my.Token")
            .flush_trailing_compounds(false)
            .build()
            .unwrap();
        assert_eq!(config, LexerConfig {
            type_name: "my.Token".to_string(),
            flush_trailing_compounds: false,
        });
    }

    #[test]
    fn test_empty_type_name_rejected() {
        let result = LexerConfigBuilder::new().type_name("  ").build();
        assert!(matches!(result, Err(EngineError::Config(_))));
    }
}
