//! On-disk dictionary schema

use crate::error::{BankError, Result};
use serde::{Deserialize, Serialize};

/// A complete dictionary source as stored in TOML or JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DictionarySource {
    /// Optional identification of the dictionary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DictionaryMetadata>,
    /// Flat list of segment entries
    #[serde(default, rename = "segment")]
    pub segments: Vec<SegmentEntry>,
}

/// Dictionary identification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryMetadata {
    /// Short code, e.g. "fr"
    pub code: String,
    /// Human readable name
    pub name: String,
}

/// One `(category, pattern, direction)` dictionary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentEntry {
    /// Category the entry is compiled into
    pub category: String,
    /// The pattern itself
    pub value: String,
    /// Insert the pattern reversed (suffix dictionaries)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
}

impl SegmentEntry {
    /// Create an entry inserted as-is
    pub fn new(category: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            value: value.into(),
            reverse: None,
        }
    }

    /// Create an entry inserted reversed
    pub fn reversed(category: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            value: value.into(),
            reverse: Some(true),
        }
    }

    /// Absent and `false` both mean forward insertion
    pub fn is_reversed(&self) -> bool {
        self.reverse.unwrap_or(false)
    }
}

impl DictionarySource {
    /// Check every entry before compilation
    pub fn validate(&self) -> Result<()> {
        if let Some(metadata) = &self.metadata {
            if metadata.code.trim().is_empty() {
                return Err(BankError::InvalidMetadata(
                    "metadata.code must not be empty".to_string(),
                ));
            }
        }

        for (index, entry) in self.segments.iter().enumerate() {
            if entry.category.trim().is_empty() {
                return Err(BankError::InvalidEntry {
                    index,
                    reason: "category must not be empty".to_string(),
                });
            }
            if entry.value.is_empty() {
                return Err(BankError::InvalidEntry {
                    index,
                    reason: format!("empty value in category '{}'", entry.category),
                });
            }
        }

        Ok(())
    }
}
