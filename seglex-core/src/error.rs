//! Dictionary bank errors

use thiserror::Error;

/// Errors raised while loading, validating or storing a dictionary bank.
///
/// Segmentation itself never fails: every character is valid input for the
/// tokenizer and the trie walks. Only the dictionary side can be malformed.
#[derive(Debug, Error)]
pub enum BankError {
    /// Dictionary file could not be read or written
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// Path of the dictionary file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Dictionary source is not valid TOML/JSON
    #[error("failed to parse {format} dictionary: {message}")]
    Parse {
        /// Source format name ("toml" or "json")
        format: &'static str,
        /// Parser message
        message: String,
    },

    /// A segment entry cannot be compiled
    #[error("invalid segment entry #{index}: {reason}")]
    InvalidEntry {
        /// Position of the entry in the source list
        index: usize,
        /// Why the entry was rejected
        reason: String,
    },

    /// Dictionary metadata is malformed
    #[error("invalid dictionary metadata: {0}")]
    InvalidMetadata(String),

    /// No embedded dictionary with this code
    #[error("unknown built-in dictionary: {0}")]
    UnknownDictionary(String),

    /// An embedded dictionary failed to compile
    #[error("embedded dictionary '{code}' is invalid: {reason}")]
    Embedded {
        /// Code the dictionary is embedded under
        code: String,
        /// Underlying load error
        reason: String,
    },

    /// File extension does not map to a known format
    #[error("unsupported dictionary format: {0}")]
    UnsupportedFormat(String),

    /// Dictionary could not be serialized back
    #[error("failed to serialize dictionary: {0}")]
    Serialize(String),
}

/// Result type for bank operations
pub type Result<T> = std::result::Result<T, BankError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_entry_display() {
        let error = BankError::InvalidEntry {
            index: 3,
            reason: "empty value".to_string(),
        };
        assert_eq!(error.to_string(), "invalid segment entry #3: empty value");
    }

    #[test]
    fn test_parse_error_display() {
        let error = BankError::Parse {
            format: "toml",
            message: "expected `=`".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "failed to parse toml dictionary: expected `=`"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;

        let error = BankError::Io {
            path: "missing.toml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(error.to_string().contains("missing.toml"));
        assert!(error.source().is_some());
    }
}
