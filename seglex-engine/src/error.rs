//! Engine error types

use seglex_core::BankError;
use thiserror::Error;

/// Errors raised while building a lexer or processing a document
#[derive(Error, Debug)]
pub enum EngineError {
    /// Dictionary could not be loaded or compiled
    #[error("dictionary error: {0}")]
    Bank(#[from] BankError),

    /// The configured annotation type is not known to the document
    #[error("unknown annotation type '{name}'")]
    UnknownType {
        /// The configured type name
        name: String,
    },

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Encoding error (UTF-8, etc.)
    #[error("encoding error: {0}")]
    Encoding(String),
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::Io(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for EngineError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        EngineError::Encoding(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_error_converts() {
        let err: EngineError = BankError::UnknownDictionary("xx".to_string()).into();
        assert!(matches!(err, EngineError::Bank(_)));
        assert_eq!(
            err.to_string(),
            "dictionary error: unknown built-in dictionary: xx"
        );
    }

    #[test]
    fn test_unknown_type_message() {
        let err = EngineError::UnknownType {
            name: "seglex.Missing".to_string(),
        };
        assert_eq!(err.to_string(), "unknown annotation type 'seglex.Missing'");
    }

    #[test]
    fn test_utf8_error_converts() {
        let err: EngineError = String::from_utf8(vec![0xff, 0xfe]).unwrap_err().into();
        assert!(matches!(err, EngineError::Encoding(_)));
    }
}
