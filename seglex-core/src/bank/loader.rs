use super::{DictionarySource, SegmentBank};
use crate::error::{BankError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

type EmbeddedBanks = HashMap<&'static str, Arc<SegmentBank>>;

// Compile failures are kept as (code, message): `BankError` is not `Clone`
static BUILTIN_BANKS: OnceLock<std::result::Result<EmbeddedBanks, (&'static str, String)>> =
    OnceLock::new();

macro_rules! embed_dictionary {
    ($code:expr, $path:expr) => {
        ($code, include_str!($path))
    };
}

/// Serialization format of a dictionary source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryFormat {
    /// TOML with `[[segment]]` tables
    Toml,
    /// JSON object with a `segment` array
    Json,
}

impl DictionaryFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) => Err(BankError::UnsupportedFormat(ext.to_string())),
            None => Err(BankError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }
}

impl DictionarySource {
    /// Parse a dictionary source from a string
    pub fn parse(content: &str, format: DictionaryFormat) -> Result<Self> {
        match format {
            DictionaryFormat::Toml => toml::from_str(content).map_err(|e| BankError::Parse {
                format: format.name(),
                message: e.to_string(),
            }),
            DictionaryFormat::Json => serde_json::from_str(content).map_err(|e| BankError::Parse {
                format: format.name(),
                message: e.to_string(),
            }),
        }
    }

    /// Serialize the source back to a string
    pub fn render(&self, format: DictionaryFormat) -> Result<String> {
        match format {
            DictionaryFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| BankError::Serialize(e.to_string()))
            }
            DictionaryFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|e| BankError::Serialize(e.to_string()))
            }
        }
    }
}

impl SegmentBank {
    /// Load and compile a dictionary file, format chosen by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let format = DictionaryFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| BankError::Io {
            path: path.display().to_string(),
            source,
        })?;

        tracing::debug!(path = %path.display(), format = format.name(), "loading dictionary");
        Self::from_str_with_format(&content, format)
    }

    /// Parse and compile a dictionary held in memory
    pub fn from_str_with_format(content: &str, format: DictionaryFormat) -> Result<Self> {
        Self::compile(DictionarySource::parse(content, format)?)
    }

    /// Write the source entries back to `path`, format chosen by extension
    pub fn store(&self, path: &Path) -> Result<()> {
        let format = DictionaryFormat::from_path(path)?;
        let rendered = self.to_source().render(format)?;
        std::fs::write(path, rendered).map_err(|source| BankError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

fn compile_embedded(code: &str, content: &str) -> Result<SegmentBank> {
    let bank = SegmentBank::from_str_with_format(content, DictionaryFormat::Toml)?;
    match bank.metadata() {
        Some(metadata) if metadata.code == code => Ok(bank),
        Some(metadata) => Err(BankError::InvalidMetadata(format!(
            "code mismatch: expected '{code}', found '{}'",
            metadata.code
        ))),
        None => Err(BankError::InvalidMetadata(format!(
            "missing [metadata] for '{code}'"
        ))),
    }
}

fn load_embedded_banks() -> std::result::Result<EmbeddedBanks, (&'static str, String)> {
    let embedded = [embed_dictionary!("fr", "../../dictionaries/french.toml")];

    let mut banks = HashMap::new();
    for (code, content) in embedded {
        let bank = compile_embedded(code, content).map_err(|e| {
            tracing::error!(code, error = %e, "embedded dictionary failed to compile");
            (code, e.to_string())
        })?;
        banks.insert(code, Arc::new(bank));
    }
    Ok(banks)
}

fn embedded_banks() -> Result<&'static EmbeddedBanks> {
    BUILTIN_BANKS
        .get_or_init(load_embedded_banks)
        .as_ref()
        .map_err(|(code, reason)| BankError::Embedded {
            code: code.to_string(),
            reason: reason.clone(),
        })
}

/// Shared handle to an embedded dictionary
pub fn builtin_dictionary(code: &str) -> Result<Arc<SegmentBank>> {
    embedded_banks()?
        .get(code)
        .cloned()
        .ok_or_else(|| BankError::UnknownDictionary(code.to_string()))
}

/// Codes of all embedded dictionaries, sorted
pub fn list_builtin_dictionaries() -> Result<Vec<&'static str>> {
    let mut codes: Vec<&'static str> = embedded_banks()?.keys().copied().collect();
    codes.sort_unstable();
    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::category;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_french_dictionary() {
        let bank = builtin_dictionary("fr").expect("French dictionary should exist");
        assert_eq!(bank.metadata().unwrap().code, "fr");
        assert!(bank.get(category::INITIAL).is_some());
        assert!(bank.get(category::FINAL).is_some());
        assert!(bank.get(category::COMPOUND).is_some());
        assert!(bank.get(category::ABBREVIATION).is_none());
    }

    #[test]
    fn test_builtin_is_cached() {
        let first = builtin_dictionary("fr").unwrap();
        let second = builtin_dictionary("fr").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_unknown_builtin() {
        match builtin_dictionary("xx") {
            Err(BankError::UnknownDictionary(code)) => assert_eq!(code, "xx"),
            other => panic!("Expected UnknownDictionary, got {other:?}"),
        }
    }

    #[test]
    fn test_list_builtin_dictionaries() {
        assert_eq!(list_builtin_dictionaries().unwrap(), vec!["fr"]);
    }

    #[test]
    fn test_embedded_code_must_match_metadata() {
        let content = "[metadata]\ncode = \"de\"\nname = \"German\"\n";
        match compile_embedded("fr", content) {
            Err(BankError::InvalidMetadata(reason)) => {
                assert!(reason.contains("expected 'fr'"));
                assert!(reason.contains("found 'de'"));
            }
            other => panic!("Expected InvalidMetadata, got {other:?}"),
        }
    }

    #[test]
    fn test_embedded_parse_error_is_kept() {
        let err = compile_embedded("fr", "[[segment]\n").unwrap_err();
        assert!(matches!(err, BankError::Parse { format: "toml", .. }));
        assert!(compile_embedded("fr", "").is_err());
    }

    #[test]
    fn test_embedded_french_source_compiles() {
        let content = include_str!("../../dictionaries/french.toml");
        assert!(compile_embedded("fr", content).is_ok());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DictionaryFormat::from_path(Path::new("bank.TOML")).unwrap(),
            DictionaryFormat::Toml
        );
        assert_eq!(
            DictionaryFormat::from_path(Path::new("bank.json")).unwrap(),
            DictionaryFormat::Json
        );
        assert!(matches!(
            DictionaryFormat::from_path(Path::new("bank.xml")),
            Err(BankError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_json_file() {
        let mut file: NamedTempFile = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .unwrap();
        write!(
            file,
            r#"{{"segment": [{{"category": "final", "value": ".", "reverse": true}}]}}"#
        )
        .unwrap();

        let bank = SegmentBank::from_file(file.path()).unwrap();
        assert!(bank.get(category::FINAL).unwrap().contains(".".chars()));
        assert!(bank.metadata().is_none());
    }

    #[test]
    fn test_store_then_load_preserves_entries() {
        let bank = builtin_dictionary("fr").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("copy.toml");

        bank.store(&path).unwrap();
        let reloaded = SegmentBank::from_file(&path).unwrap();
        assert_eq!(reloaded.entries(), bank.entries());
        assert_eq!(reloaded.category_stats(), bank.category_stats());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = SegmentBank::from_file(Path::new("/nonexistent/bank.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bank.toml"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = SegmentBank::from_str_with_format("[[segment]\n", DictionaryFormat::Toml);
        assert!(matches!(result, Err(BankError::Parse { format: "toml", .. })));
    }
}
