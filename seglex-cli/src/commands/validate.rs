//! Validate command implementation

use crate::error::CliError;
use anyhow::Result;
use clap::Args;
use seglex_core::SegmentBank;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Dictionary file to validate (.toml or .json)
    #[arg(short = 'D', long, value_name = "FILE", required = true)]
    pub dictionary: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating dictionary: {}", self.dictionary.display());

        match SegmentBank::from_file(&self.dictionary) {
            Ok(bank) => {
                println!("✓ Dictionary is valid!");
                if let Some(metadata) = bank.metadata() {
                    println!("  Code: {}", metadata.code);
                    println!("  Name: {}", metadata.name);
                }
                println!("  Entries: {}", bank.entries().len());
                for (name, stats) in bank.category_stats() {
                    println!(
                        "  {name}: {} entries, {} trie nodes",
                        stats.entries, stats.nodes
                    );
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Dictionary is invalid!");
                println!("  Error: {e}");
                Err(CliError::DictionaryError(e.to_string()).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_valid_dictionary() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dict.toml");
        fs::write(
            &path,
            "[metadata]\ncode = \"xx\"\nname = \"Test\"\n\n[[segment]]\ncategory = \"initial\"\nvalue = \"l'\"\n",
        )
        .unwrap();

        let args = ValidateArgs { dictionary: path };
        assert!(args.execute().is_ok());
    }

    #[test]
    fn test_validate_empty_value() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dict.json");
        fs::write(&path, r#"{"segment": [{"category": "final", "value": ""}]}"#).unwrap();

        let args = ValidateArgs { dictionary: path };
        let err = args.execute().unwrap_err();
        assert!(err.to_string().starts_with("Dictionary error:"));
    }
}
