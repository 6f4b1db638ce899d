//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Dictionary code written to the metadata table
    #[arg(short = 'c', long, value_name = "CODE", default_value = "custom")]
    pub code: String,

    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        println!("Generating dictionary template...");
        println!("  Code: {}", self.code);
        println!("  Output file: {}", self.output.display());

        std::fs::write(&self.output, self.generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Dictionary template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the entries for your language");
        println!("2. Validate the dictionary:");
        println!("   seglex validate --dictionary {}", self.output.display());
        println!("3. Use it for processing:");
        println!(
            "   seglex process -i input.txt --dictionary {}",
            self.output.display()
        );

        Ok(())
    }

    /// Template dictionary content
    fn generate_template(&self) -> String {
        format!(
            r#"# Segmentation dictionary for {code}
#
# Every [[segment]] entry has a category and a value. Matching ignores case.
# `reverse = true` stores the value backwards, which is what suffix
# categories need since they are matched from the end of a token.

[metadata]
code = "{code}"
name = "Custom dictionary"

# Prefixes stripped from the start of tokens: l'ami -> l' + ami
[[segment]]
category = "initial"
value = "l'"

[[segment]]
category = "initial"
value = "("

# Suffixes stripped from the end of tokens: fini. -> fini + .
[[segment]]
category = "final"
value = "."
reverse = true

[[segment]]
category = "final"
value = ")"
reverse = true

# Expressions kept as one span, even across spaces or hyphens
[[segment]]
category = "compound"
value = "c'est-à-dire"

# Tokens never split (optional); A.B.-style abbreviations are always kept
[[segment]]
category = "abbreviation"
value = "etc."
"#,
            code = self.code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seglex_core::{category, SegmentBank};
    use tempfile::TempDir;

    #[test]
    fn test_template_compiles() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("custom.toml");
        let args = GenerateConfigArgs {
            code: "xx".to_string(),
            output: output.clone(),
        };

        args.execute().unwrap();

        let bank = SegmentBank::from_file(&output).unwrap();
        assert_eq!(bank.metadata().unwrap().code, "xx");
        for name in [
            category::INITIAL,
            category::FINAL,
            category::COMPOUND,
            category::ABBREVIATION,
        ] {
            assert!(bank.get(name).is_some(), "template lacks {name}");
        }
    }

    #[test]
    fn test_unwritable_output() {
        let args = GenerateConfigArgs {
            code: "xx".to_string(),
            output: PathBuf::from("/nonexistent/dir/custom.toml"),
        };
        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
    }
}
