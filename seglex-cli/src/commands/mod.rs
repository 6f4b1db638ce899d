//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use crate::error::CliError;
use seglex_core::{category, list_builtin_dictionaries};

pub mod generate_config;
pub mod process;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Segment text files into word spans
    Process(process::ProcessArgs),

    /// Load and compile a dictionary file, then report its categories
    Validate(validate::ValidateArgs),

    /// Write a dictionary template to start from
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// Dictionary categories the engine understands
    Categories,

    /// Available output formats
    Formats,

    /// Embedded dictionaries
    Dictionaries,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Process(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => {
                for line in subcommand.lines()? {
                    println!("{line}");
                }
                Ok(())
            }
        }
    }
}

impl ListCommands {
    /// Lines printed by the subcommand
    pub fn lines(&self) -> Result<Vec<String>> {
        Ok(match self {
            ListCommands::Categories => vec![
                format!("{:<14}prefixes stripped from the start of tokens", category::INITIAL),
                format!("{:<14}suffixes stripped from the end of tokens (usually reversed)", category::FINAL),
                format!("{:<14}expressions merged into a single span", category::COMPOUND),
                format!("{:<14}tokens never split", category::ABBREVIATION),
            ],
            ListCommands::Formats => vec![
                "text          one span per line: begin, end, text".to_string(),
                "json          array of files with their spans".to_string(),
                "markdown      numbered list per file".to_string(),
            ],
            ListCommands::Dictionaries => list_builtin_dictionaries()
                .map_err(|e| CliError::DictionaryError(e.to_string()))?
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
    }
}
