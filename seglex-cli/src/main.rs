//! seglex command-line entry point

use clap::Parser;
use seglex_cli::commands::Commands;

/// Dictionary-driven word segmentation
#[derive(Debug, Parser)]
#[command(name = "seglex", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
