pub mod check;
pub mod completions;
pub mod info;

use clap::{Parser, Subcommand};

/// tmx - Inspect and check TMX/TSX tile-map documents
#[derive(Parser, Debug)]
#[command(name = "tmx")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show debug logging (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load maps and print a summary
    Info(info::InfoArgs),

    /// Load every map and tileset under the given paths
    Check(check::CheckArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
