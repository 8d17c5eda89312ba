pub mod completions;
pub mod convert;
pub mod inspect;

use clap::{Parser, Subcommand};

/// mortimer - Tile slab deduplicator
#[derive(Parser, Debug)]
#[command(name = "mortimer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a slab image into a tile map and atlas
    Convert(convert::ConvertArgs),

    /// Show the header and tile usage of a map file
    Inspect(inspect::InspectArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
