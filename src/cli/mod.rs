pub mod commands;
pub mod explore;

use clap::Parser;

pub use commands::Commands;

/// flowview — Flow scanner result viewer
///
/// Decodes a flow scanner report attachment and shows it as a searchable
/// table, a YAML dump, or raw text.
#[derive(Parser, Debug)]
#[command(
    name = "flowview",
    version,
    about = "flowview — Flow scanner result viewer",
    long_about = "flowview reads the flow scanner report attached to a record (a directory holding\nan output.json attachment) or a payload file, decodes it, and shows the violations\nas a searchable table. Reports that are not violation lists are shown as raw text."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}
