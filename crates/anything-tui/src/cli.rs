//! CLI argument parsing for the `anything` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "anything")]
#[command(about = "Anything - search your files from the terminal", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging (logs to the temp dir as anything-tui.log)
    #[arg(short, long)]
    pub debug: bool,

    /// Use this launcher config file instead of the default one
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive launcher (default)
    Tui,

    /// One-shot search query, printed to stdout
    Query {
        /// Search query
        query: String,
    },

    /// Re-walk the configured roots and refresh the index cache
    Index,
}
