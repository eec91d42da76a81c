//! CLI argument definitions using clap.
//!
//! The generator takes no subcommands: it always reads the configured style
//! and project files and writes the taginfo project file.

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Print each layer, key and skipped row while scanning
    #[arg(short, long)]
    pub verbose: bool,
}
