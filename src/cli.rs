// src/cli.rs

use clap::Parser;

use crate::modes::Mode;
use crate::output::OutputMode;

/// Python documentation parser.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Parser mode
    #[arg(value_enum)]
    pub mode: Mode,

    /// Clear the HTTP response cache before running
    #[arg(short, long)]
    pub clear_cache: bool,

    /// Additional output destination
    #[arg(short, long, value_enum)]
    pub output: Option<OutputMode>,
}
