//! filemux - small filesystem utilities for combining and renaming files
//!
//! filemux provides:
//! - `combine`: concatenate matching files from a directory into one output
//!   file with per-file metadata separators
//! - `rename`: bulk-change file extensions with numeric-suffix handling and
//!   collision avoidance

use anyhow::Result;
use clap::Parser;

mod cli;
mod combine;
mod core;
mod rename;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
