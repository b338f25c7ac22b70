//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::combine::{self, CombineError, CombineOptions, SortMode};
use crate::rename::{self, RenameOptions};

/// filemux - combine text files into one annotated output, or bulk-rename
/// files by extension.
#[derive(Parser, Debug)]
#[command(name = "filemux")]
#[command(
    author,
    version,
    about,
    long_about = r#"filemux bundles two small directory utilities behind one binary.

combine walks a directory, filters file names with a shell-style glob, and
writes every match into a single output file with a run header, a metadata
separator block per file, and a summary footer.

rename changes file extensions for the direct children of a folder, keeping
an embedded numeric suffix (name.log2 / name.log.2 -> name.2.txt) and
avoiding overwrites by appending _1, _2, ... to colliding targets.

Examples:
    filemux combine ./logs combined.txt --pattern "*.log"
    filemux combine ./notes all.txt --sort-by-name --recursive
    filemux rename ./logs log txt --dry-run
"#
)]
pub struct Cli {
    /// Disable colored output.
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. This is useful when piping to files or when your\n\
terminal does not support ANSI colors."
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Combine matching files from a directory into one output file.
    #[command(
        long_about = "Combine every file under SOURCE_DIR whose name matches --pattern into\n\
OUTPUT_FILE, in creation-date order (oldest first) unless --sort-by-name is given.\n\n\
The output records a header (run time, source directory, file count, sort mode,\n\
encoding), one 80-column separator block per file (name, relative path, size,\n\
line count, creation time), and a footer with totals.\n\n\
Files that look binary and files that cannot be read are skipped with a\n\
diagnostic and excluded from the totals.\n\n\
Exits 1 when the source directory is invalid, no files match, or the output\n\
file cannot be written.\n\n\
Examples:\n\
  filemux combine ./logs combined.txt\n\
  filemux combine ./logs combined.txt --pattern \"*.log\"\n\
  filemux combine ./docs all.txt --sort-by-name --recursive\n"
    )]
    Combine {
        /// Directory containing files to combine.
        #[arg(value_name = "SOURCE_DIR")]
        source_dir: PathBuf,

        /// Path of the combined output file.
        #[arg(value_name = "OUTPUT_FILE")]
        output_file: PathBuf,

        /// File pattern to match (e.g. "*.txt", "*.log").
        #[arg(
            long,
            default_value = "*",
            value_name = "GLOB",
            long_help = "Shell-style glob matched against file names (not paths).\n\n\
Examples: \"*.txt\", \"report-?.log\". Default: * (all files)."
        )]
        pattern: String,

        /// Sort files alphabetically instead of by creation date.
        #[arg(
            long,
            long_help = "Sort files lexicographically by name instead of the default\n\
creation-date order (oldest first)."
        )]
        sort_by_name: bool,

        /// Text encoding for the output (default: utf-8).
        #[arg(
            long,
            default_value = "utf-8",
            value_name = "NAME",
            long_help = "Text encoding label recorded in the output header.\n\n\
Only utf-8 is supported; any other label is rejected before the output\n\
file is created. Input files are decoded as UTF-8 with invalid byte\n\
sequences replaced."
        )]
        encoding: String,

        /// Include files from subdirectories.
        #[arg(
            long,
            long_help = "Descend into subdirectories. By default only the direct children of\n\
SOURCE_DIR are considered."
        )]
        recursive: bool,
    },

    /// Rename files in a folder from one extension to another.
    #[command(
        long_about = "Rename every direct child of FOLDER matching <base>.<OLD_EXT>,\n\
<base>.<OLD_EXT><digits>, or <base>.<OLD_EXT>.<digits> (extension compared\n\
case-insensitively) to <base>.<NEW_EXT> or <base>.<digits>.<NEW_EXT>.\n\n\
When the computed target already exists, _1, _2, ... is appended to its stem\n\
until a free name is found. Files are processed in sorted name order so the\n\
chosen suffixes are deterministic.\n\n\
Examples:\n\
  filemux rename ./logs log txt\n\
  filemux rename ./logs log txt --dry-run\n"
    )]
    Rename {
        /// Folder containing the files to rename.
        #[arg(value_name = "FOLDER")]
        folder: PathBuf,

        /// Current extension to match (e.g. log, bak).
        #[arg(value_name = "OLD_EXT")]
        old_ext: String,

        /// New extension to apply (e.g. txt, backup).
        #[arg(value_name = "NEW_EXT")]
        new_ext: String,

        /// Show what would be renamed without touching any file.
        #[arg(
            long,
            long_help = "Perform matching, planning, and collision resolution, print the\n\
intended renames, and leave the filesystem untouched."
        )]
        dry_run: bool,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Combine {
            source_dir,
            output_file,
            pattern,
            sort_by_name,
            encoding,
            recursive,
        } => run_combine(CombineOptions {
            source_dir,
            output_file,
            pattern,
            sort: if sort_by_name {
                SortMode::Name
            } else {
                SortMode::CreationTime
            },
            encoding,
            recursive,
        }),

        Commands::Rename {
            folder,
            old_ext,
            new_ext,
            dry_run,
        } => run_rename(RenameOptions {
            folder,
            old_ext,
            new_ext,
            dry_run,
        }),
    }
}

fn run_combine(opts: CombineOptions) -> Result<()> {
    match combine::combine_files(&opts) {
        Ok(summary) => {
            println!("{}", "-".repeat(60));
            println!(
                "{} Success! Combined {} file(s) with {} total lines",
                "✓".green(),
                summary.files_processed,
                summary.total_lines
            );
            println!("  Output saved to: {}", opts.output_file.display());
            Ok(())
        }
        Err(err) => {
            match &err {
                // Reads as an informational line, not an "Error:" prefix.
                CombineError::NoMatches { .. } => println!("{}", err),
                CombineError::OutputWrite { partial, .. } => {
                    println!("Error: {}", err);
                    println!(
                        "  Partial output: {} file(s), {} line(s) written before the failure",
                        partial.files_processed, partial.total_lines
                    );
                }
                _ => println!("Error: {}", err),
            }
            println!("{}", "-".repeat(60));
            println!("{} Failed to combine files", "✗".red());
            std::process::exit(1);
        }
    }
}

fn run_rename(opts: RenameOptions) -> Result<()> {
    match rename::rename_files(&opts) {
        Ok(count) => {
            let action = if opts.dry_run {
                "would be renamed"
            } else {
                "renamed"
            };
            if count > 0 {
                println!("\nTotal: {} file(s) {}", count, action);
            } else {
                println!(
                    "\nNo files matching '*.{}*' found in {}",
                    opts.old_ext.trim_start_matches('.'),
                    opts.folder.display()
                );
            }
            Ok(())
        }
        Err(err) => {
            println!("Error: {}", err);
            std::process::exit(1);
        }
    }
}
