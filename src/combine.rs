//! Combine backend - concatenate matching files into one annotated output
//!
//! Walks a source directory (optionally recursive), filters file names with
//! a shell-style glob, orders the matches, and writes a single output file
//! with a run header, an 80-column separator block per input file, and a
//! summary footer.

use colored::Colorize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::SystemTime;
use thiserror::Error;
use walkdir::WalkDir;

use crate::core::file_reader::{read_text, Encoding, ReadOutcome};
use crate::core::paths::{absolutize, make_relative, normalize_path};
use crate::core::util::{
    format_timestamp, get_created, get_file_size, group_thousands, now_timestamp,
};

/// Width of the `=` rule lines framing each separator block
const RULE_WIDTH: usize = 80;

/// Sort order for the matched files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Creation time, oldest first (mtime where birth time is unavailable)
    #[default]
    CreationTime,
    /// Lexicographic by path
    Name,
}

impl SortMode {
    /// Label recorded in the output header and diagnostics
    pub fn label(&self) -> &'static str {
        match self {
            SortMode::CreationTime => "creation date",
            SortMode::Name => "name",
        }
    }
}

/// Options for the combine command
#[derive(Debug, Clone)]
pub struct CombineOptions {
    /// Directory containing the files to combine
    pub source_dir: PathBuf,
    /// Path of the combined output file
    pub output_file: PathBuf,
    /// Glob pattern matched against file names
    pub pattern: String,
    /// Sort order for the matched files
    pub sort: SortMode,
    /// Encoding label for the output (validated before any write)
    pub encoding: String,
    /// Descend into subdirectories
    pub recursive: bool,
}

/// Counters reported back to the caller and written into the footer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombineSummary {
    /// Files whose content made it into the output
    pub files_processed: usize,
    /// Total newline count across processed files
    pub total_lines: usize,
}

/// Failure kinds for a combine run; everything here is fatal for the run,
/// per-file problems are reported and skipped instead.
#[derive(Debug, Error)]
pub enum CombineError {
    #[error("Directory '{}' does not exist.", .0.display())]
    SourceMissing(PathBuf),

    #[error("'{}' is not a directory.", .0.display())]
    NotADirectory(PathBuf),

    #[error("Invalid file pattern '{pattern}': {source}")]
    BadPattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Unsupported encoding '{0}' (only utf-8 is supported).")]
    UnsupportedEncoding(String),

    #[error("No files matching '{pattern}' found in {}", .dir.display())]
    NoMatches { pattern: String, dir: PathBuf },

    #[error("Error writing output file: {source}")]
    OutputWrite {
        /// Counts accumulated before the write failed
        partial: CombineSummary,
        source: io::Error,
    },
}

/// One matched input file; built during the directory walk, dropped after
/// the output pass.
#[derive(Debug, Clone)]
struct FileEntry {
    path: PathBuf,
    size: u64,
    created: SystemTime,
}

/// Combine all matching files under `opts.source_dir` into one output file.
///
/// Returns the processed/line counters on success. Per-file read and decode
/// problems are printed and skipped; only invalid inputs, an empty match
/// set, or an output write failure abort the run.
pub fn combine_files(opts: &CombineOptions) -> Result<CombineSummary, CombineError> {
    if !opts.source_dir.exists() {
        return Err(CombineError::SourceMissing(opts.source_dir.clone()));
    }
    if !opts.source_dir.is_dir() {
        return Err(CombineError::NotADirectory(opts.source_dir.clone()));
    }

    let encoding: Encoding = opts
        .encoding
        .parse()
        .map_err(CombineError::UnsupportedEncoding)?;

    let files = list_files(opts)?;
    if files.is_empty() {
        return Err(CombineError::NoMatches {
            pattern: opts.pattern.clone(),
            dir: opts.source_dir.clone(),
        });
    }

    println!(
        "Found {} file(s) to combine (sorted by {})",
        files.len(),
        opts.sort.label()
    );
    println!("Output file: {}", normalize_path(&opts.output_file));
    println!("{}", "-".repeat(60));

    let mut summary = CombineSummary::default();
    if let Err(source) = write_output(opts, encoding, &files, &mut summary) {
        return Err(CombineError::OutputWrite {
            partial: summary,
            source,
        });
    }

    Ok(summary)
}

/// Enumerate, filter, and order the input files
fn list_files(opts: &CombineOptions) -> Result<Vec<FileEntry>, CombineError> {
    let pattern =
        glob::Pattern::new(&opts.pattern).map_err(|source| CombineError::BadPattern {
            pattern: opts.pattern.clone(),
            source,
        })?;

    // The output file may live inside the source directory; it must never
    // be combined into itself.
    let output_abs = absolutize(&opts.output_file);

    let max_depth = if opts.recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();

    for entry in WalkDir::new(&opts.source_dir)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                println!("{} Skipped: {}", "✗".red(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if !pattern.matches(&name) {
            continue;
        }

        let path = entry.into_path();
        if absolutize(&path) == output_abs {
            continue;
        }

        let size = match get_file_size(&path) {
            Ok(s) => s,
            Err(e) => {
                println!("{} Error reading {}: {}", "✗".red(), name, e);
                continue;
            }
        };
        let created = get_created(&path).unwrap_or(SystemTime::UNIX_EPOCH);

        files.push(FileEntry { path, size, created });
    }

    match opts.sort {
        SortMode::CreationTime => {
            // Tie-break on path so the order stays total and reproducible.
            files.sort_by(|a, b| (a.created, &a.path).cmp(&(b.created, &b.path)));
        }
        SortMode::Name => files.sort_by(|a, b| a.path.cmp(&b.path)),
    }

    Ok(files)
}

/// Write header, per-file blocks, and footer; `summary` is updated as files
/// land so partial counts survive a write failure.
fn write_output(
    opts: &CombineOptions,
    encoding: Encoding,
    files: &[FileEntry],
    summary: &mut CombineSummary,
) -> io::Result<()> {
    let out = File::create(&opts.output_file)?;
    let mut out = BufWriter::new(out);
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out, "Combined file created: {}", now_timestamp())?;
    writeln!(
        out,
        "Source directory: {}",
        normalize_path(&absolutize(&opts.source_dir))
    )?;
    writeln!(out, "Total files: {}", files.len())?;
    writeln!(out, "Sorted by: {}", opts.sort.label())?;
    writeln!(out, "Encoding: {}", encoding.label())?;
    writeln!(out, "{}", rule)?;
    writeln!(out)?;

    for entry in files {
        let name = entry
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let content = match read_text(&entry.path) {
            Ok(ReadOutcome::Text(content)) => content,
            Ok(ReadOutcome::Binary) => {
                println!(
                    "{} Skipped: {} (encoding error - might be binary)",
                    "✗".red(),
                    name
                );
                continue;
            }
            Err(e) => {
                println!("{} Error reading {}: {}", "✗".red(), name, e);
                continue;
            }
        };

        let lines = content.matches('\n').count();
        let relative =
            make_relative(&entry.path, &opts.source_dir).unwrap_or_else(|| name.clone());

        writeln!(out, "\n{}", rule)?;
        writeln!(out, "FILE: {}", name)?;
        writeln!(out, "Path: {}", relative)?;
        writeln!(out, "Size: {} bytes", group_thousands(entry.size))?;
        writeln!(out, "Lines: {}", group_thousands(lines as u64))?;
        writeln!(out, "Created: {}", format_timestamp(entry.created))?;
        writeln!(out, "{}", rule)?;
        writeln!(out)?;

        out.write_all(content.as_bytes())?;
        if !content.is_empty() && !content.ends_with('\n') {
            writeln!(out)?;
        }

        summary.files_processed += 1;
        summary.total_lines += lines;

        println!("{} Processed: {} ({} lines)", "✓".green(), name, lines);
    }

    writeln!(out, "\n{}", rule)?;
    writeln!(out, "End of combined file")?;
    writeln!(out, "Files processed: {}", summary.files_processed)?;
    writeln!(out, "Total lines: {}", summary.total_lines)?;
    writeln!(out, "{}", rule)?;
    out.flush()?;

    Ok(())
}
