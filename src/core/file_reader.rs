//! Unified file reading strategy
//!
//! The combiner decodes every input the same way: files that look binary
//! are skipped, everything else is read as UTF-8 with invalid sequences
//! replaced rather than treated as fatal.

use std::fs;
use std::io;
use std::path::Path;

/// Number of leading bytes inspected for the binary sniff
const BINARY_SNIFF_LEN: usize = 8192;

/// Supported text encodings for the combined output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
}

impl Encoding {
    /// Canonical label written into the output header
    pub fn label(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
        }
    }
}

impl std::str::FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            other => Err(other.to_string()),
        }
    }
}

/// Outcome of reading one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Decoded text content (lossy where the input was not valid UTF-8)
    Text(String),
    /// File appears to be binary (NUL byte within the first 8 KiB)
    Binary,
}

/// Read a file under the combiner's decode policy
pub fn read_text(path: &Path) -> io::Result<ReadOutcome> {
    let bytes = fs::read(path)?;

    let check_len = std::cmp::min(BINARY_SNIFF_LEN, bytes.len());
    if bytes[..check_len].contains(&0) {
        return Ok(ReadOutcome::Binary);
    }

    Ok(ReadOutcome::Text(
        String::from_utf8_lossy(&bytes).into_owned(),
    ))
}
