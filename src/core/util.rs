//! Common utilities

use chrono::{DateTime, Local};
use std::path::Path;
use std::time::SystemTime;

/// Timestamp format used in the combined-output header and separator blocks
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Get file size in bytes
pub fn get_file_size(path: &Path) -> std::io::Result<u64> {
    let metadata = std::fs::metadata(path)?;
    Ok(metadata.len())
}

/// Get file creation time, falling back to modification time on filesystems
/// that do not expose a birth time.
pub fn get_created(path: &Path) -> std::io::Result<SystemTime> {
    let metadata = std::fs::metadata(path)?;
    metadata.created().or_else(|_| metadata.modified())
}

/// Format a system time as a local `YYYY-MM-DD HH:MM:SS` timestamp
pub fn format_timestamp(time: SystemTime) -> String {
    let local: DateTime<Local> = time.into();
    local.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local time, formatted for the output header
pub fn now_timestamp() -> String {
    format_timestamp(SystemTime::now())
}

/// Group a count with thousands separators (1234567 -> "1,234,567")
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_format_timestamp_shape() {
        let ts = format_timestamp(SystemTime::UNIX_EPOCH);
        // YYYY-MM-DD HH:MM:SS
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
    }

    #[test]
    fn test_get_file_size() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("a.txt");
        std::fs::write(&file, "hello").unwrap();
        assert_eq!(get_file_size(&file).unwrap(), 5);
    }

    #[test]
    fn test_get_created_is_ok_for_regular_file() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("a.txt");
        std::fs::write(&file, "hello").unwrap();
        assert!(get_created(&file).is_ok());
    }
}
