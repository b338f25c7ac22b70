//! Path normalization utilities
//!
//! Ensures displayed paths use '/' as separator and that path comparisons
//! happen on absolute, symlink-resolved forms.

use std::path::{Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Resolve a path to an absolute form, tolerating targets that do not exist
/// yet (the combiner's output file is compared before it is created).
pub fn absolutize(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }

    // Not on disk yet: resolve the parent and re-attach the file name.
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let (Some(parent), Some(name)) = (parent, path.file_name()) {
        if let Ok(resolved) = parent.canonicalize() {
            return resolved.join(name);
        }
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
