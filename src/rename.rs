//! Rename backend - bulk extension changes with numeric-suffix handling
//!
//! Matches direct children of a folder against `<base>.<old>`,
//! `<base>.<old><digits>`, or `<base>.<old>.<digits>` (extension compared
//! case-insensitively) and renames them to `<base>.<new>` or
//! `<base>.<digits>.<new>`. Existing targets get a `_<n>` stem suffix.

use colored::Colorize;
use regex::RegexBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::core::paths::normalize_path;

/// Options for the rename command
#[derive(Debug, Clone)]
pub struct RenameOptions {
    /// Folder whose direct children are candidates
    pub folder: PathBuf,
    /// Extension token to match (leading dots ignored)
    pub old_ext: String,
    /// Extension token to apply (leading dots ignored)
    pub new_ext: String,
    /// Plan and report without touching the filesystem
    pub dry_run: bool,
}

/// Failure kinds that abort a rename run before any file is touched
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("Folder '{}' does not exist.", .0.display())]
    FolderMissing(PathBuf),

    #[error("'{}' is not a directory.", .0.display())]
    NotADirectory(PathBuf),

    #[error("Extension token '{0}' is empty after stripping dots.")]
    EmptyExtension(String),
}

/// One planned rename; built per matched file and applied (or printed)
/// immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RenamePlan {
    source: PathBuf,
    target: PathBuf,
    dry_run: bool,
}

/// Rename every matching direct child of `opts.folder`.
///
/// Returns the number of files renamed, or that would be renamed under
/// `--dry-run`. Per-file rename failures are printed and skipped; the rest
/// of the batch continues.
pub fn rename_files(opts: &RenameOptions) -> Result<usize, RenameError> {
    if !opts.folder.exists() {
        return Err(RenameError::FolderMissing(opts.folder.clone()));
    }
    if !opts.folder.is_dir() {
        return Err(RenameError::NotADirectory(opts.folder.clone()));
    }

    let old_ext = strip_dots(&opts.old_ext)?;
    let new_ext = strip_dots(&opts.new_ext)?;

    // Matches: name.log / name.log2 / name.log.2
    // Captures the base name and the optional number.
    let pattern = RegexBuilder::new(&format!(
        r"^(.+)\.{}(?:\.?(\d+))?$",
        regex::escape(old_ext)
    ))
    .case_insensitive(true)
    .build()
    .expect("escaped extension pattern is always valid");

    let mut renamed_count = 0;

    // Sorted filename order keeps collision suffixes deterministic.
    for entry in WalkDir::new(&opts.folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let captures = match pattern.captures(&name) {
            Some(c) => c,
            None => continue,
        };

        let base_name = &captures[1];
        let number = captures.get(2).map(|m| m.as_str());

        let new_name = match number {
            Some(n) => format!("{}.{}.{}", base_name, n, new_ext),
            None => format!("{}.{}", base_name, new_ext),
        };

        let target = resolve_collision(&opts.folder, &new_name);
        let plan = RenamePlan {
            source: entry.into_path(),
            target,
            dry_run: opts.dry_run,
        };

        if apply_plan(&plan) {
            renamed_count += 1;
        }
    }

    Ok(renamed_count)
}

/// Strip leading dots from an extension token ("  .log" style input)
fn strip_dots(token: &str) -> Result<&str, RenameError> {
    let stripped = token.trim_start_matches('.');
    if stripped.is_empty() {
        return Err(RenameError::EmptyExtension(token.to_string()));
    }
    Ok(stripped)
}

/// Probe the live filesystem for a free target name, appending `_<n>` to
/// the stem until one is found.
fn resolve_collision(folder: &Path, new_name: &str) -> PathBuf {
    let target = folder.join(new_name);
    if !target.exists() {
        return target;
    }

    let stem = target
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = target
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut i = 1;
    loop {
        let candidate = folder.join(format!("{}_{}{}", stem, i, suffix));
        if !candidate.exists() {
            return candidate;
        }
        i += 1;
    }
}

/// Print the plan and apply it unless dry-run; returns whether it counts
fn apply_plan(plan: &RenamePlan) -> bool {
    let source_name = plan
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| normalize_path(&plan.source));
    let target_name = plan
        .target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| normalize_path(&plan.target));

    if plan.dry_run {
        println!(
            "{}Renaming: {} -> {}",
            "[DRY RUN] ".yellow(),
            source_name,
            target_name
        );
        return true;
    }

    println!("Renaming: {} -> {}", source_name, target_name);
    match fs::rename(&plan.source, &plan.target) {
        Ok(()) => true,
        Err(e) => {
            println!("  {} renaming {}: {}", "Error".red(), source_name, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn opts(folder: &Path, old_ext: &str, new_ext: &str) -> RenameOptions {
        RenameOptions {
            folder: folder.to_path_buf(),
            old_ext: old_ext.to_string(),
            new_ext: new_ext.to_string(),
            dry_run: false,
        }
    }

    fn touch(path: &Path) {
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_plain_extension_rename() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("report.log"));

        let count = rename_files(&opts(temp.path(), "log", "txt")).unwrap();
        assert_eq!(count, 1);
        assert!(temp.path().join("report.txt").exists());
        assert!(!temp.path().join("report.log").exists());
    }

    #[test]
    fn test_glued_numeric_suffix_moves_before_extension() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("report.log2"));

        rename_files(&opts(temp.path(), "log", "txt")).unwrap();
        assert!(temp.path().join("report.2.txt").exists());
    }

    #[test]
    fn test_dotted_numeric_suffix_moves_before_extension() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("report.log.2"));

        rename_files(&opts(temp.path(), "log", "txt")).unwrap();
        assert!(temp.path().join("report.2.txt").exists());
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("report.LOG"));

        let count = rename_files(&opts(temp.path(), "log", "txt")).unwrap();
        assert_eq!(count, 1);
        assert!(temp.path().join("report.txt").exists());
    }

    #[test]
    fn test_trailing_characters_do_not_match() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("report.logs"));
        touch(&temp.path().join("report.log.bak"));

        let count = rename_files(&opts(temp.path(), "log", "txt")).unwrap();
        assert_eq!(count, 0);
        assert!(temp.path().join("report.logs").exists());
        assert!(temp.path().join("report.log.bak").exists());
    }

    #[test]
    fn test_leading_dots_on_tokens_are_ignored() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("report.log"));

        let count = rename_files(&opts(temp.path(), ".log", ".txt")).unwrap();
        assert_eq!(count, 1);
        assert!(temp.path().join("report.txt").exists());
    }

    #[test]
    fn test_collision_appends_stem_suffix() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("report.log"));
        touch(&temp.path().join("report.txt"));

        let count = rename_files(&opts(temp.path(), "log", "txt")).unwrap();
        assert_eq!(count, 1);
        assert!(temp.path().join("report_1.txt").exists());
        assert!(temp.path().join("report.txt").exists());
        assert!(!temp.path().join("report.log").exists());
    }

    #[test]
    fn test_collision_probes_until_free() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("report.log"));
        touch(&temp.path().join("report.txt"));
        touch(&temp.path().join("report_1.txt"));

        rename_files(&opts(temp.path(), "log", "txt")).unwrap();
        assert!(temp.path().join("report_2.txt").exists());
    }

    #[test]
    fn test_dry_run_mutates_nothing_but_counts() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("a.log"));
        touch(&temp.path().join("b.log.7"));

        let mut o = opts(temp.path(), "log", "txt");
        o.dry_run = true;
        let count = rename_files(&o).unwrap();
        assert_eq!(count, 2);
        assert!(temp.path().join("a.log").exists());
        assert!(temp.path().join("b.log.7").exists());
        assert!(!temp.path().join("a.txt").exists());
        assert!(!temp.path().join("b.7.txt").exists());
    }

    #[test]
    fn test_subdirectories_are_not_descended() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        touch(&temp.path().join("sub/deep.log"));

        let count = rename_files(&opts(temp.path(), "log", "txt")).unwrap();
        assert_eq!(count, 0);
        assert!(temp.path().join("sub/deep.log").exists());
    }

    #[test]
    fn test_zero_matches_returns_zero() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("notes.md"));

        let count = rename_files(&opts(temp.path(), "log", "txt")).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_missing_folder_is_an_error() {
        let temp = tempdir().unwrap();
        let err = rename_files(&opts(&temp.path().join("nope"), "log", "txt")).unwrap_err();
        assert!(matches!(err, RenameError::FolderMissing(_)));
    }

    #[test]
    fn test_folder_that_is_a_file_is_an_error() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("plain.txt");
        touch(&file);
        let err = rename_files(&opts(&file, "log", "txt")).unwrap_err();
        assert!(matches!(err, RenameError::NotADirectory(_)));
    }

    #[test]
    fn test_empty_extension_token_is_an_error() {
        let temp = tempdir().unwrap();
        let err = rename_files(&opts(temp.path(), ".", "txt")).unwrap_err();
        assert!(matches!(err, RenameError::EmptyExtension(_)));
    }

    #[test]
    fn test_base_name_with_inner_dots_is_kept() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("app.v2.log"));

        rename_files(&opts(temp.path(), "log", "txt")).unwrap();
        assert!(temp.path().join("app.v2.txt").exists());
    }
}
