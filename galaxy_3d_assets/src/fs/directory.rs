//! Recursive directory helpers built on `walkdir`.
//!
//! Entries are visited sorted by file name so that discovery order, and
//! therefore first-root-wins resolution, is reproducible across platforms.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use super::File;

/// List every regular file beneath `dir` (recursively)
///
/// Unreadable entries are skipped with a warning. A missing `dir` yields an
/// empty list.
pub fn list_files_recursive(dir: &Path) -> Vec<File> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(File::new(entry.path())),
            Ok(_) => {}
            Err(err) => {
                if err.depth() > 0 {
                    crate::engine_warn!("galaxy3d::fs", "Skipping unreadable entry: {}", err);
                }
            }
        }
    }
    files
}

/// Find every directory strictly beneath `root` whose name equals `name`
///
/// Matches are returned in discovery order. The contents of a matched
/// directory are not searched further, so nested directories with the same
/// name are not reported as separate roots.
pub fn find_directories_named(root: &Path, name: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut walker = WalkDir::new(root).min_depth(1).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                crate::engine_warn!("galaxy3d::fs", "Skipping unreadable entry: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        if entry.file_name() == name {
            found.push(entry.into_path());
            walker.skip_current_dir();
        }
    }
    found
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;
