/// File handle with cached metadata.
///
/// A `File` owns a path and a snapshot of its metadata taken at construction
/// or at the last `refresh()`. Queries (`exists`, `can_read`, ...) read the
/// snapshot; they never touch the disk.

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use bitflags::bitflags;
use crate::error::Result;

bitflags! {
    /// Access rights observed at the last refresh
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FilePermissions: u8 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FileMetadata {
    exists: bool,
    is_dir: bool,
    permissions: FilePermissions,
    len: u64,
    modified: Option<SystemTime>,
}

impl FileMetadata {
    fn stat(path: &Path) -> Self {
        let Ok(meta) = std::fs::metadata(path) else {
            return Self::default();
        };

        let mut permissions = FilePermissions::empty();
        let readable = if meta.is_dir() {
            std::fs::read_dir(path).is_ok()
        } else {
            std::fs::File::open(path).is_ok()
        };
        if readable {
            permissions |= FilePermissions::READ;
        }
        if !meta.permissions().readonly() {
            permissions |= FilePermissions::WRITE;
        }

        Self {
            exists: true,
            is_dir: meta.is_dir(),
            permissions,
            len: meta.len(),
            modified: meta.modified().ok(),
        }
    }
}

/// File or directory path plus cached metadata
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    metadata: FileMetadata,
}

impl File {
    /// Create a file handle and stat it immediately
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let metadata = FileMetadata::stat(&path);
        Self { path, metadata }
    }

    /// Re-read metadata from disk
    ///
    /// Returns true if anything observable (existence, size, modification
    /// time, permissions) changed since the previous snapshot.
    pub fn refresh(&mut self) -> bool {
        let metadata = FileMetadata::stat(&self.path);
        let changed = metadata != self.metadata;
        self.metadata = metadata;
        changed
    }

    pub fn exists(&self) -> bool {
        self.metadata.exists
    }

    pub fn is_dir(&self) -> bool {
        self.metadata.is_dir
    }

    pub fn can_read(&self) -> bool {
        self.metadata.permissions.contains(FilePermissions::READ)
    }

    pub fn can_write(&self) -> bool {
        self.metadata.permissions.contains(FilePermissions::WRITE)
    }

    pub fn permissions(&self) -> FilePermissions {
        self.metadata.permissions
    }

    /// Size in bytes at the last refresh (0 when missing)
    pub fn len(&self) -> u64 {
        self.metadata.len
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.len == 0
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.metadata.modified
    }

    /// Lowercase extension with its leading dot (`".png"`), or `""`
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default()
    }

    /// File name including extension
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn full_path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.path)?)
    }

    /// Read the whole file as UTF-8
    pub fn read_to_string(&self) -> Result<String> {
        Ok(std::fs::read_to_string(&self.path)?)
    }

    /// Write `bytes`, creating parent directories, then refresh metadata
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, bytes)?;
        self.refresh();
        Ok(())
    }
}

impl PartialEq for File {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for File {}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
