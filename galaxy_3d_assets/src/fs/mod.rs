//! Filesystem abstraction
//!
//! Stat-like file metadata and recursive directory listing consumed by the
//! resource explorer and the format strategies.

mod file;
mod directory;

pub use file::{File, FilePermissions};
pub use directory::{list_files_recursive, find_directories_named};
