//! Resource discovery.
//!
//! The explorer locates resource roots, directories named after the
//! configured convention (`"Resources"` by default), and maps every
//! supported file beneath them to a mapping name:
//!
//! ```text
//! <cwd>/Resources/Textures/Grass.png  ->  "textures/grass"       (default)
//!                                     ->  "textures/grass.png"   (extension sensitive)
//! ```
//!
//! If `<cwd>/<name>` exists it is the only root. Otherwise every directory
//! with that exact name beneath the working directory is a root, visited in
//! sorted order; when two roots provide the same mapping name the first root
//! wins and the duplicate is logged.

use std::path::{Path, PathBuf};
use rustc_hash::{FxHashMap, FxHashSet};
use crate::config::DEFAULT_RESOURCE_DIRECTORY;
use crate::fs::{find_directories_named, list_files_recursive, File};
use crate::resource::base::normalize_mapping_name;
use crate::resource::format_registry::{normalize_extension, LoaderManager};

const SOURCE: &str = "galaxy3d::ResourceExplorer";

pub struct ResourceExplorer {
    directory_name: String,
    blacklist: FxHashSet<String>,
    extension_sensitive: bool,
    working_directory: PathBuf,
}

impl ResourceExplorer {
    /// Explorer rooted at the process working directory
    pub fn new() -> Self {
        let working_directory = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            directory_name: DEFAULT_RESOURCE_DIRECTORY.to_string(),
            blacklist: FxHashSet::default(),
            extension_sensitive: false,
            working_directory,
        }
    }

    pub fn directory_name(&self) -> &str {
        &self.directory_name
    }

    pub fn set_directory_name(&mut self, name: impl Into<String>) {
        self.directory_name = name.into();
    }

    /// Replace the blacklist (extensions are normalized)
    pub fn set_blacklist<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.blacklist = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .collect();
    }

    pub fn is_blacklisted(&self, extension: &str) -> bool {
        self.blacklist.contains(&normalize_extension(extension))
    }

    pub fn extension_sensitive(&self) -> bool {
        self.extension_sensitive
    }

    pub fn set_extension_sensitive(&mut self, sensitive: bool) {
        self.extension_sensitive = sensitive;
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    pub fn set_working_directory(&mut self, path: impl Into<PathBuf>) {
        self.working_directory = path.into();
    }

    /// Directories scanned for resources, in priority order
    pub fn resource_roots(&self) -> Vec<PathBuf> {
        let direct = self.working_directory.join(&self.directory_name);
        if direct.is_dir() {
            return vec![direct];
        }
        find_directories_named(&self.working_directory, &self.directory_name)
    }

    /// Mapping name of `path` relative to `root`
    pub fn mapping_name(&self, root: &Path, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(root).ok()?;
        let relative = if self.extension_sensitive {
            relative.to_path_buf()
        } else {
            relative.with_extension("")
        };
        let parts: Vec<String> = relative
            .components()
            .map(|part| part.as_os_str().to_string_lossy().into_owned())
            .collect();
        if parts.is_empty() {
            return None;
        }
        Some(normalize_mapping_name(&parts.join("/")))
    }

    /// Fill `files` with every supported, non-blacklisted file found under
    /// the resource roots
    ///
    /// Existing keys are kept. Returns the number of new entries.
    pub fn populate_file_map(&self, files: &mut FxHashMap<String, File>, loaders: &LoaderManager) -> usize {
        let roots = self.resource_roots();
        if roots.is_empty() {
            crate::engine_warn!(SOURCE, "No '{}' directory found under {}",
                self.directory_name, self.working_directory.display());
            return 0;
        }

        let mut added = 0;
        for root in &roots {
            for file in list_files_recursive(root) {
                let extension = file.extension();
                if self.is_blacklisted(&extension) || !loaders.is_extension_supported(&extension) {
                    continue;
                }
                let Some(name) = self.mapping_name(root, file.full_path()) else {
                    continue;
                };
                if let Some(existing) = files.get(&name) {
                    if existing != &file {
                        crate::engine_warn!(SOURCE, "'{}' already provided by {}, ignoring {}",
                            name, existing.full_path().display(), file.full_path().display());
                    }
                    continue;
                }
                files.insert(name, file);
                added += 1;
            }
        }

        crate::engine_debug!(SOURCE, "Discovered {} new file(s) in {} root(s)", added, roots.len());
        added
    }
}

impl Default for ResourceExplorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "explorer_tests.rs"]
mod tests;
