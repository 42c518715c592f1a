//! Configuration for the asset subsystem.
//!
//! Parsed from JSON. Every key is optional; missing keys fall back to the
//! defaults below.

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};
use crate::resource::PriorityBehaviour;

/// Default directory-name convention used to recognize resource roots
pub const DEFAULT_RESOURCE_DIRECTORY: &str = "Resources";

/// Default soft memory budget (256 MiB)
pub const DEFAULT_MEMORY_LIMIT: u64 = 256 * 1024 * 1024;

/// Asset subsystem configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EngineConfig {
    /// Name of the directories treated as resource roots
    #[serde(default = "default_resource_directory")]
    pub resource_directory: String,
    /// Soft memory budget in bytes
    #[serde(default = "default_memory_limit")]
    pub memory_limit: u64,
    /// Eviction victim selection rule
    #[serde(default)]
    pub priority_behaviour: PriorityBehaviour,
    /// Extensions (with leading '.') never catalogued
    #[serde(default)]
    pub blacklist: Vec<String>,
    /// Keep file extensions in mapping names
    #[serde(default)]
    pub extension_sensitive: bool,
}

fn default_resource_directory() -> String {
    DEFAULT_RESOURCE_DIRECTORY.to_string()
}

fn default_memory_limit() -> u64 {
    DEFAULT_MEMORY_LIMIT
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resource_directory: default_resource_directory(),
            memory_limit: default_memory_limit(),
            priority_behaviour: PriorityBehaviour::default(),
            blacklist: Vec::new(),
            extension_sensitive: false,
        }
    }
}

impl EngineConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }

    /// Serializes the config as pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<()> {
        if self.resource_directory.trim().is_empty() {
            return Err(Error::Config("ResourceDirectory must not be empty".to_string()));
        }
        if let Some(bad) = self.blacklist.iter().find(|ext| !ext.starts_with('.')) {
            return Err(Error::Config(format!(
                "blacklisted extension '{}' must start with '.'", bad
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
