//! Error types for the Galaxy3D asset subsystem
//!
//! This module defines the error type shared by the resource manager, the
//! format registry, the resource explorer and the configuration layer.

use std::fmt;

/// Result type for Galaxy3D operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Mapping name has no catalog entry, or its backing file is missing
    NotFound(String),

    /// No loader or saver is registered for the file extension
    UnsupportedFormat(String),

    /// A loader strategy failed (malformed file, I/O error, ...)
    LoadFailed(String),

    /// A saver strategy failed
    SaveFailed(String),

    /// Mapping name is already occupied by a materialized resource
    AlreadyExists(String),

    /// Invalid resource (wrong kind, not in memory, ...)
    InvalidResource(String),

    /// Filesystem error
    Io(String),

    /// Invalid or unreadable configuration
    Config(String),

    /// Initialization failed (manager, subsystems)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::UnsupportedFormat(msg) => write!(f, "Unsupported format: {}", msg),
            Error::LoadFailed(msg) => write!(f, "Load failed: {}", msg),
            Error::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
            Error::AlreadyExists(msg) => write!(f, "Already exists: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
