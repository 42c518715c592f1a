/*!
# Galaxy 3D Assets

Resource management core for the Galaxy 3D engine.

This crate discovers, loads, caches, evicts and persists file-backed engine
assets (textures, meshes, materials, shader programs, raw data) under one
case-insensitive mapping-name address space.

## Architecture

- **ResourceExplorer**: walks resource roots and builds the `name -> File` catalog
- **LoaderManager / SaverManager**: extension-keyed format registry
- **MemoryAccountant**: per-kind and total resident byte counts
- **ResourceManager**: the orchestrator; owns the catalog and the eviction policy
- **Resource**: trait implemented by every loadable asset

Format-specific loaders are plugins implementing `ResourceLoader` /
`ResourceSaver`; only raw data and JSON material descriptors ship built in.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod fs;
pub mod resource;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging facade
    pub use crate::engine::Engine;

    // Configuration
    pub use crate::config::EngineConfig;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Filesystem sub-module
    pub mod fs {
        pub use crate::fs::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }
}

// Re-export math library at crate root
pub use glam;
