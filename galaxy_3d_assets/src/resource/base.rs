//! Common resource model.
//!
//! Every loadable asset implements [`Resource`]. The trait exposes a shared
//! [`ResourceInfo`] header (identity plus residency) and the payload hooks the
//! manager needs: current footprint and release.
//!
//! # Lifecycle
//!
//! ```text
//! new (not in memory) --load--> in memory --unload--> not in memory --load--> ...
//! ```
//!
//! `unload()` releases the payload but keeps the identity (mapping name,
//! source path, kind) so that the same object can be reloaded in place.

use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use serde::{Deserialize, Serialize};

use crate::resource::data::DataResource;
use crate::resource::material::Material;
use crate::resource::mesh::Mesh;
use crate::resource::multi::MultiResource;
use crate::resource::shader_program::ShaderProgram;
use crate::resource::texture::Texture;

// ===== RESOURCE KIND =====

/// Category of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    Texture,
    Mesh,
    Material,
    ShaderProgram,
    Data,
    /// Container whose sub-resources are catalogued independently
    Multi,
    Undefined,
}

impl ResourceKind {
    /// Every kind, in declaration order
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Texture,
        ResourceKind::Mesh,
        ResourceKind::Material,
        ResourceKind::ShaderProgram,
        ResourceKind::Data,
        ResourceKind::Multi,
        ResourceKind::Undefined,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Texture => "Texture",
            ResourceKind::Mesh => "Mesh",
            ResourceKind::Material => "Material",
            ResourceKind::ShaderProgram => "ShaderProgram",
            ResourceKind::Data => "Data",
            ResourceKind::Multi => "Multi",
            ResourceKind::Undefined => "Undefined",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ===== RESOURCE INFO =====

/// Identity and residency header shared by every resource
#[derive(Debug, Clone)]
pub struct ResourceInfo {
    kind: ResourceKind,
    name: String,
    mapping_name: String,
    source: Option<PathBuf>,
    in_memory: bool,
    /// Byte size recorded at the last successful load; kept across unload
    size: u64,
}

impl ResourceInfo {
    /// Create an empty, not-in-memory header
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            name: String::new(),
            mapping_name: String::new(),
            source: None,
            in_memory: false,
            size: 0,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Human-readable name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Catalog key, stamped by the resource manager
    pub fn mapping_name(&self) -> &str {
        &self.mapping_name
    }

    pub(crate) fn set_mapping_name(&mut self, mapping_name: &str) {
        self.mapping_name = mapping_name.to_string();
    }

    /// Path of the file the resource was last loaded from
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn set_source(&mut self, path: impl Into<PathBuf>) {
        self.source = Some(path.into());
    }

    pub fn is_in_memory(&self) -> bool {
        self.in_memory
    }

    /// Byte size accounted for this resource
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Record a completed load and its byte size
    pub fn mark_loaded(&mut self, size: u64) {
        self.in_memory = true;
        self.size = size;
    }

    /// Record that the payload has been released
    pub fn mark_unloaded(&mut self) {
        self.in_memory = false;
    }
}

// ===== RESOURCE TRAIT =====

/// A loadable engine asset
///
/// Implementors provide the header accessors, the payload footprint and
/// `release`; the provided methods build the lifecycle on top of them.
pub trait Resource: Any + Send {
    /// Identity and residency header
    fn info(&self) -> &ResourceInfo;

    /// Mutable header
    fn info_mut(&mut self) -> &mut ResourceInfo;

    /// Bytes currently owned by the payload
    fn footprint(&self) -> u64;

    /// Drop the payload (pixels, vertices, ...) while keeping identity
    fn release(&mut self);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn kind(&self) -> ResourceKind {
        self.info().kind()
    }

    fn name(&self) -> &str {
        self.info().name()
    }

    fn mapping_name(&self) -> &str {
        self.info().mapping_name()
    }

    fn is_in_memory(&self) -> bool {
        self.info().is_in_memory()
    }

    /// Accounted byte size (see [`ResourceInfo::size`])
    fn size(&self) -> u64 {
        self.info().size()
    }

    /// Release the payload and leave the resource not in memory
    fn unload(&mut self) {
        self.release();
        self.info_mut().mark_unloaded();
    }
}

impl dyn Resource {
    /// Downcast to a concrete resource type
    pub fn downcast_ref<T: Resource>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcast to a mutable concrete resource type
    pub fn downcast_mut<T: Resource>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

// ===== SHARED HANDLES =====

/// Handle handed out by the resource manager
///
/// The handle stays valid for the lifetime of the manager, but its payload
/// may be evicted at any time: check `is_in_memory()` (or fetch again through
/// the manager) before using it across frames. Do not hold the lock while
/// calling back into the manager.
pub type SharedResource = Arc<Mutex<dyn Resource>>;

/// Wrap a concrete resource into a shared handle
pub fn share<R: Resource>(resource: R) -> SharedResource {
    Arc::new(Mutex::new(resource))
}

/// Lock a shared resource, recovering from a poisoned lock
pub fn lock_resource(resource: &SharedResource) -> MutexGuard<'_, dyn Resource> {
    resource.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Build an empty, not-in-memory instance of a built-in kind
///
/// Returns `None` for `Undefined`.
pub fn new_resource(kind: ResourceKind) -> Option<SharedResource> {
    match kind {
        ResourceKind::Texture => Some(share(Texture::new())),
        ResourceKind::Mesh => Some(share(Mesh::new())),
        ResourceKind::Material => Some(share(Material::new())),
        ResourceKind::ShaderProgram => Some(share(ShaderProgram::new())),
        ResourceKind::Data => Some(share(DataResource::new())),
        ResourceKind::Multi => Some(share(MultiResource::new())),
        ResourceKind::Undefined => None,
    }
}

// ===== MAPPING NAMES =====

/// Separator between a container's mapping name and a sub-resource slot
pub const SUB_RESOURCE_SEPARATOR: char = ':';

/// Normalize a user-supplied path into a mapping name
///
/// Lowercases, converts `\` to `/` and trims leading `./` and `/`.
pub fn normalize_mapping_name(path: &str) -> String {
    let mut name = path.replace('\\', "/").to_lowercase();
    loop {
        if let Some(rest) = name.strip_prefix("./") {
            name = rest.to_string();
        } else if let Some(rest) = name.strip_prefix('/') {
            name = rest.to_string();
        } else {
            break;
        }
    }
    name
}

/// Mapping name of a sub-resource slot inside a container
pub fn sub_resource_name(container: &str, slot: &str) -> String {
    format!("{}{}{}", container, SUB_RESOURCE_SEPARATOR, normalize_mapping_name(slot))
}

/// Slot part of a mapping name (the whole name when there is no separator)
pub fn slot_of(mapping_name: &str) -> &str {
    mapping_name
        .rsplit_once(SUB_RESOURCE_SEPARATOR)
        .map(|(_, slot)| slot)
        .unwrap_or(mapping_name)
}

#[cfg(test)]
#[path = "base_tests.rs"]
mod tests;
