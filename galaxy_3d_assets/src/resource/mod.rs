//! Resource management module
//!
//! Discovery, format dispatch, loading, accounting, eviction and saving of
//! file-backed engine assets.

mod base;
mod details;
mod eviction;
mod explorer;
mod format_registry;
mod memory;
mod placeholder;
mod resource_manager;
pub mod data;
pub mod formats;
pub mod material;
pub mod mesh;
pub mod multi;
pub mod reflect;
pub mod shader_program;
pub mod texture;

pub use base::{
    Resource, ResourceInfo, ResourceKind, SharedResource,
    share, lock_resource, new_resource,
    normalize_mapping_name, sub_resource_name, slot_of, SUB_RESOURCE_SEPARATOR,
};
pub use details::{ResourceDetails, ResourceOrigin};
pub use eviction::{EvictionCandidate, PriorityBehaviour};
pub use explorer::ResourceExplorer;
pub use format_registry::{
    LoaderManager, SaverManager,
    ResourceLoader, ResourceSaver,
    normalize_extension,
};
pub use memory::MemoryAccountant;
pub use resource_manager::{ResourceManager, BOOTSTRAP_MEMORY_LIMIT};
pub use data::DataResource;
pub use material::{Material, RenderFlags, RenderState};
pub use mesh::{Aabb, Mesh};
pub use multi::{MultiResource, SubResourceDesc};
pub use reflect::{Exposed, FieldDescriptor, FieldValue};
pub use shader_program::{ShaderProgram, ShaderStage};
pub use texture::{Texture, TextureFormat};
