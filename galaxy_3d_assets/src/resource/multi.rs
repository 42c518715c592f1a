//! Multi-resource container.
//!
//! One physical file may back several logical resources of different kinds
//! (e.g. a model file carrying meshes, materials and textures). The container
//! is catalogued as kind `Multi`; each slot it declares becomes an
//! independent catalog entry named `"<container>:<slot>"` whose origin
//! records the container and slot explicitly.

use std::any::Any;
use crate::resource::base::{Resource, ResourceInfo, ResourceKind};

/// One named slot of a container file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubResourceDesc {
    /// Slot name, unique within the container
    pub slot: String,
    /// Kind of the resource materialized from this slot
    pub kind: ResourceKind,
}

impl SubResourceDesc {
    pub fn new(slot: impl Into<String>, kind: ResourceKind) -> Self {
        Self { slot: slot.into(), kind }
    }
}

/// Container resource listing its sub-resource slots
pub struct MultiResource {
    info: ResourceInfo,
    slots: Vec<SubResourceDesc>,
}

impl MultiResource {
    /// Create an empty container (not in memory)
    pub fn new() -> Self {
        Self {
            info: ResourceInfo::new(ResourceKind::Multi),
            slots: Vec::new(),
        }
    }

    pub fn set_slots(&mut self, slots: Vec<SubResourceDesc>) {
        self.slots = slots;
    }

    pub fn slots(&self) -> &[SubResourceDesc] {
        &self.slots
    }

    pub fn slot(&self, name: &str) -> Option<&SubResourceDesc> {
        self.slots.iter().find(|desc| desc.slot == name)
    }
}

impl Default for MultiResource {
    fn default() -> Self {
        Self::new()
    }
}

impl Resource for MultiResource {
    fn info(&self) -> &ResourceInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ResourceInfo {
        &mut self.info
    }

    fn footprint(&self) -> u64 {
        self.slots.iter().map(|desc| (desc.slot.len() + std::mem::size_of::<SubResourceDesc>()) as u64).sum()
    }

    fn release(&mut self) {
        self.slots.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "multi_tests.rs"]
mod tests;
