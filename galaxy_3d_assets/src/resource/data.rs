//! Raw data resource.
//!
//! Opaque byte payload for files that have no richer in-engine
//! representation (lookup tables, baked blobs, scripts).

use std::any::Any;
use crate::resource::base::{Resource, ResourceInfo, ResourceKind};

/// Raw byte resource
pub struct DataResource {
    info: ResourceInfo,
    bytes: Vec<u8>,
}

impl DataResource {
    /// Create an empty data resource (not in memory)
    pub fn new() -> Self {
        Self {
            info: ResourceInfo::new(ResourceKind::Data),
            bytes: Vec::new(),
        }
    }

    /// Create a data resource holding `bytes` (still not in memory until
    /// registered or loaded)
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self {
            info: ResourceInfo::new(ResourceKind::Data),
            bytes,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn set_bytes(&mut self, bytes: Vec<u8>) {
        self.bytes = bytes;
    }
}

impl Default for DataResource {
    fn default() -> Self {
        Self::new()
    }
}

impl Resource for DataResource {
    fn info(&self) -> &ResourceInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ResourceInfo {
        &mut self.info
    }

    fn footprint(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn release(&mut self) {
        self.bytes = Vec::new();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "data_tests.rs"]
mod tests;
