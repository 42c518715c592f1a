/// Resident memory bookkeeping.
///
/// The accountant is told about every load and unload performed by the
/// resource manager and keeps a total plus a per-kind breakdown. A
/// notification whose precondition does not hold (loaded notification for a
/// resource that is not in memory, unloaded notification for one that still
/// is) is ignored with a warning, so the counters never drift.

use rustc_hash::FxHashMap;
use crate::resource::base::{Resource, ResourceKind};

const SOURCE: &str = "galaxy3d::MemoryAccountant";

#[derive(Debug, Default)]
pub struct MemoryAccountant {
    total: u64,
    per_kind: FxHashMap<ResourceKind, u64>,
}

impl MemoryAccountant {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the size of a freshly loaded resource
    pub fn resource_loaded(&mut self, resource: &dyn Resource) {
        if !resource.is_in_memory() {
            crate::engine_warn!(SOURCE,
                "Ignoring load notification for '{}': resource is not in memory", resource.mapping_name());
            return;
        }
        let size = resource.size();
        self.total = self.total.saturating_add(size);
        let slot = self.per_kind.entry(resource.kind()).or_insert(0);
        *slot = slot.saturating_add(size);
    }

    /// Subtract the size of a resource that has just been unloaded
    pub fn resource_unloaded(&mut self, resource: &dyn Resource) {
        if resource.is_in_memory() {
            crate::engine_warn!(SOURCE,
                "Ignoring unload notification for '{}': resource is still in memory", resource.mapping_name());
            return;
        }
        let size = resource.size();
        self.total = self.total.saturating_sub(size);
        if let Some(slot) = self.per_kind.get_mut(&resource.kind()) {
            *slot = slot.saturating_sub(size);
        }
    }

    /// Resident bytes of one kind
    pub fn memory_usage(&self, kind: ResourceKind) -> u64 {
        self.per_kind.get(&kind).copied().unwrap_or(0)
    }

    /// Resident bytes across all kinds
    pub fn total_memory_usage(&self) -> u64 {
        self.total
    }

    pub fn reset(&mut self) {
        self.total = 0;
        self.per_kind.clear();
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
