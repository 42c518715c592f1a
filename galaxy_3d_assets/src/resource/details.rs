/// Catalog entries.
///
/// One [`ResourceDetails`] per mapping name. An entry may exist without a
/// materialized resource (discovered on disk, never fetched); once a resource
/// object has been created for it, the same object is kept and reloaded in
/// place for the lifetime of the entry.

use std::sync::Arc;
use std::time::Instant;
use crate::resource::base::{lock_resource, ResourceKind, SharedResource};

/// How a catalog entry came to exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceOrigin {
    /// Found on disk by the resource explorer
    Discovered,
    /// Registered by the application through `add_resource`
    Programmatic,
    /// Slot of a container file
    SubResource { container: String, slot: String },
}

impl ResourceOrigin {
    pub fn is_sub_resource(&self) -> bool {
        matches!(self, ResourceOrigin::SubResource { .. })
    }
}

/// Catalog entry for one mapping name
#[derive(Clone)]
pub struct ResourceDetails {
    mapping_name: String,
    resource: Option<SharedResource>,
    kind: ResourceKind,
    origin: ResourceOrigin,
    last_access: u64,
    access_count: u64,
}

impl ResourceDetails {
    pub fn new(mapping_name: impl Into<String>, kind: ResourceKind, origin: ResourceOrigin) -> Self {
        Self {
            mapping_name: mapping_name.into(),
            resource: None,
            kind,
            origin,
            last_access: 0,
            access_count: 0,
        }
    }

    pub fn mapping_name(&self) -> &str {
        &self.mapping_name
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn origin(&self) -> &ResourceOrigin {
        &self.origin
    }

    /// The materialized resource, if one has been created
    pub fn resource(&self) -> Option<&SharedResource> {
        self.resource.as_ref()
    }

    pub(crate) fn set_resource(&mut self, resource: SharedResource) {
        self.resource = Some(resource);
    }

    /// Access stamp of the last fetch (0 when never fetched)
    pub fn last_access(&self) -> u64 {
        self.last_access
    }

    pub fn access_count(&self) -> u64 {
        self.access_count
    }

    pub fn is_in_memory(&self) -> bool {
        self.resource
            .as_ref()
            .map(|resource| lock_resource(resource).is_in_memory())
            .unwrap_or(false)
    }

    /// Accounted size of the resource (0 without a resource)
    pub fn size(&self) -> u64 {
        self.resource
            .as_ref()
            .map(|resource| lock_resource(resource).size())
            .unwrap_or(0)
    }

    /// Record a fetch and hand out the resource
    pub(crate) fn access(&mut self, now: u64) -> Option<SharedResource> {
        self.last_access = now;
        self.access_count += 1;
        self.resource.clone()
    }

    /// Forget access telemetry (after an eviction or explicit unload)
    pub(crate) fn reset(&mut self) {
        self.last_access = 0;
        self.access_count = 0;
    }

    /// True if `resource` is the object held by this entry
    pub fn holds(&self, resource: &SharedResource) -> bool {
        self.resource
            .as_ref()
            .map(|held| Arc::ptr_eq(held, resource))
            .unwrap_or(false)
    }
}

/// Strictly increasing access stamps
///
/// Stamps are nanoseconds since the clock was created, bumped by one when two
/// reads fall on the same tick.
#[derive(Debug)]
pub(crate) struct AccessClock {
    epoch: Instant,
    last: u64,
}

impl AccessClock {
    pub fn new() -> Self {
        Self { epoch: Instant::now(), last: 0 }
    }

    pub fn tick(&mut self) -> u64 {
        let elapsed = u64::try_from(self.epoch.elapsed().as_nanos()).unwrap_or(u64::MAX);
        self.last = elapsed.max(self.last.saturating_add(1));
        self.last
    }
}
