/// Fallback resources handed out when a lookup fails.
///
/// Every kind has two fixed, always-resident instances: an "empty" one (no
/// payload) and a "missing" one meant to be visible in-scene (magenta/black
/// checker texture, unit quad mesh). They are created once per manager, are
/// never catalogued and never evicted.

use rustc_hash::FxHashMap;
use crate::resource::base::{lock_resource, new_resource, share, Resource, ResourceKind, SharedResource};
use crate::resource::mesh::Mesh;
use crate::resource::texture::Texture;

const MAGENTA: [u8; 4] = [255, 0, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

pub(crate) struct Placeholders {
    empty: FxHashMap<ResourceKind, SharedResource>,
    missing: FxHashMap<ResourceKind, SharedResource>,
}

impl Placeholders {
    pub fn new() -> Self {
        let mut empty = FxHashMap::default();
        let mut missing = FxHashMap::default();

        for kind in ResourceKind::ALL {
            if let Some(resource) = new_resource(kind) {
                empty.insert(kind, finish(resource, "empty", kind));
            }
            let fallback = match kind {
                ResourceKind::Texture => Some(share(Texture::checkerboard(2, 2, MAGENTA, BLACK))),
                ResourceKind::Mesh => Some(share(Mesh::quad())),
                other => new_resource(other),
            };
            if let Some(resource) = fallback {
                missing.insert(kind, finish(resource, "missing", kind));
            }
        }

        Self { empty, missing }
    }

    pub fn empty(&self, kind: ResourceKind) -> Option<SharedResource> {
        self.empty.get(&kind).cloned()
    }

    pub fn missing(&self, kind: ResourceKind) -> Option<SharedResource> {
        self.missing.get(&kind).cloned()
    }
}

fn finish(resource: SharedResource, label: &str, kind: ResourceKind) -> SharedResource {
    {
        let mut guard = lock_resource(&resource);
        let footprint = guard.footprint();
        let info = guard.info_mut();
        info.set_name(format!("<{} {}>", label, kind));
        info.mark_loaded(footprint);
    }
    resource
}

#[cfg(test)]
#[path = "placeholder_tests.rs"]
mod tests;
