//! Central resource manager.
//!
//! Owns the catalog (one entry per mapping name), the file map produced by
//! the explorer, the format registry, the memory accountant and the eviction
//! policy. It is constructed explicitly and passed to whoever needs it.
//!
//! Per mapping name an entry is in one of three states:
//!
//! ```text
//! Unknown --refresh/add_resource--> Known-Unloaded --get_resource--> Known-Loaded
//!                                         ^                               |
//!                                         +----- eviction / unload -------+
//! ```
//!
//! Every fetch through [`ResourceManager::get_resource`] stamps the entry's
//! access telemetry and re-checks the memory budget. Handles stay valid for
//! the lifetime of the manager, but their payload may be evicted by any later
//! call; check `is_in_memory()` or fetch again before reuse.

use std::path::PathBuf;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use crate::config::{EngineConfig, DEFAULT_MEMORY_LIMIT};
use crate::error::{Error, Result};
use crate::fs::File;
use crate::resource::base::{
    lock_resource, normalize_mapping_name, slot_of, sub_resource_name,
    Resource, ResourceKind, SharedResource,
};
use crate::resource::details::{AccessClock, ResourceDetails, ResourceOrigin};
use crate::resource::eviction::{EvictionCandidate, PriorityBehaviour};
use crate::resource::explorer::ResourceExplorer;
use crate::resource::format_registry::{LoaderManager, ResourceLoader, ResourceSaver, SaverManager};
use crate::resource::formats::{DataLoader, DataSaver, MaterialLoader, MaterialSaver};
use crate::resource::memory::MemoryAccountant;
use crate::resource::placeholder::Placeholders;
use crate::{engine_bail, engine_debug, engine_error, engine_info, engine_warn};

const SOURCE: &str = "galaxy3d::ResourceManager";

/// Limit used when the budget is zero and nothing can be evicted (64 MiB)
pub const BOOTSTRAP_MEMORY_LIMIT: u64 = 64 * 1024 * 1024;

new_key_type! {
    /// Stable key of a catalog entry
    struct ResourceKey;
}

pub struct ResourceManager {
    explorer: ResourceExplorer,
    loaders: LoaderManager,
    savers: SaverManager,
    accountant: MemoryAccountant,
    /// Catalog entries
    catalog: SlotMap<ResourceKey, ResourceDetails>,
    /// Mapping name -> catalog entry
    names: FxHashMap<String, ResourceKey>,
    /// Mapping name -> backing file
    files: FxHashMap<String, File>,
    memory_limit: u64,
    priority: PriorityBehaviour,
    clock: AccessClock,
    placeholders: Placeholders,
}

impl ResourceManager {
    /// Manager with default collaborators and no registered formats
    pub fn new() -> Self {
        Self::with_components(
            ResourceExplorer::new(),
            LoaderManager::new(),
            SaverManager::new(),
            MemoryAccountant::new(),
        )
    }

    /// Manager built from explicit collaborators
    pub fn with_components(
        explorer: ResourceExplorer,
        loaders: LoaderManager,
        savers: SaverManager,
        accountant: MemoryAccountant,
    ) -> Self {
        Self {
            explorer,
            loaders,
            savers,
            accountant,
            catalog: SlotMap::with_key(),
            names: FxHashMap::default(),
            files: FxHashMap::default(),
            memory_limit: DEFAULT_MEMORY_LIMIT,
            priority: PriorityBehaviour::default(),
            clock: AccessClock::new(),
            placeholders: Placeholders::new(),
        }
    }

    /// Apply `config`, register the built-in formats and scan the resource roots
    ///
    /// Built-in formats are registered after any strategy the caller already
    /// registered, so caller strategies take precedence.
    pub fn initialize(&mut self, config: &EngineConfig) -> Result<()> {
        if config.resource_directory.trim().is_empty() {
            engine_bail!(SOURCE, Error::InitializationFailed,
                "Resource directory name must not be empty");
        }

        self.explorer.set_directory_name(config.resource_directory.as_str());
        self.explorer.set_blacklist(&config.blacklist);
        self.explorer.set_extension_sensitive(config.extension_sensitive);
        self.memory_limit = config.memory_limit;
        self.priority = config.priority_behaviour;

        self.register_resource_loader(DataLoader::new());
        self.register_resource_loader(MaterialLoader);
        self.register_resource_saver(DataSaver::new());
        self.register_resource_saver(MaterialSaver);

        let discovered = self.force_source_refresh();
        engine_info!(SOURCE, "Initialized: {} resource(s) catalogued, limit {} bytes, {:?}",
            discovered, self.memory_limit, self.priority);
        Ok(())
    }

    // ===== FORMAT REGISTRY =====

    /// Register a loader strategy (first registration per extension wins)
    pub fn register_resource_loader<L: ResourceLoader + 'static>(&mut self, loader: L) -> bool {
        self.loaders.register_resource_loader(loader)
    }

    /// Register a saver strategy (first registration per extension wins)
    pub fn register_resource_saver<S: ResourceSaver + 'static>(&mut self, saver: S) -> bool {
        self.savers.register_resource_saver(saver)
    }

    pub fn is_file_type_supported(&self, extension: &str) -> bool {
        self.loaders.is_extension_supported(extension)
    }

    pub fn loaders(&self) -> &LoaderManager {
        &self.loaders
    }

    pub fn savers(&self) -> &SaverManager {
        &self.savers
    }

    // ===== SOURCE DISCOVERY =====

    /// Change the resource-root naming convention (applied on next refresh)
    pub fn set_source_directory(&mut self, name: impl Into<String>) {
        self.explorer.set_directory_name(name);
    }

    /// Replace the extension blacklist (applied on next refresh)
    pub fn set_source_blacklist<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.explorer.set_blacklist(extensions);
    }

    /// Keep extensions in mapping names (applied on next refresh)
    pub fn set_source_extension_sensitive(&mut self, sensitive: bool) {
        self.explorer.set_extension_sensitive(sensitive);
    }

    /// Directory the resource roots are searched from (applied on next refresh)
    pub fn set_working_directory(&mut self, path: impl Into<PathBuf>) {
        self.explorer.set_working_directory(path);
    }

    pub fn explorer(&self) -> &ResourceExplorer {
        &self.explorer
    }

    /// Re-scan the resource roots
    ///
    /// Discovered entries whose file is gone (or no longer eligible) are
    /// unloaded and dropped; new files get fresh entries; containers are
    /// explored into one entry per slot. Programmatic entries are never
    /// touched. Returns the number of new entries.
    pub fn force_source_refresh(&mut self) -> usize {
        let mut discovered = FxHashMap::default();
        self.explorer.populate_file_map(&mut discovered, &self.loaders);

        let stale: Vec<ResourceKey> = self.catalog
            .iter()
            .filter(|(_, details)| match details.origin() {
                ResourceOrigin::Discovered => !discovered.contains_key(details.mapping_name()),
                ResourceOrigin::SubResource { container, .. } => !discovered.contains_key(container),
                ResourceOrigin::Programmatic => false,
            })
            .map(|(key, _)| key)
            .collect();
        for key in &stale {
            self.drop_entry(*key);
        }

        let mut added = 0;
        let mut containers = Vec::new();
        for (name, file) in discovered {
            let kind = match self.names.get(&name).and_then(|key| self.catalog.get(*key)) {
                Some(details) if *details.origin() == ResourceOrigin::Programmatic => continue,
                Some(details) => details.kind(),
                None => {
                    let kind = self.loaders.resource_type(&file.extension());
                    self.insert_entry(name.clone(), kind, ResourceOrigin::Discovered);
                    added += 1;
                    kind
                }
            };
            self.files.insert(name.clone(), file);
            if kind == ResourceKind::Multi {
                containers.push(name);
            }
        }

        containers.sort();
        for container in &containers {
            added += self.explore_container(container);
        }

        engine_info!(SOURCE, "Source refresh: {} new, {} dropped, {} total", added, stale.len(), self.catalog.len());
        added
    }

    /// Catalogue the slots of one container file
    fn explore_container(&mut self, container: &str) -> usize {
        let Some(file) = self.files.get(container).cloned() else {
            return 0;
        };
        let slots = match self.loaders.explore(&file) {
            Ok(slots) => slots,
            Err(err) => {
                engine_warn!(SOURCE, "Cannot explore container '{}': {}", container, err);
                return 0;
            }
        };

        let names: Vec<String> = slots.iter().map(|desc| sub_resource_name(container, &desc.slot)).collect();

        // Slots that disappeared from the container
        let vanished: Vec<ResourceKey> = self.catalog
            .iter()
            .filter(|(_, details)| matches!(details.origin(),
                ResourceOrigin::SubResource { container: owner, .. } if owner == container))
            .filter(|(_, details)| !names.iter().any(|name| name == details.mapping_name()))
            .map(|(key, _)| key)
            .collect();
        for key in vanished {
            self.drop_entry(key);
        }

        let mut added = 0;
        for (desc, name) in slots.iter().zip(names) {
            if let Some(details) = self.details(&name) {
                if details.origin().is_sub_resource() {
                    self.files.insert(name, file.clone());
                }
                continue;
            }
            self.files.insert(name.clone(), file.clone());
            let origin = ResourceOrigin::SubResource {
                container: container.to_string(),
                slot: slot_of(&name).to_string(),
            };
            self.insert_entry(name, desc.kind, origin);
            added += 1;
        }
        added
    }

    // ===== CATALOG =====

    fn insert_entry(&mut self, name: String, kind: ResourceKind, origin: ResourceOrigin) -> ResourceKey {
        let key = self.catalog.insert(ResourceDetails::new(name.clone(), kind, origin));
        self.names.insert(name, key);
        key
    }

    /// Unload (if needed) and forget one entry and its file
    fn drop_entry(&mut self, key: ResourceKey) {
        self.unload_entry(key);
        if let Some(details) = self.catalog.remove(key) {
            self.names.remove(details.mapping_name());
            self.files.remove(details.mapping_name());
            engine_debug!(SOURCE, "Dropped '{}'", details.mapping_name());
        }
    }

    /// Register a resource under `name`
    ///
    /// `file` backs later (re)loads; `resource` is the object to hand out.
    /// A resource handed over with a non-empty payload is treated as
    /// resident. Fails if `name` is already bound to a resource object, or if
    /// `resource` is already held under another name; an entry without a
    /// resource object is adopted.
    pub fn add_resource(
        &mut self,
        name: &str,
        file: Option<File>,
        resource: Option<SharedResource>,
        kind: ResourceKind,
    ) -> Result<()> {
        let name = normalize_mapping_name(name);
        if name.is_empty() {
            engine_bail!(SOURCE, "Cannot add a resource with an empty name");
        }
        if kind == ResourceKind::Undefined {
            engine_bail!(SOURCE, "Cannot add '{}' as an Undefined resource", name);
        }
        if let Some(resource) = &resource {
            let actual = lock_resource(resource).kind();
            if actual != kind {
                engine_bail!(SOURCE, "Cannot add '{}' as {}: resource is a {}", name, kind, actual);
            }
            if let Some(owner) = self.catalog.values().find(|details| details.holds(resource)) {
                engine_bail!(SOURCE, Error::AlreadyExists,
                    "Cannot add '{}': the resource is already registered as '{}'", name, owner.mapping_name());
            }
        }

        if let Some(&key) = self.names.get(&name) {
            let bound = self.catalog.get(key).map(|details| details.resource().is_some()).unwrap_or(false);
            if bound {
                engine_bail!(SOURCE, Error::AlreadyExists, "'{}' is already registered", name);
            }
            self.catalog.remove(key);
            self.names.remove(&name);
            engine_debug!(SOURCE, "Adopting unbound entry '{}'", name);
        }

        if let Some(file) = file {
            self.files.insert(name.clone(), file);
        }
        let key = self.insert_entry(name.clone(), kind, ResourceOrigin::Programmatic);

        if let Some(resource) = resource {
            {
                let mut guard = lock_resource(&resource);
                guard.info_mut().set_mapping_name(&name);
                let footprint = guard.footprint();
                if !guard.is_in_memory() && footprint > 0 {
                    guard.info_mut().mark_loaded(footprint);
                }
                if guard.is_in_memory() {
                    self.accountant.resource_loaded(&*guard);
                }
            }
            if let Some(details) = self.catalog.get_mut(key) {
                details.set_resource(resource);
            }
            self.free_memory_space_except(Some(key));
        }

        engine_debug!(SOURCE, "Added '{}' ({})", name, kind);
        Ok(())
    }

    /// Unload and forget one entry
    pub fn remove_resource(&mut self, name: &str) -> bool {
        let name = normalize_mapping_name(name);
        match self.names.get(&name) {
            Some(&key) => {
                self.drop_entry(key);
                true
            }
            None => false,
        }
    }

    /// Unload everything and forget every entry and file
    pub fn clear_catalog(&mut self) {
        self.unload_all_resources();
        self.catalog.clear();
        self.names.clear();
        self.files.clear();
        self.accountant.reset();
        engine_debug!(SOURCE, "Catalog cleared");
    }

    // ===== LOOKUP =====

    /// Fetch a resource, loading it on demand
    ///
    /// Lookup is case-insensitive. Every successful fetch counts as a use
    /// for the eviction policy. Returns `None` (and logs) when the name is
    /// unknown or the load fails.
    pub fn get_resource(&mut self, path: &str) -> Option<SharedResource> {
        let name = normalize_mapping_name(path);
        let Some(&key) = self.names.get(&name) else {
            engine_error!(SOURCE, "Unknown resource '{}'", name);
            return None;
        };

        let loaded = self.catalog.get(key).map(ResourceDetails::is_in_memory).unwrap_or(false);
        if !loaded {
            if let Err(err) = self.load_entry(key) {
                engine_error!(SOURCE, "Failed to load '{}': {}", name, err);
                return None;
            }
        }

        let now = self.clock.tick();
        let resource = self.catalog.get_mut(key).and_then(|details| details.access(now));
        self.free_memory_space_except(Some(key));
        resource
    }

    /// [`get_resource`](Self::get_resource), falling back to the missing
    /// placeholder of `kind`
    pub fn get_resource_or_missing(&mut self, path: &str, kind: ResourceKind) -> Option<SharedResource> {
        self.get_resource(path).or_else(|| self.placeholders.missing(kind))
    }

    /// (Re)load a resource from its file, even if it is in memory
    ///
    /// Does not count as a use. The file and its loader are checked before
    /// the resident copy is unloaded; a failure inside the loader itself
    /// leaves the entry unloaded.
    pub fn force_load_resource(&mut self, path: &str) -> Result<SharedResource> {
        let name = normalize_mapping_name(path);
        let Some(&key) = self.names.get(&name) else {
            engine_bail!(SOURCE, Error::NotFound, "Unknown resource '{}'", name);
        };

        // A resident payload survives when its source cannot be reloaded
        if let Err(err) = self.loadable_source(&name) {
            engine_error!(SOURCE, "Failed to load '{}': {}", name, err);
            return Err(err);
        }
        self.unload_entry(key);
        if let Err(err) = self.load_entry(key) {
            engine_error!(SOURCE, "Failed to load '{}': {}", name, err);
            return Err(err);
        }
        self.free_memory_space_except(Some(key));

        self.catalog
            .get(key)
            .and_then(|details| details.resource().cloned())
            .ok_or_else(|| Error::NotFound(name))
    }

    /// Refreshed backing file of `name` and the kind its loader produces
    ///
    /// Fails if the file is gone or no loader handles its extension.
    fn loadable_source(&mut self, name: &str) -> Result<(File, ResourceKind)> {
        let file = self.files
            .get_mut(name)
            .ok_or_else(|| Error::NotFound(format!("'{}' has no backing file", name)))?;
        file.refresh();
        if !file.exists() {
            return Err(Error::NotFound(format!("{} does not exist", file.full_path().display())));
        }
        let file = file.clone();

        let extension = file.extension();
        let implied = self.loaders.resource_type(&extension);
        if implied == ResourceKind::Undefined {
            return Err(Error::UnsupportedFormat(format!("no loader registered for '{}'", extension)));
        }
        Ok((file, implied))
    }

    /// Load the entry's resource from its backing file
    ///
    /// Failures are returned unlogged; callers log them once.
    fn load_entry(&mut self, key: ResourceKey) -> Result<()> {
        let details = self.catalog
            .get(key)
            .ok_or_else(|| Error::NotFound("stale catalog key".to_string()))?;
        let name = details.mapping_name().to_string();
        let kind = details.kind();
        let origin = details.origin().clone();
        let existing = details.resource().cloned();

        let (file, implied) = self.loadable_source(&name)?;
        let extension = file.extension();

        let (resource, fresh) = match existing {
            Some(resource) => (resource, false),
            None => (self.loaders.create_resource(&file, kind)?, true),
        };

        let outcome = {
            let mut guard = lock_resource(&resource);
            guard.info_mut().set_mapping_name(&name);
            match &origin {
                ResourceOrigin::SubResource { slot, .. } => {
                    self.loaders.load_sub_resource(&mut *guard, &file, slot)
                }
                _ if kind != implied => {
                    engine_error!(SOURCE, "'{}' is catalogued as {} but '{}' files produce {}, loading slot '{}'",
                        name, kind, extension, implied, slot_of(&name));
                    self.loaders.load_sub_resource(&mut *guard, &file, slot_of(&name))
                }
                _ => self.loaders.load_resource(&mut *guard, &file),
            }
        };

        if let Err(err) = outcome {
            if !fresh {
                lock_resource(&resource).unload();
            }
            return Err(err);
        }

        let size = {
            let guard = lock_resource(&resource);
            self.accountant.resource_loaded(&*guard);
            guard.size()
        };
        if let Some(details) = self.catalog.get_mut(key) {
            details.set_resource(resource);
        }
        engine_debug!(SOURCE, "Loaded '{}' ({} bytes)", name, size);
        Ok(())
    }

    pub fn does_exist(&self, path: &str) -> bool {
        self.names.contains_key(&normalize_mapping_name(path))
    }

    pub fn is_in_memory(&self, path: &str) -> bool {
        self.details(path).map(ResourceDetails::is_in_memory).unwrap_or(false)
    }

    /// Catalog entry for `path`; reading it does not count as a use
    pub fn resource_details(&self, path: &str) -> Option<&ResourceDetails> {
        self.details(path)
    }

    fn details(&self, path: &str) -> Option<&ResourceDetails> {
        self.names
            .get(&normalize_mapping_name(path))
            .and_then(|key| self.catalog.get(*key))
    }

    /// Backing file of `path`
    pub fn resource_file(&self, path: &str) -> Option<&File> {
        self.files.get(&normalize_mapping_name(path))
    }

    /// Reverse lookup: mapping name backed by `file`
    ///
    /// Several names may share one file (container slots). An entry whose
    /// kind equals `kind` is preferred; otherwise, and among equals, the
    /// lexically smallest name is returned.
    pub fn resource_mapping_name(&self, file: &File, kind: Option<ResourceKind>) -> Option<String> {
        let mut candidates: Vec<(&str, ResourceKind)> = self.files
            .iter()
            .filter(|(_, candidate)| *candidate == file)
            .filter_map(|(name, _)| {
                self.names
                    .get(name)
                    .and_then(|key| self.catalog.get(*key))
                    .map(|details| (name.as_str(), details.kind()))
            })
            .collect();
        candidates.sort_unstable();

        kind.and_then(|wanted| candidates.iter().find(|(_, candidate)| *candidate == wanted))
            .or_else(|| candidates.first())
            .map(|(name, _)| name.to_string())
    }

    /// Mapping names of every entry of `kind`, sorted; nothing is loaded
    pub fn resources_of_type(&self, kind: ResourceKind) -> Vec<String> {
        let mut names: Vec<String> = self.catalog
            .values()
            .filter(|details| details.kind() == kind)
            .map(|details| details.mapping_name().to_string())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn resource_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn loaded_resource_count(&self) -> usize {
        self.catalog.values().filter(|details| details.is_in_memory()).count()
    }

    // ===== UNLOADING & EVICTION =====

    /// Unload one entry's resource; returns false if nothing was resident
    fn unload_entry(&mut self, key: ResourceKey) -> bool {
        let Some(details) = self.catalog.get_mut(key) else {
            return false;
        };
        let Some(resource) = details.resource().cloned() else {
            return false;
        };

        let mut guard = lock_resource(&resource);
        if !guard.is_in_memory() {
            return false;
        }
        guard.unload();
        self.accountant.resource_unloaded(&*guard);
        details.reset();
        true
    }

    /// Unload a resource, keeping its catalog entry
    pub fn force_unload_resource(&mut self, path: &str) -> bool {
        let name = normalize_mapping_name(path);
        let unloaded = self.names.get(&name).copied().map(|key| self.unload_entry(key)).unwrap_or(false);
        if unloaded {
            engine_debug!(SOURCE, "Unloaded '{}'", name);
        }
        unloaded
    }

    /// Unload every resident resource; entries are kept
    pub fn unload_all_resources(&mut self) {
        let keys: Vec<ResourceKey> = self.catalog.keys().collect();
        let unloaded = keys.into_iter().filter(|key| self.unload_entry(*key)).count();
        if unloaded > 0 {
            engine_debug!(SOURCE, "Unloaded {} resource(s)", unloaded);
        }
    }

    /// Evict resources until the memory budget holds
    pub fn free_memory_space(&mut self) {
        self.free_memory_space_except(None);
    }

    /// Evict resources (never `protected`) until the memory budget holds
    ///
    /// When the budget is exceeded and nothing is evictable, the limit is
    /// doubled (or set to [`BOOTSTRAP_MEMORY_LIMIT`] if it was zero).
    fn free_memory_space_except(&mut self, protected: Option<ResourceKey>) {
        loop {
            let total = self.accountant.total_memory_usage();
            if total <= self.memory_limit {
                return;
            }

            let victim = self.priority.select_victim(
                self.catalog
                    .iter()
                    .filter(|(key, details)| Some(*key) != protected && details.is_in_memory())
                    .map(|(key, details)| EvictionCandidate {
                        id: key,
                        name: details.mapping_name(),
                        last_access: details.last_access(),
                        access_count: details.access_count(),
                        size: details.size(),
                    }),
            );

            let evicted = victim.map(|key| self.unload_entry(key)).unwrap_or(false);
            if !evicted {
                let relaxed = if self.memory_limit == 0 {
                    BOOTSTRAP_MEMORY_LIMIT
                } else {
                    self.memory_limit.saturating_mul(2)
                };
                engine_warn!(SOURCE,
                    "{} bytes resident exceed the {} byte limit and nothing can be evicted, raising the limit to {} bytes",
                    total, self.memory_limit, relaxed);
                self.memory_limit = relaxed;
                return;
            }

            if let Some(details) = victim.and_then(|key| self.catalog.get(key)) {
                engine_debug!(SOURCE, "Evicted '{}' ({} bytes, {:?})",
                    details.mapping_name(), details.size(), self.priority);
            }
        }
    }

    pub fn set_memory_limit(&mut self, limit: u64) {
        self.memory_limit = limit;
    }

    pub fn memory_limit(&self) -> u64 {
        self.memory_limit
    }

    pub fn set_priority_behaviour(&mut self, behaviour: PriorityBehaviour) {
        self.priority = behaviour;
    }

    pub fn priority_behaviour(&self) -> PriorityBehaviour {
        self.priority
    }

    pub fn total_memory_usage(&self) -> u64 {
        self.accountant.total_memory_usage()
    }

    pub fn memory_usage(&self, kind: ResourceKind) -> u64 {
        self.accountant.memory_usage(kind)
    }

    // ===== PERSISTENCE & PLACEHOLDERS =====

    /// Save an in-memory resource to `file` through the registered saver
    pub fn save_resource(&self, resource: &SharedResource, file: &mut File) -> Result<()> {
        let guard = lock_resource(resource);
        self.savers.save_resource(&*guard, file)?;
        engine_debug!(SOURCE, "Saved '{}' to {}", guard.mapping_name(), file.full_path().display());
        Ok(())
    }

    /// Always-resident empty instance of `kind`
    pub fn empty_resource(&self, kind: ResourceKind) -> Option<SharedResource> {
        self.placeholders.empty(kind)
    }

    /// Always-resident "missing asset" instance of `kind`
    pub fn missing_resource(&self, kind: ResourceKind) -> Option<SharedResource> {
        self.placeholders.missing(kind)
    }
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ResourceManager {
    fn drop(&mut self) {
        self.unload_all_resources();
    }
}

#[cfg(test)]
#[path = "resource_manager_tests.rs"]
mod tests;
