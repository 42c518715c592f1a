//! Format registry: extension-keyed loader and saver strategies.
//!
//! Each strategy is bound to exactly one file extension. Registration is
//! first-wins: registering a second strategy for an extension that already
//! has one is ignored (with a warning) and reported by a `false` return.
//! This keeps engine-default strategies from being overridden by accident;
//! callers who want their own strategy must register it first.

use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::fs::File;
use crate::resource::base::{new_resource, slot_of, Resource, ResourceKind, SharedResource};
use crate::resource::multi::SubResourceDesc;

const LOADER_SOURCE: &str = "galaxy3d::LoaderManager";
const SAVER_SOURCE: &str = "galaxy3d::SaverManager";

/// Normalize an extension to lowercase with a leading dot
pub fn normalize_extension(extension: &str) -> String {
    let lower = extension.trim().to_lowercase();
    if lower.is_empty() || lower.starts_with('.') {
        lower
    } else {
        format!(".{}", lower)
    }
}

// ===== STRATEGY TRAITS =====

/// Format-specific loading strategy
pub trait ResourceLoader: Send + Sync {
    /// The single extension handled, with leading dot (e.g. `".png"`)
    fn extension(&self) -> &str;

    /// Kind of the resource a file with this extension produces
    fn resource_kind(&self) -> ResourceKind;

    /// Allocate an empty resource of `kind`
    ///
    /// Containers are asked for their sub-resource kinds too, so the default
    /// builds any built-in kind. Override for custom resource types.
    fn create_resource(&self, kind: ResourceKind) -> Option<SharedResource> {
        new_resource(kind)
    }

    /// Populate `resource` from `file`
    fn load(&self, resource: &mut dyn Resource, file: &File) -> Result<()>;

    /// Populate `resource` from one slot of a container `file`
    fn load_sub_resource(&self, _resource: &mut dyn Resource, file: &File, slot: &str) -> Result<()> {
        Err(Error::UnsupportedFormat(format!(
            "'{}' has no sub-resources (requested slot '{}')", file.extension(), slot
        )))
    }

    /// List the slots of a container file
    fn explore(&self, _file: &File) -> Result<Vec<SubResourceDesc>> {
        Ok(Vec::new())
    }
}

/// Format-specific saving strategy
pub trait ResourceSaver: Send + Sync {
    /// The single extension handled, with leading dot
    fn extension(&self) -> &str;

    /// Serialize `resource` into `file`
    fn save(&self, resource: &dyn Resource, file: &mut File) -> Result<()>;
}

// ===== LOADER MANAGER =====

/// Registry of loader strategies
pub struct LoaderManager {
    loaders: FxHashMap<String, Box<dyn ResourceLoader>>,
}

impl LoaderManager {
    pub fn new() -> Self {
        Self { loaders: FxHashMap::default() }
    }

    /// Register a loader; returns false if its extension is already taken
    pub fn register_resource_loader<L: ResourceLoader + 'static>(&mut self, loader: L) -> bool {
        let extension = normalize_extension(loader.extension());
        if extension.is_empty() {
            crate::engine_warn!(LOADER_SOURCE, "Ignoring loader with an empty extension");
            return false;
        }
        if self.loaders.contains_key(&extension) {
            crate::engine_warn!(LOADER_SOURCE,
                "A loader for '{}' is already registered, new registration ignored", extension);
            return false;
        }
        crate::engine_debug!(LOADER_SOURCE,
            "Registered loader for '{}' ({})", extension, loader.resource_kind());
        self.loaders.insert(extension, Box::new(loader));
        true
    }

    pub fn is_extension_supported(&self, extension: &str) -> bool {
        self.loaders.contains_key(&normalize_extension(extension))
    }

    pub fn number_of_resource_loaders(&self) -> usize {
        self.loaders.len()
    }

    /// Registered extensions, sorted
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.loaders.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }

    /// Kind produced for `extension` (`Undefined` when unsupported)
    pub fn resource_type(&self, extension: &str) -> ResourceKind {
        self.loader(extension)
            .map(|loader| loader.resource_kind())
            .unwrap_or(ResourceKind::Undefined)
    }

    pub fn loader(&self, extension: &str) -> Option<&dyn ResourceLoader> {
        self.loaders.get(&normalize_extension(extension)).map(|loader| &**loader)
    }

    fn require(&self, file: &File) -> Result<&dyn ResourceLoader> {
        let extension = file.extension();
        self.loader(&extension).ok_or_else(|| crate::engine_err!(LOADER_SOURCE, Error::UnsupportedFormat,
            "No loader registered for '{}' ({})", extension, file.full_path().display()))
    }

    /// Allocate an empty resource of `kind` through the loader for `file`
    pub fn create_resource(&self, file: &File, kind: ResourceKind) -> Result<SharedResource> {
        self.require(file)?
            .create_resource(kind)
            .ok_or_else(|| Error::InvalidResource(format!(
                "loader for '{}' cannot create a {} resource", file.extension(), kind
            )))
    }

    /// Load `resource` from `file`
    ///
    /// When the resource kind differs from the kind the extension produces,
    /// the call is routed to the sub-resource entry point with the slot
    /// taken from the resource's mapping name. On success the resource is
    /// marked in memory with its current footprint and source path.
    pub fn load_resource(&self, resource: &mut dyn Resource, file: &File) -> Result<()> {
        let loader = self.require(file)?;
        if resource.kind() != loader.resource_kind() {
            let slot = slot_of(resource.mapping_name()).to_string();
            return self.load_sub_resource(resource, file, &slot);
        }
        loader.load(resource, file)?;
        Self::finish_load(resource, file);
        Ok(())
    }

    /// Load one slot of a container `file` into `resource`
    pub fn load_sub_resource(&self, resource: &mut dyn Resource, file: &File, slot: &str) -> Result<()> {
        let loader = self.require(file)?;
        loader.load_sub_resource(resource, file, slot)?;
        Self::finish_load(resource, file);
        Ok(())
    }

    /// List the slots of a container file
    pub fn explore(&self, file: &File) -> Result<Vec<SubResourceDesc>> {
        self.require(file)?.explore(file)
    }

    fn finish_load(resource: &mut dyn Resource, file: &File) {
        let footprint = resource.footprint();
        let info = resource.info_mut();
        info.set_source(file.full_path());
        if info.name().is_empty() {
            let stem = file
                .full_path()
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            info.set_name(stem);
        }
        info.mark_loaded(footprint);
    }
}

impl Default for LoaderManager {
    fn default() -> Self {
        Self::new()
    }
}

// ===== SAVER MANAGER =====

/// Registry of saver strategies
pub struct SaverManager {
    savers: FxHashMap<String, Box<dyn ResourceSaver>>,
}

impl SaverManager {
    pub fn new() -> Self {
        Self { savers: FxHashMap::default() }
    }

    /// Register a saver; returns false if its extension is already taken
    pub fn register_resource_saver<S: ResourceSaver + 'static>(&mut self, saver: S) -> bool {
        let extension = normalize_extension(saver.extension());
        if extension.is_empty() {
            crate::engine_warn!(SAVER_SOURCE, "Ignoring saver with an empty extension");
            return false;
        }
        if self.savers.contains_key(&extension) {
            crate::engine_warn!(SAVER_SOURCE,
                "A saver for '{}' is already registered, new registration ignored", extension);
            return false;
        }
        crate::engine_debug!(SAVER_SOURCE, "Registered saver for '{}'", extension);
        self.savers.insert(extension, Box::new(saver));
        true
    }

    pub fn is_extension_supported(&self, extension: &str) -> bool {
        self.savers.contains_key(&normalize_extension(extension))
    }

    pub fn number_of_resource_savers(&self) -> usize {
        self.savers.len()
    }

    /// Save an in-memory resource to `file`
    pub fn save_resource(&self, resource: &dyn Resource, file: &mut File) -> Result<()> {
        let extension = file.extension();
        let saver = self.savers.get(&extension).ok_or_else(|| crate::engine_err!(SAVER_SOURCE,
            Error::UnsupportedFormat, "No saver registered for '{}' ({})",
            extension, file.full_path().display()))?;
        if !resource.is_in_memory() {
            return Err(crate::engine_err!(SAVER_SOURCE, Error::InvalidResource,
                "Cannot save '{}': resource is not in memory", resource.mapping_name()));
        }
        saver.save(resource, file)
    }
}

impl Default for SaverManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "format_registry_tests.rs"]
mod tests;
