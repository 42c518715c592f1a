/// Raw byte format.
///
/// The whole file becomes the payload of a `DataResource`; saving writes the
/// payload back unchanged.

use crate::error::{Error, Result};
use crate::fs::File;
use crate::resource::base::{Resource, ResourceKind};
use crate::resource::data::DataResource;
use crate::resource::format_registry::{normalize_extension, ResourceLoader, ResourceSaver};

const DEFAULT_EXTENSION: &str = ".bin";

fn as_data(resource: &dyn Resource) -> Result<&DataResource> {
    resource.downcast_ref::<DataResource>().ok_or_else(|| Error::InvalidResource(format!(
        "'{}' is a {}, expected Data", resource.mapping_name(), resource.kind()
    )))
}

/// Loads any file as raw bytes
pub struct DataLoader {
    extension: String,
}

impl DataLoader {
    pub fn new() -> Self {
        Self::with_extension(DEFAULT_EXTENSION)
    }

    /// Raw loader bound to another extension
    pub fn with_extension(extension: &str) -> Self {
        Self { extension: normalize_extension(extension) }
    }
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceLoader for DataLoader {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn resource_kind(&self) -> ResourceKind {
        ResourceKind::Data
    }

    fn load(&self, resource: &mut dyn Resource, file: &File) -> Result<()> {
        let bytes = file.read_bytes().map_err(|err| {
            Error::LoadFailed(format!("{}: {}", file.full_path().display(), err))
        })?;
        let kind = resource.kind();
        let data = resource.downcast_mut::<DataResource>().ok_or_else(|| {
            Error::InvalidResource(format!("cannot load raw bytes into a {}", kind))
        })?;
        data.set_bytes(bytes);
        Ok(())
    }
}

/// Writes a `DataResource` payload as-is
pub struct DataSaver {
    extension: String,
}

impl DataSaver {
    pub fn new() -> Self {
        Self::with_extension(DEFAULT_EXTENSION)
    }

    pub fn with_extension(extension: &str) -> Self {
        Self { extension: normalize_extension(extension) }
    }
}

impl Default for DataSaver {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceSaver for DataSaver {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn save(&self, resource: &dyn Resource, file: &mut File) -> Result<()> {
        let data = as_data(resource)?;
        file.write_bytes(data.bytes()).map_err(|err| {
            Error::SaveFailed(format!("{}: {}", file.full_path().display(), err))
        })
    }
}

#[cfg(test)]
#[path = "data_format_tests.rs"]
mod tests;
