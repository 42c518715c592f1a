/// JSON material descriptor (`.gmat`).
///
/// ```json
/// {
///   "Fields":   { "shader_program": { "Text": "shaders/lit" }, "blend": { "Bool": true } },
///   "Textures": { "albedo": "textures/grass" },
///   "Uniforms": { "roughness": { "Float": 0.5 } }
/// }
/// ```
///
/// `Fields` goes through the material's reflection table; every section is
/// optional on load.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};
use crate::fs::File;
use crate::resource::base::{Resource, ResourceKind};
use crate::resource::material::Material;
use crate::resource::reflect::{self, FieldValue};
use crate::resource::format_registry::{ResourceLoader, ResourceSaver};

/// Extension of material descriptors
pub const MATERIAL_EXTENSION: &str = ".gmat";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MaterialDocument {
    #[serde(default)]
    fields: serde_json::Value,
    #[serde(default)]
    textures: BTreeMap<String, String>,
    #[serde(default)]
    uniforms: BTreeMap<String, FieldValue>,
}

pub struct MaterialLoader;

impl ResourceLoader for MaterialLoader {
    fn extension(&self) -> &str {
        MATERIAL_EXTENSION
    }

    fn resource_kind(&self) -> ResourceKind {
        ResourceKind::Material
    }

    fn load(&self, resource: &mut dyn Resource, file: &File) -> Result<()> {
        let path = file.full_path().display().to_string();
        let text = file
            .read_to_string()
            .map_err(|err| Error::LoadFailed(format!("{}: {}", path, err)))?;
        let document: MaterialDocument = serde_json::from_str(&text)
            .map_err(|err| Error::LoadFailed(format!("{}: {}", path, err)))?;

        let kind = resource.kind();
        let material = resource.downcast_mut::<Material>().ok_or_else(|| {
            Error::InvalidResource(format!("cannot load a material into a {}", kind))
        })?;

        // Start from defaults so a reload never keeps stale slots
        material.release();
        if !document.fields.is_null() {
            reflect::apply_json(material, &document.fields)
                .map_err(|err| Error::LoadFailed(format!("{}: {}", path, err)))?;
        }
        for (slot, texture) in document.textures {
            material.set_texture(slot, texture);
        }
        for (name, value) in document.uniforms {
            material.set_uniform(name, value);
        }
        Ok(())
    }
}

pub struct MaterialSaver;

impl ResourceSaver for MaterialSaver {
    fn extension(&self) -> &str {
        MATERIAL_EXTENSION
    }

    fn save(&self, resource: &dyn Resource, file: &mut File) -> Result<()> {
        let material = resource.downcast_ref::<Material>().ok_or_else(|| {
            Error::InvalidResource(format!("'{}' is a {}, expected Material",
                resource.mapping_name(), resource.kind()))
        })?;

        let document = MaterialDocument {
            fields: reflect::to_json(material),
            textures: material.textures().clone(),
            uniforms: material.uniforms().clone(),
        };
        let text = serde_json::to_string_pretty(&document)
            .map_err(|err| Error::SaveFailed(err.to_string()))?;
        let path = file.full_path().display().to_string();
        file.write_bytes(text.as_bytes())
            .map_err(|err| Error::SaveFailed(format!("{}: {}", path, err)))
    }
}

#[cfg(test)]
#[path = "material_format_tests.rs"]
mod tests;
