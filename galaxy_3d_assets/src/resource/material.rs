/// Resource-level material type.
///
/// A Material is a pure data description of a surface's visual properties:
/// - Shader program reference: mapping name of a `ShaderProgram` resource
/// - Texture slots: named slots bound to texture mapping names
/// - Uniforms: named scalar/vector values (roughness, base_color, etc.)
/// - Render state: depth/blend/cull flags and line width
///
/// Referenced resources are stored by mapping name and resolved through the
/// `ResourceManager` at bind time, so unloading a material never cascades.
/// The fixed fields are reachable through the reflection table (`Exposed`).

use std::any::Any;
use std::collections::BTreeMap;
use bitflags::bitflags;
use crate::error::Result;
use crate::resource::base::{Resource, ResourceInfo, ResourceKind};
use crate::resource::reflect::{Exposed, FieldDescriptor, FieldValue};

// ===== RENDER STATE =====

bitflags! {
    /// Fixed-function switches of a material
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderFlags: u32 {
        const DEPTH_TEST = 1 << 0;
        const DEPTH_WRITE = 1 << 1;
        const BLEND = 1 << 2;
        const CULL_BACK = 1 << 3;
        const WIREFRAME = 1 << 4;
    }
}

impl Default for RenderFlags {
    fn default() -> Self {
        RenderFlags::DEPTH_TEST | RenderFlags::DEPTH_WRITE | RenderFlags::CULL_BACK
    }
}

/// Render state section of a material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub flags: RenderFlags,
    pub line_width: f32,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            flags: RenderFlags::default(),
            line_width: 1.0,
        }
    }
}

// ===== MATERIAL =====

/// Material resource
pub struct Material {
    info: ResourceInfo,
    shader_program: String,
    textures: BTreeMap<String, String>,
    uniforms: BTreeMap<String, FieldValue>,
    render_state: RenderState,
}

impl Material {
    /// Create an empty material (not in memory)
    pub fn new() -> Self {
        Self {
            info: ResourceInfo::new(ResourceKind::Material),
            shader_program: String::new(),
            textures: BTreeMap::new(),
            uniforms: BTreeMap::new(),
            render_state: RenderState::default(),
        }
    }

    /// Mapping name of the shader program
    pub fn shader_program(&self) -> &str {
        &self.shader_program
    }

    pub fn set_shader_program(&mut self, mapping_name: impl Into<String>) {
        self.shader_program = mapping_name.into();
    }

    /// Bind a texture mapping name to a slot, returning the previous binding
    pub fn set_texture(&mut self, slot: impl Into<String>, mapping_name: impl Into<String>) -> Option<String> {
        self.textures.insert(slot.into(), mapping_name.into())
    }

    pub fn texture(&self, slot: &str) -> Option<&str> {
        self.textures.get(slot).map(String::as_str)
    }

    /// Texture slots sorted by slot name
    pub fn textures(&self) -> &BTreeMap<String, String> {
        &self.textures
    }

    pub fn set_uniform(&mut self, name: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.uniforms.insert(name.into(), value)
    }

    pub fn uniform(&self, name: &str) -> Option<&FieldValue> {
        self.uniforms.get(name)
    }

    /// Uniforms sorted by name
    pub fn uniforms(&self) -> &BTreeMap<String, FieldValue> {
        &self.uniforms
    }

    pub fn render_state(&self) -> &RenderState {
        &self.render_state
    }

    pub fn render_state_mut(&mut self) -> &mut RenderState {
        &mut self.render_state
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}

impl Resource for Material {
    fn info(&self) -> &ResourceInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ResourceInfo {
        &mut self.info
    }

    fn footprint(&self) -> u64 {
        let textures: usize = self.textures.iter().map(|(slot, name)| slot.len() + name.len()).sum();
        let uniforms: usize = self.uniforms.iter().map(|(name, value)| name.len() + value.byte_size()).sum();
        (std::mem::size_of::<RenderState>() + self.shader_program.len() + textures + uniforms) as u64
    }

    fn release(&mut self) {
        self.shader_program = String::new();
        self.textures.clear();
        self.uniforms.clear();
        self.render_state = RenderState::default();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===== REFLECTION =====

fn get_shader_program(m: &Material) -> FieldValue {
    FieldValue::Text(m.shader_program.clone())
}

fn set_shader_program(m: &mut Material, value: FieldValue) -> Result<()> {
    m.shader_program = value.into_text()?;
    Ok(())
}

fn get_flag(m: &Material, flag: RenderFlags) -> FieldValue {
    FieldValue::Bool(m.render_state.flags.contains(flag))
}

fn set_flag(m: &mut Material, flag: RenderFlags, value: FieldValue) -> Result<()> {
    m.render_state.flags.set(flag, value.as_bool()?);
    Ok(())
}

fn get_depth_test(m: &Material) -> FieldValue { get_flag(m, RenderFlags::DEPTH_TEST) }
fn set_depth_test(m: &mut Material, v: FieldValue) -> Result<()> { set_flag(m, RenderFlags::DEPTH_TEST, v) }
fn get_depth_write(m: &Material) -> FieldValue { get_flag(m, RenderFlags::DEPTH_WRITE) }
fn set_depth_write(m: &mut Material, v: FieldValue) -> Result<()> { set_flag(m, RenderFlags::DEPTH_WRITE, v) }
fn get_blend(m: &Material) -> FieldValue { get_flag(m, RenderFlags::BLEND) }
fn set_blend(m: &mut Material, v: FieldValue) -> Result<()> { set_flag(m, RenderFlags::BLEND, v) }
fn get_cull_back(m: &Material) -> FieldValue { get_flag(m, RenderFlags::CULL_BACK) }
fn set_cull_back(m: &mut Material, v: FieldValue) -> Result<()> { set_flag(m, RenderFlags::CULL_BACK, v) }
fn get_wireframe(m: &Material) -> FieldValue { get_flag(m, RenderFlags::WIREFRAME) }
fn set_wireframe(m: &mut Material, v: FieldValue) -> Result<()> { set_flag(m, RenderFlags::WIREFRAME, v) }

fn get_line_width(m: &Material) -> FieldValue {
    FieldValue::Float(m.render_state.line_width)
}

fn set_line_width(m: &mut Material, value: FieldValue) -> Result<()> {
    m.render_state.line_width = value.as_float()?;
    Ok(())
}

impl Exposed for Material {
    fn fields() -> &'static [FieldDescriptor<Self>] {
        static FIELDS: [FieldDescriptor<Material>; 7] = [
            FieldDescriptor { name: "shader_program", get: get_shader_program, set: set_shader_program },
            FieldDescriptor { name: "depth_test", get: get_depth_test, set: set_depth_test },
            FieldDescriptor { name: "depth_write", get: get_depth_write, set: set_depth_write },
            FieldDescriptor { name: "blend", get: get_blend, set: set_blend },
            FieldDescriptor { name: "cull_back", get: get_cull_back, set: set_cull_back },
            FieldDescriptor { name: "wireframe", get: get_wireframe, set: set_wireframe },
            FieldDescriptor { name: "line_width", get: get_line_width, set: set_line_width },
        ];
        &FIELDS
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
