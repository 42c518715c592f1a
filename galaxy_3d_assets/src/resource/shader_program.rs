//! Shader program resource.
//!
//! Holds per-stage source text. Compilation belongs to the rendering
//! backend; the resource system only stores, accounts for and releases the
//! sources.

use std::any::Any;
use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::resource::base::{Resource, ResourceInfo, ResourceKind};

/// Pipeline stage a source belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShaderStage {
    Vertex,
    Geometry,
    Fragment,
    Compute,
}

/// Shader program resource (stage sources)
pub struct ShaderProgram {
    info: ResourceInfo,
    stages: BTreeMap<ShaderStage, String>,
}

impl ShaderProgram {
    /// Create an empty program (not in memory)
    pub fn new() -> Self {
        Self {
            info: ResourceInfo::new(ResourceKind::ShaderProgram),
            stages: BTreeMap::new(),
        }
    }

    /// Set the source of a stage, returning the previous source
    pub fn set_stage_source(&mut self, stage: ShaderStage, source: impl Into<String>) -> Option<String> {
        self.stages.insert(stage, source.into())
    }

    pub fn stage_source(&self, stage: ShaderStage) -> Option<&str> {
        self.stages.get(&stage).map(String::as_str)
    }

    /// Stages with a source, in pipeline order
    pub fn stages(&self) -> impl Iterator<Item = ShaderStage> + '_ {
        self.stages.keys().copied()
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

impl Default for ShaderProgram {
    fn default() -> Self {
        Self::new()
    }
}

impl Resource for ShaderProgram {
    fn info(&self) -> &ResourceInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ResourceInfo {
        &mut self.info
    }

    fn footprint(&self) -> u64 {
        self.stages.values().map(|source| source.len() as u64).sum()
    }

    fn release(&mut self) {
        self.stages.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "shader_program_tests.rs"]
mod tests;
