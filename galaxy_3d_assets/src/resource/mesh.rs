//! Resource-level mesh type.
//!
//! A `Mesh` holds indexed triangle geometry on the CPU side:
//!
//! ```text
//! Mesh
//! ├── positions (Vec3, required)
//! ├── normals   (Vec3, empty or one per vertex)
//! ├── uvs       (Vec2, empty or one per vertex)
//! └── indices   (u32, triangle list)
//! ```
//!
//! The byte size is computed from the raw vertex/index storage.

use std::any::Any;
use glam::{Vec2, Vec3};
use crate::error::{Error, Result};
use crate::resource::base::{Resource, ResourceInfo, ResourceKind};

// ============================================================================
// BOUNDS
// ============================================================================

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Smallest box enclosing all points (None when empty)
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points.iter().fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }
}

// ============================================================================
// MESH
// ============================================================================

/// Triangle mesh resource
pub struct Mesh {
    info: ResourceInfo,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    indices: Vec<u32>,
    bounds: Option<Aabb>,
}

impl Mesh {
    /// Create an empty mesh (not in memory)
    pub fn new() -> Self {
        Self {
            info: ResourceInfo::new(ResourceKind::Mesh),
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
            bounds: None,
        }
    }

    /// Unit quad in the XY plane, facing +Z
    pub fn quad() -> Self {
        let mut mesh = Self::new();
        let positions = vec![
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
            Vec3::new(-0.5, 0.5, 0.0),
        ];
        let normals = vec![Vec3::Z; 4];
        let uvs = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let indices = vec![0, 1, 2, 2, 3, 0];
        mesh.positions = positions;
        mesh.normals = normals;
        mesh.uvs = uvs;
        mesh.indices = indices;
        mesh.bounds = Aabb::from_points(&mesh.positions);
        mesh
    }

    /// Replace the geometry
    ///
    /// `normals` and `uvs` must be empty or have one entry per position;
    /// `indices` must form whole triangles and reference existing vertices.
    pub fn set_geometry(
        &mut self,
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        uvs: Vec<Vec2>,
        indices: Vec<u32>,
    ) -> Result<()> {
        let vertex_count = positions.len();
        if !normals.is_empty() && normals.len() != vertex_count {
            return Err(Error::InvalidResource(format!(
                "mesh has {} positions but {} normals", vertex_count, normals.len()
            )));
        }
        if !uvs.is_empty() && uvs.len() != vertex_count {
            return Err(Error::InvalidResource(format!(
                "mesh has {} positions but {} uvs", vertex_count, uvs.len()
            )));
        }
        if indices.len() % 3 != 0 {
            return Err(Error::InvalidResource(format!(
                "index count {} is not a multiple of 3", indices.len()
            )));
        }
        if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(Error::InvalidResource(format!(
                "index {} out of range ({} vertices)", bad, vertex_count
            )));
        }

        self.bounds = Aabb::from_points(&positions);
        self.positions = positions;
        self.normals = normals;
        self.uvs = uvs;
        self.indices = indices;
        Ok(())
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Resource for Mesh {
    fn info(&self) -> &ResourceInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ResourceInfo {
        &mut self.info
    }

    fn footprint(&self) -> u64 {
        let bytes = bytemuck::cast_slice::<Vec3, u8>(&self.positions).len()
            + bytemuck::cast_slice::<Vec3, u8>(&self.normals).len()
            + bytemuck::cast_slice::<Vec2, u8>(&self.uvs).len()
            + bytemuck::cast_slice::<u32, u8>(&self.indices).len();
        bytes as u64
    }

    fn release(&mut self) {
        self.positions = Vec::new();
        self.normals = Vec::new();
        self.uvs = Vec::new();
        self.indices = Vec::new();
        self.bounds = None;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
