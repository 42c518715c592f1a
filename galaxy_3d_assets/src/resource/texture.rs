/// Resource-level texture type.
///
/// A `Texture` is CPU-side pixel storage plus its dimensions and format.
/// Uploading to the GPU is the rendering backend's business; the resource
/// system only tracks residency and byte size.

use std::any::Any;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};
use crate::resource::base::{Resource, ResourceInfo, ResourceKind};

// ===== FORMAT =====

/// Pixel layout of a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextureFormat {
    R8,
    Rg8,
    Rgb8,
    #[default]
    Rgba8,
}

impl TextureFormat {
    /// Bytes per pixel
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            TextureFormat::R8 => 1,
            TextureFormat::Rg8 => 2,
            TextureFormat::Rgb8 => 3,
            TextureFormat::Rgba8 => 4,
        }
    }
}

// ===== TEXTURE =====

/// 2D texture resource
pub struct Texture {
    info: ResourceInfo,
    width: u32,
    height: u32,
    format: TextureFormat,
    pixels: Vec<u8>,
}

impl Texture {
    /// Create an empty texture (not in memory)
    pub fn new() -> Self {
        Self {
            info: ResourceInfo::new(ResourceKind::Texture),
            width: 0,
            height: 0,
            format: TextureFormat::default(),
            pixels: Vec::new(),
        }
    }

    /// Create a texture from raw pixels
    pub fn from_pixels(width: u32, height: u32, format: TextureFormat, pixels: Vec<u8>) -> Result<Self> {
        let mut texture = Self::new();
        texture.set_pixels(width, height, format, pixels)?;
        Ok(texture)
    }

    /// Create a texture filled with a single RGBA color
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let pixels = rgba.iter().copied().cycle().take(count * 4).collect();
        let mut texture = Self::new();
        texture.width = width;
        texture.height = height;
        texture.pixels = pixels;
        texture
    }

    /// Create an RGBA checkerboard with 1-pixel cells
    pub fn checkerboard(width: u32, height: u32, even: [u8; 4], odd: [u8; 4]) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let color = if (x + y) % 2 == 0 { even } else { odd };
                pixels.extend_from_slice(&color);
            }
        }
        let mut texture = Self::new();
        texture.width = width;
        texture.height = height;
        texture.pixels = pixels;
        texture
    }

    /// Replace the pixel payload
    ///
    /// Fails if `pixels.len()` does not match `width * height * bpp`.
    pub fn set_pixels(&mut self, width: u32, height: u32, format: TextureFormat, pixels: Vec<u8>) -> Result<()> {
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if pixels.len() != expected {
            return Err(Error::InvalidResource(format!(
                "texture {}x{} {:?} expects {} bytes, got {}",
                width, height, format, expected, pixels.len()
            )));
        }
        self.width = width;
        self.height = height;
        self.format = format;
        self.pixels = pixels;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> TextureFormat {
        self.format
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Bytes of the pixel at (x, y), or None when out of bounds or unloaded
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let start = (y as usize * self.width as usize + x as usize) * bpp;
        self.pixels.get(start..start + bpp)
    }
}

impl Default for Texture {
    fn default() -> Self {
        Self::new()
    }
}

impl Resource for Texture {
    fn info(&self) -> &ResourceInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ResourceInfo {
        &mut self.info
    }

    fn footprint(&self) -> u64 {
        self.pixels.len() as u64
    }

    fn release(&mut self) {
        self.pixels = Vec::new();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
