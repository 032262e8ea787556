//! Image loading for sprite data
//!
//! Decodes PNG files into RGBA8 pixels that a surface can blit.

use crate::assets::AssetError;
use std::path::Path;

/// Loaded image data in RGBA8 layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Decode an image file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let decoded = image::open(path)
            .map_err(|e| AssetError::LoadFailed(format!("{}: {}", path.display(), e)))?;
        let loaded = Self::from_dynamic(decoded);
        log::debug!("Loaded sprite {}x{} from {:?}", loaded.width, loaded.height, path);
        Ok(loaded)
    }

    /// Decode an image held in memory, e.g. from `include_bytes!`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("in-memory image: {}", e)))?;
        Ok(Self::from_dynamic(decoded))
    }

    /// Single-color placeholder sprite
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = width as usize * height as usize;
        Self {
            data: color.repeat(pixel_count),
            width,
            height,
        }
    }

    fn from_dynamic(decoded: image::DynamicImage) -> Self {
        let rgba = decoded.into_rgba8();
        let (width, height) = rgba.dimensions();
        Self {
            data: rgba.into_raw(),
            width,
            height,
        }
    }

    /// RGBA value of one pixel, `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y * self.width + x) * 4) as usize;
        let px = self.data.get(offset..offset + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}
