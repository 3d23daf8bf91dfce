// SPDX-License-Identifier: MIT OR Apache-2.0
//! Image asset table.
//!
//! Images are owned by a table and referenced everywhere else through
//! [`ImageHandle`]s. The converter only needs the narrow [`AssetResolver`]
//! capability: look an image up by name, create a uniformly colored
//! placeholder, and flag an image as packed non-color data.

use crate::error::ConvertError;
use image::{Rgba, Rgba32FImage};
use indexmap::IndexMap;
use matl_convert_graph::ImageHandle;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Well-known default images shipped with the shader library
pub mod defaults {
    /// Opaque white
    pub const WHITE: &str = "/common/shader/sfxpbs/default_white";
    /// Opaque black
    pub const BLACK: &str = "/common/shader/sfxpbs/default_black";
    /// 50% gray
    pub const GRAY: &str = "/common/shader/sfxpbs/default_gray";
    /// Flat tangent-space normal
    pub const NORMAL: &str = "/common/shader/sfxpbs/default_normal";
    /// Neutral packed PRM values
    pub const PARAMS: &str = "/common/shader/sfxpbs/default_params";
    /// Engine cube map placeholder
    pub const CUBE_MAP: &str = "#replace_cubemap";
}

/// Largest width or height of a placeholder image
pub const MAX_PLACEHOLDER_SIZE: u32 = 16384;

/// How pixel values are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColorSpace {
    /// Color data
    #[default]
    Srgb,
    /// Raw data (normals, packed parameters)
    NonColor,
}

/// Image metadata as described by a host or document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Unique image name
    pub name: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Source file, for images loaded from disk
    #[serde(default)]
    pub filepath: Option<PathBuf>,
    /// Color space
    #[serde(default)]
    pub color_space: ColorSpace,
    /// Whether the pixels are embedded rather than referenced
    #[serde(default)]
    pub packed: bool,
}

impl ImageEntry {
    /// Describe an image of the given size
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            filepath: None,
            color_space: ColorSpace::Srgb,
            packed: false,
        }
    }
}

/// An image held by the table
#[derive(Debug, Clone)]
struct StoredImage {
    entry: ImageEntry,
    pixels: Option<Rgba32FImage>,
}

/// Capability the converter uses to reach images
pub trait AssetResolver {
    /// Look up an existing image by name
    fn find(&self, name: &str) -> Option<ImageHandle>;

    /// Create a `width × height` image filled with one RGBA value.
    ///
    /// The created image may be renamed to keep names unique; use the
    /// returned handle rather than the requested name.
    fn create_placeholder(
        &self,
        name: &str,
        width: u32,
        height: u32,
        rgba: [f32; 4],
    ) -> Result<ImageHandle, ConvertError>;

    /// Pack an image and mark it as non-color data
    fn prepare_data_texture(&self, image: &ImageHandle);
}

/// In-memory image table, safe to share between threads
#[derive(Debug, Default)]
pub struct ImageTable {
    images: RwLock<IndexMap<String, StoredImage>>,
}

impl ImageTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table seeded with the shader library's default images
    pub fn with_defaults() -> Self {
        let table = Self::new();
        let seeds = [
            (defaults::WHITE, [1.0, 1.0, 1.0, 1.0]),
            (defaults::BLACK, [0.0, 0.0, 0.0, 1.0]),
            (defaults::GRAY, [0.5, 0.5, 0.5, 1.0]),
            (defaults::NORMAL, [0.5, 0.5, 1.0, 1.0]),
            (defaults::PARAMS, [0.0, 0.5, 1.0, 0.16]),
        ];
        for (name, rgba) in seeds {
            let mut entry = ImageEntry::new(name, 8, 8);
            entry.packed = true;
            table.insert(entry, Some(Rgba32FImage::from_pixel(8, 8, Rgba(rgba))));
        }
        table.register(ImageEntry::new(defaults::CUBE_MAP, 0, 0));
        table
    }

    /// Register an image known by metadata only, replacing any with its name
    pub fn register(&self, entry: ImageEntry) -> ImageHandle {
        self.insert(entry, None)
    }

    fn insert(&self, entry: ImageEntry, pixels: Option<Rgba32FImage>) -> ImageHandle {
        let handle = ImageHandle::new(&entry.name);
        self.images
            .write()
            .insert(entry.name.clone(), StoredImage { entry, pixels });
        handle
    }

    /// Metadata of an image
    pub fn entry(&self, name: &str) -> Option<ImageEntry> {
        self.images.read().get(name).map(|image| image.entry.clone())
    }

    /// Read one pixel of an image that has pixel data
    pub fn pixel(&self, name: &str, x: u32, y: u32) -> Option<[f32; 4]> {
        let images = self.images.read();
        let pixels = images.get(name)?.pixels.as_ref()?;
        if x >= pixels.width() || y >= pixels.height() {
            return None;
        }
        Some(pixels.get_pixel(x, y).0)
    }

    /// Number of images in the table
    pub fn len(&self) -> usize {
        self.images.read().len()
    }

    /// Whether the table holds no images
    pub fn is_empty(&self) -> bool {
        self.images.read().is_empty()
    }

    /// First free name derived from `base`: `base`, `base.001`, `base.002`, ...
    fn unique_name(images: &IndexMap<String, StoredImage>, base: &str) -> String {
        if !images.contains_key(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{base}.{n:03}"))
            .find(|candidate| !images.contains_key(candidate))
            .unwrap_or_else(|| base.to_string())
    }
}

impl AssetResolver for ImageTable {
    fn find(&self, name: &str) -> Option<ImageHandle> {
        self.images
            .read()
            .get(name)
            .map(|image| ImageHandle::new(&image.entry.name))
    }

    fn create_placeholder(
        &self,
        name: &str,
        width: u32,
        height: u32,
        rgba: [f32; 4],
    ) -> Result<ImageHandle, ConvertError> {
        if width == 0 || height == 0 || width > MAX_PLACEHOLDER_SIZE || height > MAX_PLACEHOLDER_SIZE {
            return Err(ConvertError::Placeholder {
                name: name.to_string(),
                reason: format!("invalid size {width}x{height} (max {MAX_PLACEHOLDER_SIZE})"),
            });
        }
        if rgba.iter().any(|c| !c.is_finite()) {
            return Err(ConvertError::Placeholder {
                name: name.to_string(),
                reason: "fill color is not finite".to_string(),
            });
        }

        let pixels = Rgba32FImage::from_pixel(width, height, Rgba(rgba));
        let mut images = self.images.write();
        let unique = Self::unique_name(&images, name);
        let entry = ImageEntry::new(unique.clone(), width, height);
        let handle = ImageHandle::new(&unique);
        images.insert(unique, StoredImage { entry, pixels: Some(pixels) });
        tracing::debug!(image = %handle, width, height, "Created placeholder image");
        Ok(handle)
    }

    fn prepare_data_texture(&self, image: &ImageHandle) {
        if let Some(stored) = self.images.write().get_mut(image.name()) {
            stored.entry.packed = true;
            stored.entry.color_space = ColorSpace::NonColor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_registered() {
        let table = ImageTable::with_defaults();
        assert_eq!(table.find(defaults::WHITE).map(|h| h.name().to_string()).as_deref(), Some(defaults::WHITE));
        assert!(table.find(defaults::BLACK).is_some());
        assert_eq!(table.pixel(defaults::NORMAL, 0, 0), Some([0.5, 0.5, 1.0, 1.0]));
        assert!(table.find("missing").is_none());
    }

    #[test]
    fn test_placeholder_fill_and_unique_names() {
        let table = ImageTable::new();
        let first = table.create_placeholder("Mat_PRM", 4, 4, [0.0, 0.5, 1.0, 0.16]).unwrap();
        let second = table.create_placeholder("Mat_PRM", 4, 4, [0.0, 0.5, 1.0, 0.16]).unwrap();
        assert_eq!(first.name(), "Mat_PRM");
        assert_eq!(second.name(), "Mat_PRM.001");
        assert_eq!(table.pixel("Mat_PRM", 3, 3), Some([0.0, 0.5, 1.0, 0.16]));
        assert_eq!(table.pixel("Mat_PRM", 4, 0), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_placeholder_rejects_empty_size() {
        let table = ImageTable::new();
        let err = table.create_placeholder("Mat_NOR", 0, 16, [0.5, 0.5, 1.0, 1.0]);
        assert!(matches!(err, Err(ConvertError::Placeholder { .. })));
        assert!(table.is_empty());
    }

    #[test]
    fn test_placeholder_rejects_oversized_image() {
        let table = ImageTable::new();
        let err = table.create_placeholder("Mat_PRM", u32::MAX, u32::MAX, [0.0, 0.5, 1.0, 0.16]);
        assert!(matches!(err, Err(ConvertError::Placeholder { .. })));
        let err = table.create_placeholder("Mat_PRM", 4, MAX_PLACEHOLDER_SIZE + 1, [0.0; 4]);
        assert!(matches!(err, Err(ConvertError::Placeholder { .. })));
        assert!(table.is_empty());
        assert!(table.create_placeholder("Mat_PRM", MAX_PLACEHOLDER_SIZE, 1, [0.0; 4]).is_ok());
    }

    #[test]
    fn test_prepare_data_texture() {
        let table = ImageTable::new();
        let handle = table.register(ImageEntry::new("body_nor.png", 2048, 2048));
        table.prepare_data_texture(&handle);
        let entry = table.entry("body_nor.png").unwrap();
        assert!(entry.packed);
        assert_eq!(entry.color_space, ColorSpace::NonColor);
    }
}
