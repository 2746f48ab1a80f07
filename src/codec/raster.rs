//! Image codec over the `image` crate.

use std::{io::Cursor, path::Path};

use anyhow::Context;
use image::{DynamicImage, ImageFormat, ImageOutputFormat, RgbaImage};

use crate::codec::ImageCodec;

/// Image codec for every format the `image` crate reads.
#[derive(Default, Debug, Clone, Copy)]
pub struct ImageCrateCodec;

impl ImageCrateCodec {
    /// Creates a new `ImageCrateCodec`.
    pub fn new() -> Self {
        Self
    }
}

impl ImageCodec for ImageCrateCodec {
    fn decode_image(&self, path: &Path) -> anyhow::Result<RgbaImage> {
        let image = image::open(path).with_context(|| format!("Failed to open image {:?}", path))?;
        Ok(image.to_rgba8())
    }
}

/// Returns whether the path names an image format rather than a model.
pub fn is_image_path(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok()
}

/// Encodes an RGBA image as PNG.
pub fn encode_png(image: &RgbaImage) -> anyhow::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image.clone())
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .context("Failed to encode PNG")?;
    Ok(bytes)
}

/// Decodes a PNG to RGBA.
pub fn decode_png(bytes: &[u8]) -> anyhow::Result<RgbaImage> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .context("Failed to decode PNG")?;
    Ok(image.to_rgba8())
}
