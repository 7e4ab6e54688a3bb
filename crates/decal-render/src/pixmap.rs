#![forbid(unsafe_code)]

//! The RGBA raster handle produced by an export.
//!
//! A [`Pixmap`] wraps an `image::RgbaImage` so callers get pixel access and
//! PNG persistence without touching the codec crate directly.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::RenderError;

/// An owned RGBA8 raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
    image: RgbaImage,
}

impl Pixmap {
    /// Allocate a raster filled with `background`. Zero dimensions are
    /// bumped to one pixel.
    #[must_use]
    pub fn new(width: u32, height: u32, background: [u8; 4]) -> Self {
        Self {
            image: RgbaImage::from_pixel(width.max(1), height.max(1), Rgba(background)),
        }
    }

    /// Decode a PNG (or any registered codec) into a raster.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RenderError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self { image })
    }

    /// Raster width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Raster height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// One pixel as RGBA bytes.
    ///
    /// # Panics
    /// Panics when `(x, y)` is outside the raster.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    /// Borrow the backing image buffer.
    #[inline]
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    #[inline]
    pub(crate) fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    /// Unwrap into the backing image buffer.
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Encode the raster as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut out = Cursor::new(Vec::new());
        self.image.write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }

    /// Encode as PNG and write to `path`.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let bytes = self.encode_png()?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

impl From<RgbaImage> for Pixmap {
    fn from(image: RgbaImage) -> Self {
        Self { image }
    }
}
