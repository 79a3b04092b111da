use std::sync::Arc;

use crate::{
    foundation::{
        core::{Rgba8, Size},
        error::{StackError, StackResult},
    },
    raster::canvas::Canvas,
};

/// An immutable straight-alpha RGBA8 raster.
///
/// Pixels are tightly packed and row-major. Clones share the pixel buffer, so handing a page to
/// several composers never copies it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    data: Arc<Vec<u8>>,
}

impl RasterImage {
    /// Wrap an RGBA8 buffer, validating positive dimensions and `len == width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> StackResult<Self> {
        let size = Size::new(width, height);
        if size.is_empty() {
            return Err(StackError::invalid_argument(format!(
                "raster dimensions must be positive, got {size}"
            )));
        }
        let expected = size.rgba8_len()?;
        if data.len() != expected {
            return Err(StackError::invalid_argument(format!(
                "raster {size} expects {expected} rgba8 bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data: Arc::new(data),
        })
    }

    /// A raster filled with a single color.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> StackResult<Self> {
        Canvas::new(width, height, color)?.finalize()
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as a [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Raw RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// One row of RGBA8 bytes.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * 4;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Pixel at `(x, y)`, or `None` when outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[idx..idx + 4];
        Some(Rgba8::from_array([px[0], px[1], px[2], px[3]]))
    }

    /// Convert into an [`image::RgbaImage`], copying only when the buffer is shared.
    pub fn into_rgba_image(self) -> StackResult<image::RgbaImage> {
        let (width, height) = (self.width, self.height);
        let data = Arc::try_unwrap(self.data).unwrap_or_else(|shared| (*shared).clone());
        image::RgbaImage::from_raw(width, height, data).ok_or_else(|| {
            StackError::codec(format!("rgba buffer does not match {width}x{height}"))
        })
    }

    /// Borrow as an [`image::RgbaImage`] by copying the pixels.
    pub fn to_rgba_image(&self) -> StackResult<image::RgbaImage> {
        self.clone().into_rgba_image()
    }
}

impl TryFrom<image::RgbaImage> for RasterImage {
    type Error = StackError;

    fn try_from(img: image::RgbaImage) -> Result<Self, Self::Error> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }
}

impl TryFrom<image::DynamicImage> for RasterImage {
    type Error = StackError;

    fn try_from(img: image::DynamicImage) -> Result<Self, Self::Error> {
        Self::try_from(img.to_rgba8())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/frame.rs"]
mod tests;
