use crate::{
    foundation::{
        core::{Rgba8, Size},
        error::{StackError, StackResult},
        math::mul_div255_u16,
    },
    raster::frame::RasterImage,
};

/// How a placement's pixels combine with what is already on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaceMode {
    /// Straight-alpha source-over compositing. Opaque source pixels overwrite.
    #[default]
    Over,
    /// Overwrite the target rectangle verbatim, alpha included.
    Copy,
}

/// An instruction to copy `image` into a canvas with its top-left corner at `(left, top)`.
#[derive(Clone, Copy, Debug)]
pub struct Placement<'a> {
    /// Source pixels.
    pub image: &'a RasterImage,
    /// Top offset in canvas pixels.
    pub top: u32,
    /// Left offset in canvas pixels.
    pub left: u32,
    /// Pixel combination rule.
    pub mode: PlaceMode,
}

impl<'a> Placement<'a> {
    /// Source-over placement at `(left, top)`.
    pub fn new(image: &'a RasterImage, top: u32, left: u32) -> Self {
        Self {
            image,
            top,
            left,
            mode: PlaceMode::Over,
        }
    }

    /// Same placement, overwriting instead of compositing.
    pub fn copy(self) -> Self {
        Self {
            mode: PlaceMode::Copy,
            ..self
        }
    }
}

/// A mutable RGBA8 buffer of fixed size, pre-filled with a background color.
///
/// Placements must lie entirely inside the canvas. An out-of-bounds placement is rejected with
/// [`StackError::InvalidArgument`] and leaves the buffer untouched; nothing is clipped.
#[derive(Debug)]
pub struct Canvas {
    size: Size,
    background: Rgba8,
    data: Vec<u8>,
}

impl Canvas {
    /// Allocate a `width x height` canvas filled with `background`.
    ///
    /// Fails with [`StackError::ResourceExhausted`] when the buffer cannot be allocated.
    pub fn new(width: u32, height: u32, background: Rgba8) -> StackResult<Self> {
        let size = Size::new(width, height);
        if size.is_empty() {
            return Err(StackError::invalid_argument(format!(
                "canvas dimensions must be positive, got {size}"
            )));
        }
        let len = size.rgba8_len()?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| StackError::resource_exhausted(format!("allocate {size} canvas: {e}")))?;
        let px = background.to_array();
        for _ in 0..len / 4 {
            data.extend_from_slice(&px);
        }
        Ok(Self {
            size,
            background,
            data,
        })
    }

    /// Canvas dimensions.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Fill color the canvas was created with.
    pub fn background(&self) -> Rgba8 {
        self.background
    }

    /// Apply one placement.
    pub fn place(&mut self, placement: &Placement<'_>) -> StackResult<()> {
        let img = placement.image;
        let right = u64::from(placement.left) + u64::from(img.width());
        let bottom = u64::from(placement.top) + u64::from(img.height());
        if right > u64::from(self.size.width) || bottom > u64::from(self.size.height) {
            return Err(StackError::invalid_argument(format!(
                "placement of {} at ({}, {}) exceeds {} canvas",
                img.size(),
                placement.left,
                placement.top,
                self.size
            )));
        }

        let stride = self.size.width as usize * 4;
        let row_len = img.width() as usize * 4;
        for y in 0..img.height() {
            let start = (placement.top + y) as usize * stride + placement.left as usize * 4;
            let dst = &mut self.data[start..start + row_len];
            let src = img.row(y);
            match placement.mode {
                PlaceMode::Copy => dst.copy_from_slice(src),
                PlaceMode::Over => {
                    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
                        d.copy_from_slice(&out);
                    }
                }
            }
        }
        Ok(())
    }

    /// Apply placements in order.
    pub fn place_all(&mut self, placements: &[Placement<'_>]) -> StackResult<()> {
        for placement in placements {
            self.place(placement)?;
        }
        Ok(())
    }

    /// Freeze the canvas into an immutable raster.
    pub fn finalize(self) -> StackResult<RasterImage> {
        RasterImage::new(self.size.width, self.size.height, self.data)
    }
}

/// Straight-alpha `src over dst`.
pub(crate) fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    match src[3] {
        255 => return src,
        0 => return dst,
        _ => {}
    }

    let sa = u16::from(src[3]);
    let da_inv = mul_div255_u16(u16::from(dst[3]), 255 - sa);
    let out_a = u32::from(sa + da_inv);

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = u32::from(src[i]) * u32::from(sa) + u32::from(dst[i]) * u32::from(da_inv);
        out[i] = ((c + out_a / 2) / out_a).min(255) as u8;
    }
    out[3] = out_a.min(255) as u8;
    out
}

#[cfg(test)]
#[path = "../../tests/unit/raster/canvas.rs"]
mod tests;
