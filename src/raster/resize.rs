use image::imageops::FilterType;

use crate::{
    foundation::{
        core::{Rgba8, Size},
        error::{StackError, StackResult},
        math::div_round,
    },
    layout::geometry::{Offset, center_offset},
    raster::{
        canvas::{Canvas, Placement},
        frame::RasterImage,
    },
};

/// Largest size with `src`'s aspect ratio that fits inside `cell`.
///
/// The constrained axis matches the cell exactly; the other axis is rounded half-up and never
/// drops below one pixel.
pub fn contain_size(src: Size, cell: Size) -> Size {
    let (sw, sh) = (u128::from(src.width), u128::from(src.height));
    let (cw, ch) = (u128::from(cell.width), u128::from(cell.height));
    if sw == 0 || sh == 0 {
        return Size::new(0, 0);
    }

    if sw * ch <= sh * cw {
        let w = div_round(sw * ch, sh).clamp(1, cw.max(1));
        Size::new(w as u32, cell.height)
    } else {
        let h = div_round(sh * cw, sw).clamp(1, ch.max(1));
        Size::new(cell.width, h as u32)
    }
}

/// Resample `img` to exactly `size`, ignoring aspect ratio.
pub fn resize_exact(
    img: &RasterImage,
    size: Size,
    filter: FilterType,
) -> StackResult<RasterImage> {
    if size.is_empty() {
        return Err(StackError::invalid_argument(format!(
            "resize target must be positive, got {size}"
        )));
    }
    if img.size() == size {
        return Ok(img.clone());
    }
    let src = img.to_rgba_image()?;
    let out = image::imageops::resize(&src, size.width, size.height, filter);
    RasterImage::try_from(out)
}

/// Scale `img` to fit inside `cell` and report where the scaled image sits in the cell.
///
/// The scaled image is centered on the unconstrained axis. Images already matching the cell
/// are returned as-is without resampling.
pub fn fit_contain(
    img: &RasterImage,
    cell: Size,
    filter: FilterType,
) -> StackResult<(RasterImage, Offset)> {
    if cell.is_empty() {
        return Err(StackError::invalid_argument(format!(
            "contain cell must be positive, got {cell}"
        )));
    }
    let fitted = contain_size(img.size(), cell);
    let scaled = resize_exact(img, fitted, filter)?;
    let offset = Offset::new(
        center_offset(cell.width, fitted.width)?,
        center_offset(cell.height, fitted.height)?,
    );
    Ok((scaled, offset))
}

/// Scale `img` to fit inside `cell` and pad the rest of the cell with `background`.
///
/// The result is always exactly `cell` in size with the scaled image centered. Nothing is
/// cropped and the aspect ratio is kept. The input is never modified.
pub fn resize_contain(
    img: &RasterImage,
    cell: Size,
    background: Rgba8,
    filter: FilterType,
) -> StackResult<RasterImage> {
    let (scaled, offset) = fit_contain(img, cell, filter)?;
    let mut canvas = Canvas::new(cell.width, cell.height, background)?;
    canvas.place(&Placement::new(&scaled, offset.top, offset.left))?;
    canvas.finalize()
}

#[cfg(test)]
#[path = "../../tests/unit/raster/resize.rs"]
mod tests;
