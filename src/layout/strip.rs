use std::cmp::Ordering;

use crate::{
    foundation::{
        core::{AspectRatio, Rgba8, Size},
        error::{StackError, StackResult},
        math::div_round,
    },
    layout::geometry::{Offset, center_offset, group_sizes, max_extent, to_px},
    raster::{
        canvas::{Canvas, Placement},
        frame::RasterImage,
    },
};

/// Configuration for [`compose_strip`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StripLayoutSpec {
    spacing: u32,
    background: Rgba8,
    aspect_ratio: Option<AspectRatio>,
}

impl StripLayoutSpec {
    /// Strip with `spacing` pixels between images and no target aspect ratio.
    pub fn new(spacing: u32, background: Rgba8) -> Self {
        Self {
            spacing,
            background,
            aspect_ratio: None,
        }
    }

    /// Grow the canvas to `ratio` around the stacked content.
    pub fn with_aspect_ratio(mut self, ratio: Option<AspectRatio>) -> Self {
        self.aspect_ratio = ratio;
        self
    }

    /// Pixels between vertically adjacent images.
    pub fn spacing(&self) -> u32 {
        self.spacing
    }

    /// Canvas fill color.
    pub fn background(&self) -> Rgba8 {
        self.background
    }

    /// Optional target width:height of the canvas.
    pub fn aspect_ratio(&self) -> Option<AspectRatio> {
        self.aspect_ratio
    }
}

/// Resolved strip geometry for one group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StripLayout {
    /// Bounding box of the stacked images: max width by summed heights plus spacing.
    pub content: Size,
    /// Canvas size, equal to `content` or grown on one axis to the target ratio.
    pub canvas: Size,
    /// Where the content block sits inside the canvas.
    pub content_offset: Offset,
    /// Top-left corner of each image, in group order.
    pub images: Vec<Offset>,
}

impl StripLayout {
    /// Stack `sizes` vertically according to `spec`.
    pub fn compute(sizes: &[Size], spec: &StripLayoutSpec) -> StackResult<Self> {
        if sizes.is_empty() {
            return Err(StackError::invalid_argument(
                "strip layout needs at least one image",
            ));
        }

        let width = max_extent(sizes).width;
        let heights = sizes.iter().map(|s| u128::from(s.height)).sum::<u128>();
        let gaps = (sizes.len() as u128 - 1) * u128::from(spec.spacing);
        let content = Size::new(width, to_px(heights + gaps, "strip content height")?);
        if content.is_empty() {
            return Err(StackError::invalid_argument(format!(
                "strip content must be positive, got {content}"
            )));
        }

        let canvas = canvas_for_aspect(content, spec.aspect_ratio)?;
        let content_offset = Offset::new(
            center_offset(canvas.width, content.width)?,
            center_offset(canvas.height, content.height)?,
        );

        let mut images = Vec::with_capacity(sizes.len());
        let mut cursor = u64::from(content_offset.top);
        for size in sizes {
            let left = content_offset.left + center_offset(content.width, size.width)?;
            images.push(Offset::new(left, to_px(u128::from(cursor), "strip cursor")?));
            cursor += u64::from(size.height) + u64::from(spec.spacing);
        }

        Ok(Self {
            content,
            canvas,
            content_offset,
            images,
        })
    }
}

/// Grow `content` on at most one axis so that `width:height` matches `ratio`.
///
/// The comparison is exact (`width * ratio.height` against `height * ratio.width`), so a
/// content block already at the target ratio is returned unchanged. The grown axis is rounded
/// half-up; the canvas never shrinks below `content`.
pub fn canvas_for_aspect(content: Size, ratio: Option<AspectRatio>) -> StackResult<Size> {
    let Some(ratio) = ratio else {
        return Ok(content);
    };
    let (cw, ch) = (u128::from(content.width), u128::from(content.height));
    let (rw, rh) = (u128::from(ratio.width()), u128::from(ratio.height()));

    match (cw * rh).cmp(&(ch * rw)) {
        Ordering::Greater => {
            let height = to_px(div_round(cw * rh, rw), "aspect canvas height")?;
            Ok(Size::new(content.width, height))
        }
        Ordering::Less => {
            let width = to_px(div_round(ch * rw, rh), "aspect canvas width")?;
            Ok(Size::new(width, content.height))
        }
        Ordering::Equal => Ok(content),
    }
}

/// Compose a group into one vertical strip.
///
/// Images keep their native resolution. Each is centered horizontally over the widest image;
/// the whole block is centered in a canvas that may be grown to a target aspect ratio.
#[tracing::instrument(skip_all, fields(images = group.len(), spacing = spec.spacing))]
pub fn compose_strip(group: &[RasterImage], spec: &StripLayoutSpec) -> StackResult<RasterImage> {
    let sizes = group_sizes(group)?;
    let layout = StripLayout::compute(&sizes, spec)?;
    tracing::debug!(
        content = %layout.content,
        canvas = %layout.canvas,
        offset_x = layout.content_offset.left,
        offset_y = layout.content_offset.top,
        aspect_ratio = spec.aspect_ratio.map(|r| r.as_f64()),
        "strip layout resolved"
    );

    let mut canvas = Canvas::new(layout.canvas.width, layout.canvas.height, spec.background)?;
    let placements = group
        .iter()
        .zip(&layout.images)
        .map(|(img, at)| Placement::new(img, at.top, at.left))
        .collect::<Vec<_>>();
    canvas.place_all(&placements)?;
    canvas.finalize()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/strip.rs"]
mod tests;
