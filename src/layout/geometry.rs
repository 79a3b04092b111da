use crate::{
    foundation::{
        core::Size,
        error::{StackError, StackResult},
        math::half_round,
    },
    raster::frame::RasterImage,
};

/// Top-left position of a placement in canvas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    /// Distance from the left canvas edge.
    pub left: u32,
    /// Distance from the top canvas edge.
    pub top: u32,
}

impl Offset {
    /// Build an offset.
    pub fn new(left: u32, top: u32) -> Self {
        Self { left, top }
    }
}

/// Validate a group and collect its image sizes in order.
///
/// Groups must be non-empty. [`RasterImage`] already guarantees positive dimensions, but the
/// check is repeated here so layout math never sees a zero extent.
pub(crate) fn group_sizes(group: &[RasterImage]) -> StackResult<Vec<Size>> {
    if group.is_empty() {
        return Err(StackError::invalid_argument(
            "cannot compose an empty image group",
        ));
    }
    group
        .iter()
        .enumerate()
        .map(|(idx, img)| {
            let size = img.size();
            if size.is_empty() {
                return Err(StackError::invalid_argument(format!(
                    "image {idx} in group has non-positive dimensions {size}"
                )));
            }
            Ok(size)
        })
        .collect()
}

/// Per-axis maximum over `sizes`.
pub(crate) fn max_extent(sizes: &[Size]) -> Size {
    sizes.iter().fold(Size::new(0, 0), |acc, s| {
        Size::new(acc.width.max(s.width), acc.height.max(s.height))
    })
}

/// `round((outer - inner) / 2)`; `inner` must not exceed `outer`.
pub(crate) fn center_offset(outer: u32, inner: u32) -> StackResult<u32> {
    let spare = outer.checked_sub(inner).ok_or_else(|| {
        StackError::invalid_argument(format!("cannot center {inner}px inside {outer}px"))
    })?;
    Ok(half_round(u64::from(spare)) as u32)
}

/// `n * extent + (n - 1) * spacing`, checked against the `u32` pixel range.
pub(crate) fn span(n: u64, extent: u32, spacing: u32) -> StackResult<u32> {
    let total = n
        .checked_mul(u64::from(extent))
        .and_then(|v| v.checked_add(n.saturating_sub(1).checked_mul(u64::from(spacing))?));
    total
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| {
            StackError::resource_exhausted(format!(
                "layout span of {n} x {extent}px with {spacing}px spacing overflows"
            ))
        })
}

pub(crate) fn to_px(v: u128, what: &str) -> StackResult<u32> {
    u32::try_from(v)
        .map_err(|_| StackError::resource_exhausted(format!("{what} of {v}px overflows")))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
