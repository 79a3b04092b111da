use image::imageops::FilterType;
use rayon::prelude::*;

use crate::{
    foundation::{
        core::{Rgba8, Size},
        error::{StackError, StackResult},
    },
    layout::geometry::{Offset, group_sizes, max_extent, span},
    raster::{
        canvas::{Canvas, Placement},
        frame::RasterImage,
        resize::fit_contain,
    },
};

/// Validated configuration for [`compose_grid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayoutSpec {
    columns: u32,
    spacing: u32,
    background: Rgba8,
    filter: FilterType,
}

impl GridLayoutSpec {
    /// Create a grid spec. `columns` must be at least 1.
    pub fn new(columns: u32, spacing: u32, background: Rgba8) -> StackResult<Self> {
        if columns == 0 {
            return Err(StackError::invalid_argument("grid columns must be >= 1"));
        }
        Ok(Self {
            columns,
            spacing,
            background,
            filter: FilterType::Lanczos3,
        })
    }

    /// Override the resampling filter used when fitting images into cells.
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    /// Column count.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Pixels between adjacent cells.
    pub fn spacing(&self) -> u32 {
        self.spacing
    }

    /// Canvas and cell padding color.
    pub fn background(&self) -> Rgba8 {
        self.background
    }

    /// Resampling filter for contain resizes.
    pub fn filter(&self) -> FilterType {
        self.filter
    }
}

/// Resolved grid geometry for one group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridLayout {
    /// Column count (from the spec, even when the group is smaller).
    pub columns: u32,
    /// `ceil(images / columns)`.
    pub rows: u32,
    /// Per-axis maximum image size.
    pub cell: Size,
    /// Full canvas size including spacing.
    pub canvas: Size,
    /// Top-left corner of each image's cell, in group order.
    pub cells: Vec<Offset>,
}

impl GridLayout {
    /// Lay out `sizes` row-major into the grid described by `spec`.
    pub fn compute(sizes: &[Size], spec: &GridLayoutSpec) -> StackResult<Self> {
        if sizes.is_empty() {
            return Err(StackError::invalid_argument(
                "grid layout needs at least one image",
            ));
        }
        let cell = max_extent(sizes);
        if cell.is_empty() {
            return Err(StackError::invalid_argument(format!(
                "grid cell must be positive, got {cell}"
            )));
        }

        let count = sizes.len() as u64;
        let columns = u64::from(spec.columns);
        let rows = count.div_ceil(columns);
        let canvas = Size::new(
            span(columns, cell.width, spec.spacing)?,
            span(rows, cell.height, spec.spacing)?,
        );

        let pitch_x = u64::from(cell.width) + u64::from(spec.spacing);
        let pitch_y = u64::from(cell.height) + u64::from(spec.spacing);
        let cells = (0..count)
            .map(|i| {
                let (row, col) = (i / columns, i % columns);
                // Bounded by the canvas span computed above.
                Offset::new((col * pitch_x) as u32, (row * pitch_y) as u32)
            })
            .collect();

        Ok(Self {
            columns: spec.columns,
            rows: rows as u32,
            cell,
            canvas,
            cells,
        })
    }
}

/// Compose a group into a row-major grid mosaic.
///
/// Every image is contain-fitted into a cell sized to the group's largest width and height and
/// centered there; unused trailing cells stay background. Fitting runs in parallel, placement
/// runs in group order on a single canvas.
#[tracing::instrument(skip_all, fields(images = group.len(), columns = spec.columns))]
pub fn compose_grid(group: &[RasterImage], spec: &GridLayoutSpec) -> StackResult<RasterImage> {
    let sizes = group_sizes(group)?;
    let layout = GridLayout::compute(&sizes, spec)?;
    tracing::debug!(
        rows = layout.rows,
        cell = %layout.cell,
        canvas = %layout.canvas,
        "grid layout resolved"
    );

    let mut canvas = Canvas::new(layout.canvas.width, layout.canvas.height, spec.background)?;

    let fitted = group
        .par_iter()
        .map(|img| fit_contain(img, layout.cell, spec.filter))
        .collect::<StackResult<Vec<_>>>()?;

    let placements = fitted
        .iter()
        .zip(&layout.cells)
        .map(|((img, inner), origin)| {
            Placement::new(img, origin.top + inner.top, origin.left + inner.left)
        })
        .collect::<Vec<_>>();
    canvas.place_all(&placements)?;
    canvas.finalize()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
