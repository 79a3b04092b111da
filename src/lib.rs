//! slidestack composes rendered document pages into grid mosaics and long vertical strips.
//!
//! The library works on already-decoded RGBA rasters. Rendering office or PDF documents into
//! pages is delegated to an injected [`PageSource`].
//!
//! # Pipeline overview
//!
//! 1. **Render**: `PageSource + document -> Vec<RasterImage>` (one raster per page)
//! 2. **Batch**: [`partition`] splits the pages into contiguous, order-preserving groups
//! 3. **Compose**: each group becomes one image via [`compose_grid`] or [`compose_strip`]
//! 4. **Sink** (optional): [`CompositeSink`] receives composites in group order, e.g.
//!    [`PngDirSink`] writes `grid-2x2-1.png`, `merged-1.png`, ...
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same group and layout spec always produce identical pixels. All
//!   rounding is exact integer arithmetic.
//! - **Straight-alpha RGBA8** end-to-end.
//! - **Fresh canvas per call**: composers keep no state between calls, so independent groups
//!   can be composed on separate worker threads.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod batch;
mod foundation;
mod layout;
mod pipeline;
mod raster;

pub use batch::partition::{group_count, partition};
pub use foundation::core::{AspectRatio, Rgba8, Size};
pub use foundation::error::{StackError, StackResult};
pub use image::imageops::FilterType;
pub use layout::geometry::Offset;
pub use layout::grid::{GridLayout, GridLayoutSpec, compose_grid};
pub use layout::strip::{StripLayout, StripLayoutSpec, canvas_for_aspect, compose_strip};
pub use pipeline::compose::{
    CancelToken, ComposeOutput, ComposeStats, ComposeThreading, ComposedImage, compose_batches,
    compose_document,
};
pub use pipeline::opts::{ComposeMode, ComposeOpts, ComposePlan, Composer, DEFAULT_SPACING};
pub use pipeline::sink::{CompositeSink, InMemorySink, PngDirSink, encode_png};
pub use pipeline::source::{ImageDirSource, PageSource, decode_image, load_image};
pub use raster::canvas::{Canvas, PlaceMode, Placement};
pub use raster::frame::RasterImage;
pub use raster::resize::{contain_size, fit_contain, resize_contain, resize_exact};
