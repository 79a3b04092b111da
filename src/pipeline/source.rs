use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::imageops::FilterType;
use rayon::prelude::*;

use crate::{
    foundation::{
        core::Size,
        error::{StackError, StackResult},
    },
    raster::{frame::RasterImage, resize::resize_exact},
};

/// Renders a document into ordered page rasters.
///
/// Rasterizing office or PDF documents is left to the caller; the composition pipeline only
/// needs the resulting pages. Closures `Fn(&Path, f32) -> StackResult<Vec<RasterImage>>`
/// implement this trait, which keeps tests and embedders free of any rendering backend.
pub trait PageSource {
    /// Render every page of `document` at `scale` (1.0 = native resolution).
    fn render_pages(&self, document: &Path, scale: f32) -> StackResult<Vec<RasterImage>>;
}

impl<F> PageSource for F
where
    F: Fn(&Path, f32) -> StackResult<Vec<RasterImage>>,
{
    fn render_pages(&self, document: &Path, scale: f32) -> StackResult<Vec<RasterImage>> {
        self(document, scale)
    }
}

/// Decode encoded image bytes (PNG, JPEG) into a straight-alpha RGBA raster.
pub fn decode_image(bytes: &[u8]) -> StackResult<RasterImage> {
    let dyn_img = image::load_from_memory(bytes)?;
    RasterImage::try_from(dyn_img)
}

/// Read and decode one image file.
pub fn load_image(path: &Path) -> StackResult<RasterImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes).map_err(|e| match e {
        StackError::Codec(msg) => StackError::codec(format!("{}: {msg}", path.display())),
        other => other,
    })
}

/// Page source backed by a directory of pre-rendered page images.
///
/// `document` is the directory. Files with a `.png`, `.jpg` or `.jpeg` extension are pages;
/// they are ordered by the trailing number of their stem (`page-2` before `page-10`), then by
/// name.
#[derive(Clone, Copy, Debug)]
pub struct ImageDirSource {
    filter: FilterType,
}

impl Default for ImageDirSource {
    fn default() -> Self {
        Self {
            filter: FilterType::Lanczos3,
        }
    }
}

impl ImageDirSource {
    /// Source with Lanczos3 resampling for non-unit scales.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `filter` when `scale != 1.0`.
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    /// List page files in `dir`, in page order.
    pub fn page_paths(dir: &Path) -> StackResult<Vec<PathBuf>> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("read page directory '{}'", dir.display()))?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("read entry in '{}'", dir.display()))?;
            let path = entry.path();
            if path.is_file() && is_page_image(&path) {
                paths.push(path);
            }
        }
        paths.sort_by_cached_key(|p| page_sort_key(p));
        Ok(paths)
    }
}

impl PageSource for ImageDirSource {
    #[tracing::instrument(skip(self), fields(dir = %document.display()))]
    fn render_pages(&self, document: &Path, scale: f32) -> StackResult<Vec<RasterImage>> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(StackError::invalid_argument(format!(
                "page scale must be finite and > 0, got {scale}"
            )));
        }
        let paths = Self::page_paths(document)?;
        tracing::debug!(pages = paths.len(), "page files found");
        paths
            .par_iter()
            .map(|path| {
                let page = load_image(path)?;
                if scale == 1.0 {
                    return Ok(page);
                }
                resize_exact(&page, scaled_size(page.size(), scale)?, self.filter)
            })
            .collect()
    }
}

fn is_page_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg"))
}

fn page_sort_key(path: &Path) -> (bool, u64, String) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let digits = stem
        .chars()
        .rev()
        .take_while(char::is_ascii_digit)
        .collect::<String>()
        .chars()
        .rev()
        .collect::<String>();
    match digits.parse::<u64>() {
        Ok(n) => (false, n, name),
        Err(_) => (true, 0, name),
    }
}

fn scaled_size(size: Size, scale: f32) -> StackResult<Size> {
    let axis = |v: u32| -> StackResult<u32> {
        let scaled = (f64::from(v) * f64::from(scale)).round().max(1.0);
        if scaled > f64::from(u32::MAX) {
            return Err(StackError::resource_exhausted(format!(
                "scaled page dimension {scaled} exceeds u32"
            )));
        }
        Ok(scaled as u32)
    };
    Ok(Size::new(axis(size.width)?, axis(size.height)?))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/source.rs"]
mod tests;
