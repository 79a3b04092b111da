use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::ImageEncoder as _;

use crate::{
    foundation::error::{StackError, StackResult},
    pipeline::compose::ComposedImage,
    raster::frame::RasterImage,
};

/// Destination for composed images.
pub trait CompositeSink {
    /// Accept one composite. Composites arrive in group order.
    fn push(&mut self, composite: &ComposedImage) -> StackResult<()>;

    /// Called once after the last composite.
    fn finish(&mut self) -> StackResult<()> {
        Ok(())
    }
}

/// In-memory sink for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemorySink {
    composites: Vec<ComposedImage>,
    finished: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the captured composites.
    pub fn composites(&self) -> &[ComposedImage] {
        &self.composites
    }

    /// Return `true` once [`CompositeSink::finish`] was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl CompositeSink for InMemorySink {
    fn push(&mut self, composite: &ComposedImage) -> StackResult<()> {
        self.composites.push(composite.clone());
        Ok(())
    }

    fn finish(&mut self) -> StackResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Sink writing each composite as `<dir>/<name>` PNG.
#[derive(Debug)]
pub struct PngDirSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngDirSink {
    /// Create the output directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> StackResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Write `image` as `<dir>/<name>` and record the path.
    pub fn write_image(&mut self, name: &str, image: &RasterImage) -> StackResult<PathBuf> {
        if name.is_empty() || Path::new(name).file_name() != Some(std::ffi::OsStr::new(name)) {
            return Err(StackError::invalid_argument(format!(
                "output name must be a plain file name, got \"{name}\""
            )));
        }
        let path = self.dir.join(name);
        image::save_buffer_with_format(
            &path,
            image.data(),
            image.width(),
            image.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), "png written");
        self.written.push(path.clone());
        Ok(path)
    }
}

impl CompositeSink for PngDirSink {
    fn push(&mut self, composite: &ComposedImage) -> StackResult<()> {
        self.write_image(&composite.name, &composite.image)?;
        Ok(())
    }
}

/// Encode `image` as PNG bytes.
pub fn encode_png(image: &RasterImage) -> StackResult<Vec<u8>> {
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out).write_image(
        image.data(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/sink.rs"]
mod tests;
