use std::{
    ops::Range,
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use rayon::prelude::*;

use crate::{
    batch::partition::partition,
    foundation::error::{StackError, StackResult},
    pipeline::{
        opts::{ComposeOpts, ComposePlan},
        source::PageSource,
    },
    raster::frame::RasterImage,
};

/// Shared flag that stops a batch run between group compositions.
///
/// A group that has started composing always finishes; cancellation is observed before the next
/// group starts, so no half-written canvas is ever returned.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token in the "running" state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Return `true` once [`CancelToken::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Threading controls for batch composition.
#[derive(Clone, Debug, Default)]
pub struct ComposeThreading {
    /// Compose independent groups in parallel when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count (parallel mode only).
    pub threads: Option<usize>,
}

impl ComposeThreading {
    /// Reject an explicit zero thread count.
    pub fn validate(&self) -> StackResult<()> {
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(StackError::invalid_argument(
                "compose threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

/// One composed output image.
#[derive(Clone, Debug)]
pub struct ComposedImage {
    /// 1-based position among the run's composites.
    pub index: usize,
    /// Deterministic output file name, e.g. `grid-2x2-1.png` or `merged-3.png`.
    pub name: String,
    /// Input page indices (0-based, half-open) that went into this composite.
    pub pages: Range<usize>,
    /// Composed pixels.
    pub image: RasterImage,
}

/// Aggregated batch counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComposeStats {
    /// Input pages.
    pub pages: usize,
    /// Groups the pages were partitioned into.
    pub groups: usize,
    /// Composites produced.
    pub composites: usize,
}

/// Result of a batch run.
#[derive(Clone, Debug, Default)]
pub struct ComposeOutput {
    /// Composites in group order.
    pub composites: Vec<ComposedImage>,
    /// Run counters.
    pub stats: ComposeStats,
}

/// Partition `images` and compose every group according to `opts`.
///
/// Groups are independent: in parallel mode each one is composed on a worker of a dedicated
/// rayon pool with its own canvas. Output order always follows group order. The first failing
/// group fails the whole run.
#[tracing::instrument(skip_all, fields(pages = images.len(), mode = %opts.mode))]
pub fn compose_batches(
    images: &[RasterImage],
    opts: &ComposeOpts,
    threading: &ComposeThreading,
    cancel: Option<&CancelToken>,
) -> StackResult<ComposeOutput> {
    threading.validate()?;
    let Some(plan) = opts.plan()? else {
        tracing::info!("nothing to merge for this mode");
        return Ok(ComposeOutput {
            composites: Vec::new(),
            stats: ComposeStats {
                pages: images.len(),
                ..ComposeStats::default()
            },
        });
    };

    let groups = partition(images, plan.group_size)?;
    let jobs = groups
        .iter()
        .scan(0usize, |start, group| {
            let range = *start..*start + group.len();
            *start = range.end;
            Some((range, *group))
        })
        .enumerate()
        .collect::<Vec<_>>();

    let composites = if threading.parallel && jobs.len() > 1 {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| {
            jobs.par_iter()
                .map(|(idx, (pages, group))| {
                    compose_group(&plan, *idx, pages.clone(), group, cancel)
                })
                .collect::<StackResult<Vec<_>>>()
        })?
    } else {
        jobs.iter()
            .map(|(idx, (pages, group))| compose_group(&plan, *idx, pages.clone(), group, cancel))
            .collect::<StackResult<Vec<_>>>()?
    };

    let stats = ComposeStats {
        pages: images.len(),
        groups: groups.len(),
        composites: composites.len(),
    };
    tracing::info!(
        groups = stats.groups,
        composites = stats.composites,
        "batch composed"
    );
    Ok(ComposeOutput { composites, stats })
}

/// Render a document through `source`, then compose the pages.
///
/// Returns the rendered pages alongside the composites, mirroring a run that keeps both the
/// single-page images and the merged ones.
pub fn compose_document(
    source: &dyn PageSource,
    document: &Path,
    scale: f32,
    opts: &ComposeOpts,
    threading: &ComposeThreading,
    cancel: Option<&CancelToken>,
) -> StackResult<(Vec<RasterImage>, ComposeOutput)> {
    opts.validate()?;
    let pages = source.render_pages(document, scale)?;
    tracing::info!(
        document = %document.display(),
        pages = pages.len(),
        "document rendered"
    );
    let output = compose_batches(&pages, opts, threading, cancel)?;
    Ok((pages, output))
}

fn compose_group(
    plan: &ComposePlan,
    idx: usize,
    pages: Range<usize>,
    group: &[RasterImage],
    cancel: Option<&CancelToken>,
) -> StackResult<ComposedImage> {
    let index = idx + 1;
    if cancel.is_some_and(CancelToken::is_cancelled) {
        return Err(StackError::cancelled(format!(
            "batch cancelled before group {index}"
        )));
    }
    let image = plan.composer.compose(group)?;
    tracing::debug!(index, size = %image.size(), "group composed");
    Ok(ComposedImage {
        index,
        name: plan.file_name(index),
        pages,
        image,
    })
}

fn build_thread_pool(threads: Option<usize>) -> StackResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        StackError::resource_exhausted(format!("failed to build rayon thread pool: {e}"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/compose.rs"]
mod tests;
