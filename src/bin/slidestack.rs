use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use slidestack::{
    AspectRatio, ComposeMode, ComposeOpts, ComposeThreading, CompositeSink as _, ImageDirSource,
    PageSource as _, PngDirSink, Rgba8,
};

#[derive(Parser, Debug)]
#[command(name = "slidestack", version)]
struct Cli {
    /// Log at debug level (overridden by `RUST_LOG`).
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a directory of page images into grids or long strips.
    Compose(ComposeArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Directory of page images (`page-1.png`, `page-2.png`, ...).
    #[arg(long = "in")]
    in_dir: PathBuf,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Compose options JSON; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// single, grid-2x2, grid-3x3 or long.
    #[arg(long)]
    mode: Option<ComposeMode>,

    /// Pages per strip in long mode.
    #[arg(long)]
    group_size: Option<usize>,

    /// Pixels between images.
    #[arg(long)]
    spacing: Option<u32>,

    /// Background color, `#RRGGBB` or `#RRGGBBAA`.
    #[arg(long)]
    background: Option<Rgba8>,

    /// Target canvas ratio for long mode, e.g. `9:16`.
    #[arg(long)]
    aspect_ratio: Option<AspectRatio>,

    /// Page resampling factor applied on load.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Compose groups in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let mut opts = match &args.config {
        Some(path) => ComposeOpts::from_path(path)?,
        None => ComposeOpts::default(),
    };
    if let Some(mode) = args.mode {
        opts.mode = mode;
    }
    if let Some(n) = args.group_size {
        opts.group_size = n;
    }
    if let Some(spacing) = args.spacing {
        opts.spacing = spacing;
    }
    if let Some(background) = args.background {
        opts.background = background;
    }
    if args.aspect_ratio.is_some() {
        opts.aspect_ratio = args.aspect_ratio;
    }
    opts.validate()?;

    let threading = ComposeThreading {
        parallel: args.parallel,
        threads: args.threads,
    };
    let pages = ImageDirSource::new().render_pages(&args.in_dir, args.scale)?;
    if pages.is_empty() {
        anyhow::bail!("no page images found in '{}'", args.in_dir.display());
    }

    let mut sink = PngDirSink::new(&args.out)?;
    // Nothing to merge: pass the pages through.
    if opts.plan()?.is_none() {
        for (i, page) in pages.iter().enumerate() {
            sink.write_image(&format!("page-{}.png", i + 1), page)
                .with_context(|| format!("write page {}", i + 1))?;
        }
    } else {
        let output = slidestack::compose_batches(&pages, &opts, &threading, None)?;
        for composite in &output.composites {
            sink.push(composite)?;
        }
    }
    sink.finish()?;

    eprintln!(
        "wrote {} file(s) to {} ({} page(s), mode {})",
        sink.written().len(),
        args.out.display(),
        pages.len(),
        opts.mode
    );
    Ok(())
}
