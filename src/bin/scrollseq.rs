use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scroll_sequence::{
    AnimationStateStore, DrawOutcome, FixedLayout, FrameMapping, FsImageLoader, MapperParams,
    PixmapSurface, ScrollGeometry, SequenceAnimation, SequenceConfig, ViewportObserver,
    frame_source_for, map_scroll,
};

#[derive(Parser, Debug)]
#[command(name = "scrollseq", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Map one scroll position to a frame and print it as JSON.
    Frame(FrameArgs),
    /// Scroll through a simulated page and write a PNG for every painted frame change.
    Scrub(ScrubArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Sequence config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Page scroll offset in pixels.
    #[arg(long)]
    scroll_top: f64,

    /// Container offset relative to its anchor, in pixels.
    #[arg(long)]
    container_top: f64,

    /// Scrollable container height, in pixels.
    #[arg(long)]
    container_height: f64,
}

#[derive(Parser, Debug)]
struct ScrubArgs {
    /// Sequence config JSON. Frame sources resolve relative to its directory.
    #[arg(long)]
    config: PathBuf,

    /// Directory the PNG snapshots are written to.
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long, default_value_t = 0.0)]
    container_top: f64,

    #[arg(long, default_value_t = 2000.0)]
    container_height: f64,

    #[arg(long, default_value_t = 800.0)]
    viewport_height: f64,

    /// Scroll distance between simulated scroll events.
    #[arg(long, default_value_t = 20.0)]
    step: f64,

    /// Viewport margin used for the visibility signal.
    #[arg(long, default_value_t = 0.0)]
    root_margin: f64,

    /// Log at debug level.
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Scrub(args) => cmd_scrub(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = SequenceConfig::from_path(&args.config)?;
    cfg.validate()?;

    let geom = ScrollGeometry {
        scroll_top: args.scroll_top,
        container_top: args.container_top,
        container_height: args.container_height,
    };
    let line = match map_scroll(geom, MapperParams::from(&cfg)) {
        FrameMapping::Hold => serde_json::json!({
            "update": false,
            "frame": null,
            "fraction": null,
            "source": null,
        }),
        FrameMapping::Update { frame, fraction } => serde_json::json!({
            "update": true,
            "frame": frame.0,
            "fraction": fraction,
            "source": frame_source_for(&cfg, frame),
        }),
    };
    println!("{line}");
    Ok(())
}

fn cmd_scrub(args: ScrubArgs) -> anyhow::Result<()> {
    init_tracing(args.verbose);
    anyhow::ensure!(
        args.step.is_finite() && args.step > 0.0,
        "--step must be a positive number of pixels"
    );

    let cfg = SequenceConfig::from_path(&args.config)?;
    let assets_root = args
        .config
        .parent()
        .unwrap_or_else(|| std::path::Path::new("."));

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut store = AnimationStateStore::new();
    let mut layout = FixedLayout::new(args.container_top, args.container_height);
    let mut surface = PixmapSurface::new(cfg.canvas())?;
    let mut loader = FsImageLoader::new(assets_root);
    let mut observer = ViewportObserver::new(args.root_margin);

    let mut anim = SequenceAnimation::mount(cfg, &mut store, &layout, &mut surface, &mut loader)?;
    loader.poll();

    let mut last_written = None;
    let mut written = 0usize;
    let mut save = |anim: &SequenceAnimation, surface: &PixmapSurface| -> anyhow::Result<()> {
        let frame = anim.current_frame();
        if last_written == Some(frame) {
            return Ok(());
        }
        let out = args.out_dir.join(format!("frame_{:05}.png", frame.0));
        surface.save_png(&out)?;
        last_written = Some(frame);
        written += 1;
        Ok(())
    };

    if anim.flush_ready(&mut surface) == Some(DrawOutcome::Drawn) {
        save(&anim, &surface)?;
    }

    let end = args.container_top + args.container_height;
    let mut y = 0.0;
    while y <= end {
        layout.scroll_to(y);
        if let Some(signal) =
            observer.observe(args.container_top, args.container_height, y, args.viewport_height)
        {
            anim.on_visibility(signal);
        }
        anim.on_scroll(&layout, &mut loader);

        let mut outcome = anim.on_animation_frame(&store, &mut surface, &mut loader);
        if outcome == Some(DrawOutcome::NotReady) && anim.is_awaiting_draw() {
            loader.poll();
            outcome = anim.flush_ready(&mut surface);
        }
        if outcome == Some(DrawOutcome::Drawn) {
            save(&anim, &surface)?;
        }
        y += args.step;
    }

    let ready = anim.state().ready_count();
    anim.unmount(&mut store);

    tracing::info!(issued = loader.issued(), ready, "scrub finished");
    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}
