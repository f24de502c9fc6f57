use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gridreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the whole reel to a video file (requires `ffmpeg` on PATH).
    ///
    /// Captions are only drawn when the config names a `font` file; without one the bands are
    /// left blank.
    Render(RenderArgs),
    /// Render a single layout frame as a PNG.
    Frame(FrameArgs),
    /// Print the frame plan as JSON without rendering.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Reel config JSON. Relative paths inside it resolve against its directory.
    #[arg(long)]
    config: PathBuf,

    /// Output video path.
    #[arg(long)]
    out: PathBuf,

    /// Override the codec from the config.
    #[arg(long, value_enum)]
    codec: Option<CodecChoice>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Reel config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Batch index (0-based).
    #[arg(long, default_value_t = 0)]
    batch: usize,

    /// Horizontal shift in pixels, as used during slide-in.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Reel config JSON.
    #[arg(long)]
    config: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CodecChoice {
    H264,
    Mpeg4,
    Xvid,
}

impl From<CodecChoice> for gridreel::VideoCodec {
    fn from(c: CodecChoice) -> Self {
        match c {
            CodecChoice::H264 => Self::H264,
            CodecChoice::Mpeg4 => Self::Mpeg4,
            CodecChoice::Xvid => Self::Xvid,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("GRIDREEL_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn config_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

fn prepare(config_path: &Path) -> anyhow::Result<(gridreel::ReelConfig, gridreel::PreparedReel)> {
    let config = gridreel::ReelConfig::from_file(config_path)?;
    let root = config_dir(config_path);
    let decoder = gridreel::FsImageDecoder::new(root);
    let mut text = config.text_renderer(root)?;
    let reel = gridreel::PreparedReel::prepare(&config.items, &config, &decoder, text.as_mut())?;
    Ok((config, reel))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (config, reel) = prepare(&args.config)?;

    let mut opts = gridreel::FfmpegSinkOpts::new(&args.out);
    opts.codec = args.codec.map_or(config.codec, Into::into);
    opts.bg = config.layout.background_color;
    let mut sink = gridreel::FfmpegSink::new(opts);

    let stats = reel.render(&mut sink)?;
    eprintln!(
        "wrote {} ({} frames, {}x{})",
        args.out.display(),
        stats.frames_written,
        stats.plan.canvas.width,
        stats.plan.canvas.height
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (_, reel) = prepare(&args.config)?;
    let frame = reel.frame(args.batch, args.offset)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let mut rgb = vec![0u8; frame.width() as usize * frame.height() as usize * 3];
    frame.write_rgb24(&mut rgb)?;
    image::save_buffer_with_format(
        &args.out,
        &rgb,
        frame.width(),
        frame.height(),
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let (_, reel) = prepare(&args.config)?;
    let plan = reel.plan();
    let json = serde_json::json!({
        "canvas": plan.canvas,
        "total_frames": plan.total_frames(),
        "batches": plan.batches,
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
