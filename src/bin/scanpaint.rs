use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "scanpaint", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one scene JSON to a PNG.
    Render(RenderArgs),
    /// Render several scene JSON files in parallel into a directory.
    Batch(BatchArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Deflate level (0-10).
    #[arg(long, default_value_t = 6)]
    level: u8,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Input scene JSON (repeatable).
    #[arg(long = "in", required = true)]
    in_paths: Vec<PathBuf>,

    /// Output directory; each scene is written as `<stem>.png`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Deflate level (0-10).
    #[arg(long, default_value_t = 6)]
    level: u8,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Batch(args) => cmd_batch(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = scanpaint::EncodeConfig::default().with_compression_level(args.level);
    let scene = scanpaint::Scene::from_path(&args.in_path)?;
    let surface = scene
        .render()
        .with_context(|| format!("render scene '{}'", args.in_path.display()))?;
    scanpaint::save_png(&surface, &cfg, &args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let cfg = scanpaint::EncodeConfig::default().with_compression_level(args.level);
    let jobs = args
        .in_paths
        .into_iter()
        .map(|p| scanpaint::BatchJob::into_dir(p, &args.out_dir))
        .collect::<Result<Vec<_>, _>>()?;

    let written = scanpaint::render_batch(&jobs, &cfg, args.threads)?;
    for path in &written {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
