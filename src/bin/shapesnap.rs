use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use image::imageops::FilterType;
use shapesnap::{Raster, Shapesnap, SnapConfig};
use tracing_subscriber::EnvFilter;

/// Approximate an image with translucent shapes and write the result as SVG.
#[derive(Parser, Debug)]
#[command(name = "shapesnap", version)]
struct Cli {
    /// Input image (any format the `image` crate decodes).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    /// Also write the raster canvas as a PNG.
    #[arg(long)]
    png: Option<PathBuf>,

    /// Base configuration as JSON. Flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of shapes to commit.
    #[arg(long)]
    shapes: Option<u32>,

    /// Random restarts per shape.
    #[arg(long)]
    attempts: Option<u32>,

    /// Mutation rounds per attempt.
    #[arg(long)]
    mutations: Option<u32>,

    /// Non-improving rounds before an attempt stops early.
    #[arg(long)]
    patience: Option<u32>,

    /// Opacity of every shape (0-255).
    #[arg(long)]
    alpha: Option<u8>,

    /// Comma-separated shape allow-list, e.g. `Rect,Cubic`.
    #[arg(long, value_delimiter = ',')]
    shape_types: Option<Vec<String>>,

    /// Resize the input to this width before searching, keeping aspect ratio.
    #[arg(long)]
    resize: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    /// Log every attempt, not just commits.
    #[arg(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = build_config(&cli)?;
    let target = load_target(&cli.in_path, cli.resize)?;

    let mut snap = Shapesnap::new(target, config)?;
    tracing::info!(difference = snap.difference(), "starting");
    while !snap.is_finished() {
        let report = snap.step();
        tracing::info!(
            shape = report.index + 1,
            of = snap.config().amount_of_shapes,
            difference = report.score,
            "step"
        );
    }

    write_output(&cli.out, snap.svg().as_bytes())?;
    eprintln!("wrote {}", cli.out.display());

    if let Some(png) = &cli.png {
        ensure_parent(png)?;
        snap.image()
            .to_image()?
            .save_with_format(png, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", png.display()))?;
        eprintln!("wrote {}", png.display());
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(cli: &Cli) -> anyhow::Result<SnapConfig> {
    let mut cfg = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read config '{}'", path.display()))?;
            SnapConfig::from_json(&text)
                .with_context(|| format!("parse config '{}'", path.display()))?
        }
        None => SnapConfig::default(),
    };

    if let Some(v) = cli.shapes {
        cfg.amount_of_shapes = v;
    }
    if let Some(v) = cli.attempts {
        cfg.amount_of_attempts = v;
    }
    if let Some(v) = cli.mutations {
        cfg.amount_of_mutations = v;
    }
    if let Some(v) = cli.patience {
        cfg.patience = v;
    }
    if let Some(v) = cli.alpha {
        cfg.alpha = v;
    }
    if let Some(v) = &cli.shape_types {
        cfg.shape_types = v.clone();
    }
    if let Some(v) = cli.seed {
        cfg.seed = v;
    }
    Ok(cfg)
}

fn load_target(path: &Path, resize: Option<u32>) -> anyhow::Result<Raster> {
    let mut img = image::open(path).with_context(|| format!("decode image '{}'", path.display()))?;
    if let Some(width) = resize {
        anyhow::ensure!(width > 0, "--resize must be > 0");
        let height = (f64::from(img.height()) * f64::from(width) / f64::from(img.width()))
            .round()
            .max(1.0) as u32;
        img = img.resize_exact(width, height, FilterType::Triangle);
    }
    Ok(Raster::from_image(&img.to_rgba8())?)
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, bytes).with_context(|| format!("write svg '{}'", path.display()))
}
