//! tLASCA CLI
//!
//! Command-line pipeline: load configuration, read and order the input
//! frame sequence, compute the temporal speckle-contrast map, and save
//! it as a grayscale PNG.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use tlasca::{io, Config, ContrastAnalyzer};

#[derive(Debug, Parser)]
#[command(name = "tlasca", version, about = "Temporal laser speckle contrast analysis")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "tlasca.toml")]
    config: PathBuf,

    /// Directory containing the input frame sequence (overrides config).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Output image path (overrides the configured results location).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Side length of the square spatial averaging window (overrides config).
    #[arg(long)]
    window_size: Option<u32>,

    /// Worker count for the parallel assembler (default: logical cores).
    #[arg(long)]
    workers: Option<usize>,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("tlasca failed: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    info!("tlasca v{}", tlasca::VERSION);

    let mut config = Config::load(&cli.config).context("loading configuration")?;
    if let Some(dir) = cli.data_dir {
        config.paths.data_dir = dir;
    }
    if let Some(window_size) = cli.window_size {
        config.algorithm.window_size = window_size;
    }
    if let Some(workers) = cli.workers {
        config.algorithm.workers = Some(workers);
    }
    let output = cli.output.unwrap_or_else(|| config.output_path());

    info!("searching for image files in '{}'", config.paths.data_dir.display());
    let sequence =
        io::load_sequence(&config.paths.data_dir).context("loading frame sequence")?;
    info!(
        "loaded {} frames of {}x{}",
        sequence.len(),
        sequence.width(),
        sequence.height()
    );

    let analyzer = match config.algorithm.workers {
        Some(workers) => ContrastAnalyzer::with_workers(config.algorithm.window_size, workers),
        None => ContrastAnalyzer::new(config.algorithm.window_size),
    };
    info!(
        "starting contrast map calculation (window size {}, {} workers)...",
        analyzer.window_size(),
        analyzer.workers()
    );
    let map = analyzer.compute(&sequence).context("computing contrast map")?;
    info!(
        "calculation finished: {}x{} map",
        map.width(),
        map.height()
    );

    io::save_map(&output, &map)
        .with_context(|| format!("saving result to '{}'", output.display()))?;
    info!("image saving completed: {}", output.display());

    Ok(())
}
