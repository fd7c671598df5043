use clap::Parser;
use color_eyre::eyre::{bail, Result};
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use overlayvis::config::{load_pacing_config, PacingConfig};
use overlayvis::parser::read_retained_lines;
use overlayvis::render::{DotRenderer, LayoutChoice};
use overlayvis::replay::{ReplayEngine, ReplayMode};
use overlayvis::stats::{compute_stats, print_summary, write_json_report};

/// Overlay network topology reconstruction and replay from connection logs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the overlay connection event log
    #[arg(short, long)]
    file: PathBuf,

    /// Layout algorithm for the rendered graph
    #[arg(short = 'o', long = "overlay", value_enum)]
    layout: LayoutChoice,

    /// Replay mode: final renders the end state once, interval reproduces
    /// inter-event timing
    #[arg(short = 'v', long = "visualization", value_enum)]
    mode: ReplayMode,

    /// Output path for the rendered DOT graph
    #[arg(long, default_value = "overlay.dot")]
    dot_output: PathBuf,

    /// Optional output path for a JSON statistics report
    #[arg(long)]
    report: Option<PathBuf>,

    /// Optional YAML file overriding the clock-skip pacing policy
    #[arg(long)]
    pacing: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging from the requested filter level
    env_logger::Builder::from_env(Env::default().default_filter_or(&args.log_level)).init();

    if !args.file.exists() {
        bail!(
            "Log file does not exist: {}\nUsage: overlayvis -o <circle|isom|kk> -v <final|interval> -f <file>",
            args.file.display()
        );
    }

    let pacing = match &args.pacing {
        Some(path) => load_pacing_config(path)?,
        None => PacingConfig::default(),
    };

    info!("Reading overlay log from {}", args.file.display());
    let lines = read_retained_lines(&args.file)?;

    let mut renderer = DotRenderer::new(args.dot_output.clone(), args.layout);
    let mut engine = ReplayEngine::new(pacing);

    info!("Replaying {} events in {:?} mode", lines.len(), args.mode);
    engine.run(&lines, args.mode, &mut renderer);
    info!("Rendered graph written to {}", args.dot_output.display());

    let stats = compute_stats(engine.graph());
    print_summary(&stats);

    if let Some(report_path) = &args.report {
        write_json_report(&stats, report_path)?;
    }

    Ok(())
}
