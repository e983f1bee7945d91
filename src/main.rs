//! panel-cut - CLI tool to lay out panel pieces on stock sheets.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use panel_cut::{optimize_with, AttemptSeed, CutConfig, OptimizationResult, PieceRequest};

/// Lay out rectangular panel pieces on as few stock sheets as possible.
#[derive(Parser, Debug)]
#[command(name = "panel-cut")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON job file with sheet settings and pieces
    #[arg(short, long)]
    job: Option<PathBuf>,

    /// Stock sheet width in mm
    #[arg(long)]
    sheet_width: Option<i64>,

    /// Stock sheet height in mm
    #[arg(long)]
    sheet_height: Option<i64>,

    /// Saw blade kerf in mm
    #[arg(short, long)]
    kerf: Option<i64>,

    /// Number of shuffled orderings to try
    #[arg(short, long)]
    attempts: Option<i64>,

    /// Placement strategy (BSSF, BLSF or BAF)
    #[arg(short, long)]
    strategy: Option<String>,

    /// Keep every piece in its requested orientation
    #[arg(long)]
    no_rotation: bool,

    /// Piece as WIDTHxHEIGHT or WIDTHxHEIGHTxQUANTITY (repeatable)
    #[arg(short, long = "piece", value_parser = parse_piece)]
    pieces: Vec<PieceRequest>,

    /// Base seed for the shuffled orderings
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Print the full layout as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Job file layout: optimizer settings plus `[width, height, quantity]` rows.
#[derive(Debug, Default, Deserialize)]
struct JobFile {
    #[serde(flatten)]
    config: CutConfig,
    #[serde(default)]
    pieces: Vec<(i64, i64, i64)>,
}

/// Parse `600x400` or `600x400x4`.
fn parse_piece(s: &str) -> std::result::Result<PieceRequest, String> {
    let parts: Vec<&str> = s.trim().split(['x', 'X']).collect();
    let numbers = parts
        .iter()
        .map(|p| p.trim().parse::<i64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid piece '{}': {}", s, e))?;

    match numbers.as_slice() {
        [w, h] => Ok(PieceRequest::new(*w, *h, 1)),
        [w, h, q] => Ok(PieceRequest::new(*w, *h, *q)),
        _ => Err(format!(
            "invalid piece '{}': expected WIDTHxHEIGHT or WIDTHxHEIGHTxQUANTITY",
            s
        )),
    }
}

fn load_job(path: &Path) -> Result<JobFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Combine defaults, job file values and command-line flags, in that order.
fn build_job(args: &Args, job: JobFile) -> Result<(CutConfig, Vec<PieceRequest>)> {
    let mut config = job.config;

    if let Some(v) = args.sheet_width {
        config.sheet_w = v;
    }
    if let Some(v) = args.sheet_height {
        config.sheet_h = v;
    }
    if let Some(v) = args.kerf {
        config.kerf = v;
    }
    if let Some(v) = args.attempts {
        config.attempts = v;
    }
    if args.no_rotation {
        config.allow_rotation = false;
    }
    if let Some(name) = &args.strategy {
        config.strategy = name.parse()?;
    }

    let mut requests: Vec<PieceRequest> = job.pieces.into_iter().map(Into::into).collect();
    requests.extend(args.pieces.iter().copied());

    Ok((config, requests))
}

fn print_summary(result: &OptimizationResult) {
    for summary in result.summaries() {
        println!(
            "Sheet {} | {}x{} | pieces {} | scrap {} | utilization {:.1}%",
            summary.index,
            summary.sheet_w,
            summary.sheet_h,
            summary.piece_count,
            summary.scrap,
            summary.utilization_percent
        );
    }
    println!(
        "Total: {} sheet(s) | utilization {:.1}%",
        result.sheet_count(),
        result.utilization() * 100.0
    );
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let job = match &args.job {
        Some(path) => {
            info!("Loading job: {}", path.display());
            load_job(path)?
        }
        None => JobFile::default(),
    };

    let (config, requests) = build_job(&args, job)?;

    if requests.is_empty() {
        warn!("No pieces given; use --piece or --job");
    }

    info!(
        "Sheet {}x{}, kerf {}, {} attempt(s), strategy {}, rotation {}",
        config.sheet_w,
        config.sheet_h,
        config.kerf,
        config.attempts,
        config.strategy,
        if config.allow_rotation { "on" } else { "off" }
    );

    let result = optimize_with(&config, &requests, &AttemptSeed::new(args.seed), None)
        .context("Optimization failed")?;

    if args.json {
        let json = serde_json::to_string_pretty(&result)?;
        println!("{}", json);
        return Ok(());
    }

    print_summary(&result);

    Ok(())
}
