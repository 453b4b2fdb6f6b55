//! Build command implementation.
//!
//! This module reads a CSV bar file, folds it through the renko aggregator,
//! and writes the finalized bricks and optional output series.

use crate::display::{Format, write_bricks, write_series};
use anyhow::{Context, Result};
use brickline_lib::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Build renko bricks from a CSV bar file.
#[allow(clippy::too_many_arguments)]
pub(crate) fn build(
    input: &Path,
    size: Option<Decimal>,
    pips: u32,
    pip_size: Decimal,
    digits: u32,
    output: Option<PathBuf>,
    format: Format,
    series_output: Option<PathBuf>,
    partial: bool,
    toggles: OutputToggles,
    quiet: bool,
) -> Result<()> {
    // Load and validate the bar stream
    let file =
        File::open(input).with_context(|| format!("Cannot open input: {}", input.display()))?;
    let bars =
        read_bars(BufReader::new(file)).context("Failed to parse input bars")?;
    let history = BarHistory::from_bars(bars).context("Invalid bar stream")?;

    // Resolve the brick size (explicit price size wins over pips)
    let brick_size = size.unwrap_or_else(|| Decimal::from(pips) * pip_size);
    let config = RenkoConfig::new(brick_size, digits)?;

    // Determine output path (default to <input stem>_bricks.<format>)
    let output = output.unwrap_or_else(|| {
        let stem = input
            .file_stem()
            .map_or_else(|| "bricks".to_string(), |s| s.to_string_lossy().to_string());
        PathBuf::from(format!("{}_bricks.{}", stem, format.extension()))
    });

    // Setup progress bar
    let total_bars = history.len() as u64;
    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(total_bars);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} bars ({percent}%) {msg}")
                .expect("Invalid progress template")
                .progress_chars("=>-"),
        );
        pb.set_message(format!("size {brick_size}"));
        pb
    };

    // Fold the history through the aggregator
    let mut aggregator = RenkoAggregator::new(config);
    let mut series = OhlcSeries::new(toggles);
    let mut bricks: Vec<Brick> = Vec::new();
    for index in 0..history.len() {
        let step = aggregator.process(&history, index)?;
        if let Some(brick) = step.finalized {
            bricks.push(brick);
        }
        series.record(index, &step.preview);
        progress.inc(1);
    }
    let open_brick = aggregator.finish();

    let finish_msg = if open_brick.is_some() {
        format!("{} bricks (+1 still open)", bricks.len())
    } else {
        format!("{} bricks", bricks.len())
    };
    progress.finish_with_message(finish_msg);

    if partial && let Some(brick) = open_brick {
        bricks.push(brick);
    }

    write_bricks(&bricks, &output, format)?;

    if let Some(series_path) = series_output {
        write_series(&series, &series_path, format)?;
        if !quiet {
            println!("Series written to: {}", series_path.display());
        }
    }

    if !quiet {
        println!("Output written to: {}", output.display());
    }

    Ok(())
}
