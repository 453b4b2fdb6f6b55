//! Info command implementation.
//!
//! This module handles displaying summary information about a CSV bar file:
//! bar count, time span, price extremes, and total volume.

use anyhow::{Context, Result};
use brickline_lib::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Show summary information about a CSV bar file.
pub(crate) fn show_info(input: &Path) -> Result<()> {
    let file =
        File::open(input).with_context(|| format!("Cannot open input: {}", input.display()))?;
    let bars =
        read_bars(BufReader::new(file)).context("Failed to parse input bars")?;
    let history = BarHistory::from_bars(bars).context("Invalid bar stream")?;

    println!("File:  {}", input.display());
    println!("Bars:  {}", history.len());

    if history.is_empty() {
        return Ok(());
    }

    let last = history.len() - 1;
    let first_bar = history.bar(0).context("Missing first bar")?;
    let last_bar = history.bar(last).context("Missing last bar")?;
    println!(
        "Span:  {} -> {}",
        first_bar.time.format("%Y-%m-%d %H:%M:%S"),
        last_bar.time.format("%Y-%m-%d %H:%M:%S")
    );

    let high = history.max_high(0, last)?;
    let low = history.min_low(0, last)?;
    let volume = history.sum_volume(0, last)?;
    println!("High:  {high}");
    println!("Low:   {low}");
    println!("Volume: {volume}");

    Ok(())
}
