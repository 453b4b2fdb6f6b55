//! Display utilities and output formatting for the brickline CLI.

use anyhow::Result;
use brickline_lib::prelude::*;
use clap::ValueEnum;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[cfg(not(feature = "parquet"))]
use anyhow::bail;

/// Output format for built bricks.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
    Parquet,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Write bricks to a file in the specified format.
pub(crate) fn write_bricks(bricks: &[Brick], output: &Path, format: Format) -> Result<()> {
    let file = File::create(output)?;
    let writer = BufWriter::new(file);

    match format {
        Format::Csv => {
            let formatter = CsvFormatter::new();
            formatter.write_bricks(bricks, writer)?;
        }
        Format::Json => {
            let formatter = JsonFormatter::new();
            formatter.write_bricks(bricks, writer)?;
        }
        Format::Ndjson => {
            let formatter = JsonFormatter::ndjson();
            formatter.write_bricks(bricks, writer)?;
        }
        Format::Parquet => {
            #[cfg(feature = "parquet")]
            {
                let formatter = ParquetFormatter::new();
                formatter.write_bricks(bricks, writer)?;
            }
            #[cfg(not(feature = "parquet"))]
            {
                bail!("Parquet support not compiled in");
            }
        }
    }

    Ok(())
}

/// Write the per-index output series to a file in the specified format.
pub(crate) fn write_series(series: &OhlcSeries, output: &Path, format: Format) -> Result<()> {
    let file = File::create(output)?;
    let writer = BufWriter::new(file);

    match format {
        Format::Csv => {
            let formatter = CsvFormatter::new();
            formatter.write_series(series, writer)?;
        }
        Format::Json => {
            let formatter = JsonFormatter::new();
            formatter.write_series(series, writer)?;
        }
        Format::Ndjson => {
            let formatter = JsonFormatter::ndjson();
            formatter.write_series(series, writer)?;
        }
        Format::Parquet => {
            #[cfg(feature = "parquet")]
            {
                let formatter = ParquetFormatter::new();
                formatter.write_series(series, writer)?;
            }
            #[cfg(not(feature = "parquet"))]
            {
                bail!("Parquet support not compiled in");
            }
        }
    }

    Ok(())
}
