//! Input and output formats for the brickline renko brick builder.
//!
//! This crate reads raw bar streams from CSV and writes bars, bricks, and
//! the per-index output series to various formats:
//!
//! - [`read_bars`] - CSV raw bar input
//! - [`CsvFormatter`] - CSV format
//! - [`JsonFormatter`] - JSON array or NDJSON format
//! - [`ParquetFormatter`] - Apache Parquet columnar format

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/brickline/brickline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod reader;

#[cfg(feature = "parquet")]
mod parquet;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use json::{JsonFormatter, JsonStyle};
pub use reader::read_bars;

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetFormatter;
