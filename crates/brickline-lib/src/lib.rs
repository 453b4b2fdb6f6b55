//! Renko brick building from raw OHLCV bar streams.
//!
//! This is a facade crate that re-exports functionality from the brickline
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```
//! use brickline_lib::prelude::*;
//! use chrono::{TimeZone, Utc};
//! use rust_decimal::Decimal;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let mut history = BarHistory::new();
//! let time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
//! history.push(RawBar::new(time, 1.1000, 1.1002, 1.0998, 1.1000, 100.0))?;
//!
//! let config = RenkoConfig::new(Decimal::new(10, 4), 4)?;
//! let mut bricks: Vec<Brick> = Vec::new();
//! let (series, open_brick) = replay(&history, config, OutputToggles::all(), &mut bricks)?;
//!
//! assert!(bricks.is_empty());
//! assert_eq!(series.len(), 1);
//! assert!(open_brick.is_some());
//! # Ok(())
//! # }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/brickline/brickline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use brickline_types::*;

// Re-export the aggregation core
#[cfg(feature = "renko")]
pub use brickline_renko::{
    Brick, BrickSink, Ohlc, OhlcSeries, OutputToggles, RenkoAggregator, Step, replay,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use brickline_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat, read_bars,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use brickline_format::ParquetFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use brickline_lib::prelude::*;
/// ```
pub mod prelude {
    pub use brickline_types::{
        BarHistory, BarSource, BrickKind, BricklineError, RawBar, RenkoConfig, Result,
    };

    #[cfg(feature = "renko")]
    pub use brickline_renko::{
        Brick, BrickSink, Ohlc, OhlcSeries, OutputToggles, RenkoAggregator, Step, replay,
    };

    #[cfg(feature = "format")]
    pub use brickline_format::{
        CsvFormatter, Formatter, JsonFormatter, OutputFormat, read_bars,
    };

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use brickline_format::ParquetFormatter;
}
