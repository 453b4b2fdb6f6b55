//! Synthetic brick bar data structure.

use brickline_types::BrickKind;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A synthetic brick bar emitted once accumulated price movement crosses
/// the configured threshold.
///
/// Open and close are exact decimals because they drive the threshold
/// comparisons; high, low, and volume come from range reductions over the
/// covered raw bars and are display-only floating point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    /// Open time of the first raw bar covered by this brick.
    pub start_time: DateTime<Utc>,
    /// Open time of the last raw bar covered by this brick.
    pub end_time: DateTime<Utc>,
    /// Opening price.
    pub open: Decimal,
    /// Closing price.
    pub close: Decimal,
    /// Highest raw-bar high over the covered range.
    pub high: f64,
    /// Lowest raw-bar low over the covered range.
    pub low: f64,
    /// Total raw-bar volume over the covered range.
    pub volume: f64,
}

impl Brick {
    /// Creates a new brick.
    #[must_use]
    pub const fn new(
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        open: Decimal,
        close: Decimal,
        high: f64,
        low: f64,
        volume: f64,
    ) -> Self {
        Self {
            start_time,
            end_time,
            open,
            close,
            high,
            low,
            volume,
        }
    }

    /// Returns the brick direction, derived from open and close.
    #[must_use]
    pub fn kind(&self) -> BrickKind {
        BrickKind::of(self.open, self.close)
    }

    /// Returns the body range (|close - open|).
    #[must_use]
    pub fn body_range(&self) -> Decimal {
        (self.close - self.open).abs()
    }

    /// Returns the full price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}
