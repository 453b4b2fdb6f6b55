//! Raw price bar representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single raw OHLCV bar from the host price series.
///
/// Bars are identified positionally by their index in a
/// [`BarSource`](crate::BarSource); the struct itself carries no index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    /// Open time of the bar (UTC).
    pub time: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest price during the bar.
    pub high: f64,
    /// Lowest price during the bar.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Tick volume traded during the bar.
    pub volume: f64,
}

impl RawBar {
    /// Creates a new raw bar.
    #[must_use]
    pub const fn new(
        time: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the body size (|close - open|).
    #[must_use]
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Returns true if every price field and the volume are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite()
    }
}
