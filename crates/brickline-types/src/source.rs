//! Read-only access to the raw bar history.

use chrono::{DateTime, Utc};

use crate::{BricklineError, RawBar, Result};

/// Read-only view of an indexed raw bar history.
///
/// Bars are ordered by index with non-decreasing open times. The provided
/// range reductions always cover the full inclusive index range
/// `[start, end]`; an inverted range is an error rather than an empty
/// reduction, since it indicates a failed start-time resolution upstream.
pub trait BarSource {
    /// Returns the number of bars in the source.
    fn len(&self) -> usize;

    /// Returns the bar at `index`, or `None` if out of range.
    fn bar(&self, index: usize) -> Option<&RawBar>;

    /// Returns the index of the bar whose open time equals `time`.
    fn index_of_time(&self, time: DateTime<Utc>) -> Option<usize>;

    /// Returns true if the source contains no bars.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum high over the inclusive range `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`BricklineError::EmptyRange`] if `start > end`, or
    /// [`BricklineError::IndexOutOfRange`] if `end` is out of range.
    fn max_high(&self, start: usize, end: usize) -> Result<f64> {
        self.reduce(start, end, f64::NEG_INFINITY, |acc, bar| acc.max(bar.high))
    }

    /// Returns the minimum low over the inclusive range `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`BricklineError::EmptyRange`] if `start > end`, or
    /// [`BricklineError::IndexOutOfRange`] if `end` is out of range.
    fn min_low(&self, start: usize, end: usize) -> Result<f64> {
        self.reduce(start, end, f64::INFINITY, |acc, bar| acc.min(bar.low))
    }

    /// Returns the volume sum over the inclusive range `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`BricklineError::EmptyRange`] if `start > end`, or
    /// [`BricklineError::IndexOutOfRange`] if `end` is out of range.
    fn sum_volume(&self, start: usize, end: usize) -> Result<f64> {
        self.reduce(start, end, 0.0, |acc, bar| acc + bar.volume)
    }

    /// Folds `f` over the inclusive range `[start, end]`.
    #[doc(hidden)]
    fn reduce(&self, start: usize, end: usize, init: f64, f: fn(f64, &RawBar) -> f64) -> Result<f64> {
        if start > end {
            return Err(BricklineError::EmptyRange { start, end });
        }
        let mut acc = init;
        for index in start..=end {
            let bar = self.bar(index).ok_or(BricklineError::IndexOutOfRange {
                index,
                len: self.len(),
            })?;
            acc = f(acc, bar);
        }
        Ok(acc)
    }
}

/// In-memory bar history backing a [`BarSource`].
///
/// Bars are validated on insertion: open times must be non-decreasing and
/// all prices finite, so lookups and reductions never have to re-check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarHistory {
    bars: Vec<RawBar>,
}

impl BarHistory {
    /// Creates an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self { bars: Vec::new() }
    }

    /// Builds a history from bars already in stream order.
    ///
    /// # Errors
    ///
    /// Returns the first validation error encountered, as [`push`](Self::push).
    pub fn from_bars(bars: impl IntoIterator<Item = RawBar>) -> Result<Self> {
        let mut history = Self::new();
        for bar in bars {
            history.push(bar)?;
        }
        Ok(history)
    }

    /// Appends a bar and returns its index.
    ///
    /// # Errors
    ///
    /// Returns [`BricklineError::NonFinitePrice`] if any price or the volume
    /// is not finite, or [`BricklineError::NonMonotonicTime`] if the bar
    /// opens earlier than its predecessor.
    pub fn push(&mut self, bar: RawBar) -> Result<usize> {
        if !bar.is_finite() {
            return Err(BricklineError::NonFinitePrice { time: bar.time });
        }
        if let Some(last) = self.bars.last()
            && bar.time < last.time
        {
            return Err(BricklineError::NonMonotonicTime { time: bar.time });
        }
        self.bars.push(bar);
        Ok(self.bars.len() - 1)
    }

    /// Returns the bars as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[RawBar] {
        &self.bars
    }
}

impl BarSource for BarHistory {
    fn len(&self) -> usize {
        self.bars.len()
    }

    fn bar(&self, index: usize) -> Option<&RawBar> {
        self.bars.get(index)
    }

    fn index_of_time(&self, time: DateTime<Utc>) -> Option<usize> {
        // Open times are non-decreasing, so the first bar at or after `time`
        // is found by bisection; duplicates resolve to the earliest match.
        let index = self.bars.partition_point(|bar| bar.time < time);
        (index < self.bars.len() && self.bars[index].time == time).then_some(index)
    }
}
