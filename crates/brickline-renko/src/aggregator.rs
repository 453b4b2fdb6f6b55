//! Streaming bar-to-brick aggregation.

use brickline_types::{BarSource, BrickKind, BricklineError, RenkoConfig, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::{Brick, Ohlc};

/// Streaming renko aggregator.
///
/// Consumes raw bar indices one at a time and folds them into bricks: a
/// brick closes once its rounded body range reaches one brick size when
/// continuing in the previous brick's direction, and two brick sizes when
/// reversing against it (a neutral brick counts as a reversal of either
/// direction).
///
/// Indices must be presented in non-decreasing order against an unchanged
/// source. Any error from [`process`](Self::process) is fatal: the
/// aggregator must be discarded and rebuilt before feeding more indices.
#[derive(Debug)]
pub struct RenkoAggregator {
    config: RenkoConfig,
    current: Option<BrickBuilder>,
    previous: Option<Brick>,
    last_index: Option<usize>,
}

/// Result of processing a single raw bar index.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    /// The brick finalized by this index, if any.
    pub finalized: Option<Brick>,
    /// Snapshot of the in-progress brick after this index settled.
    pub preview: Ohlc,
}

impl RenkoAggregator {
    /// Creates a new aggregator for the given configuration.
    #[must_use]
    pub const fn new(config: RenkoConfig) -> Self {
        Self {
            config,
            current: None,
            previous: None,
            last_index: None,
        }
    }

    /// Returns the aggregation configuration.
    #[must_use]
    pub const fn config(&self) -> RenkoConfig {
        self.config
    }

    /// Processes the raw bar at `index`, potentially finalizing a brick.
    ///
    /// Updates the in-progress brick with the reduction over its full
    /// covered range, evaluates the closing rule, and on closure emits the
    /// finalized brick and starts the next one at the same index. The
    /// returned [`Step`] always carries a preview of whichever brick is
    /// live after the call.
    ///
    /// # Errors
    ///
    /// Returns [`BricklineError::IndexOutOfRange`] or
    /// [`BricklineError::IndexRegression`] before touching any state, and
    /// [`BricklineError::StartTimeNotFound`] or
    /// [`BricklineError::EmptyRange`] if the current brick's start time no
    /// longer resolves against the source.
    pub fn process<S: BarSource + ?Sized>(&mut self, bars: &S, index: usize) -> Result<Step> {
        if index >= bars.len() {
            return Err(BricklineError::IndexOutOfRange {
                index,
                len: bars.len(),
            });
        }
        if let Some(last) = self.last_index
            && index < last
        {
            return Err(BricklineError::IndexRegression { index, last });
        }

        let mut builder = match self.current.take() {
            Some(builder) => builder,
            None => open_brick(bars, index, None)?,
        };
        update_builder(&mut builder, bars, index)?;

        let body = self.config.round_body(builder.body_range());
        let finalized = if body >= self.closing_threshold(builder.kind()) {
            let brick = seal(builder, self.previous.as_ref());
            let mut next = open_brick(bars, index, Some(&brick))?;
            update_builder(&mut next, bars, index)?;
            self.previous = Some(brick);
            builder = next;
            Some(brick)
        } else {
            None
        };

        let preview = builder.preview();
        self.current = Some(builder);
        self.last_index = Some(index);
        Ok(Step { finalized, preview })
    }

    /// Finishes aggregation, returning the still-forming brick.
    ///
    /// The returned brick is not finalized: its open keeps the value it was
    /// constructed with and it has not been emitted anywhere.
    #[must_use]
    pub fn finish(self) -> Option<Brick> {
        self.current.map(BrickBuilder::finish)
    }

    /// Returns the body range required to close a brick of `kind`.
    fn closing_threshold(&self, kind: BrickKind) -> Decimal {
        match &self.previous {
            Some(previous) if previous.kind() != kind => self.config.reversal_size(),
            _ => self.config.brick_size(),
        }
    }
}

/// Fixes the open of an about-to-finalize brick and builds it.
///
/// A continuation stacks directly on the previous close; a reversal spans
/// back to the previous open so its body overlaps the prior brick's body.
fn seal(mut builder: BrickBuilder, previous: Option<&Brick>) -> Brick {
    if let Some(previous) = previous {
        builder.open = if previous.kind() == builder.kind() {
            previous.close
        } else {
            previous.open
        };
    }
    builder.finish()
}

/// Starts a new brick at `index`.
///
/// The open is the previous brick's close, or the raw bar's own open for
/// the very first brick.
fn open_brick<S: BarSource + ?Sized>(
    bars: &S,
    index: usize,
    previous: Option<&Brick>,
) -> Result<BrickBuilder> {
    let bar = bars.bar(index).ok_or(BricklineError::IndexOutOfRange {
        index,
        len: bars.len(),
    })?;
    let open = match previous {
        Some(previous) => previous.close,
        None => Decimal::from_f64(bar.open)
            .ok_or(BricklineError::NonFinitePrice { time: bar.time })?,
    };
    Ok(BrickBuilder::new(bar.time, open))
}

/// Recomputes the builder from the full raw range `[start_index, index]`.
fn update_builder<S: BarSource + ?Sized>(
    builder: &mut BrickBuilder,
    bars: &S,
    index: usize,
) -> Result<()> {
    let bar = bars.bar(index).ok_or(BricklineError::IndexOutOfRange {
        index,
        len: bars.len(),
    })?;
    let start = bars
        .index_of_time(builder.start_time)
        .ok_or(BricklineError::StartTimeNotFound {
            time: builder.start_time,
        })?;
    if start > index {
        return Err(BricklineError::EmptyRange { start, end: index });
    }

    builder.close =
        Decimal::from_f64(bar.close).ok_or(BricklineError::NonFinitePrice { time: bar.time })?;
    builder.high = bars.max_high(start, index)?;
    builder.low = bars.min_low(start, index)?;
    builder.volume = bars.sum_volume(start, index)?;
    builder.end_time = bar.time;
    Ok(())
}

/// Builder for the in-progress brick.
#[derive(Debug)]
struct BrickBuilder {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    open: Decimal,
    close: Decimal,
    high: f64,
    low: f64,
    volume: f64,
}

impl BrickBuilder {
    /// Creates a builder; range fields stay unset until the first update.
    fn new(start_time: DateTime<Utc>, open: Decimal) -> Self {
        Self {
            start_time,
            end_time: start_time,
            open,
            close: open,
            high: f64::NAN,
            low: f64::NAN,
            volume: 0.0,
        }
    }

    fn kind(&self) -> BrickKind {
        BrickKind::of(self.open, self.close)
    }

    fn body_range(&self) -> Decimal {
        (self.close - self.open).abs()
    }

    fn preview(&self) -> Ohlc {
        Ohlc {
            open: self.open.to_f64().unwrap_or(f64::NAN),
            high: self.high,
            low: self.low,
            close: self.close.to_f64().unwrap_or(f64::NAN),
        }
    }

    fn finish(self) -> Brick {
        Brick::new(
            self.start_time,
            self.end_time,
            self.open,
            self.close,
            self.high,
            self.low,
            self.volume,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brickline_types::{BarHistory, RawBar};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    /// Builds a one-minute history where each bar opens at the prior close.
    fn make_history(closes: &[f64]) -> BarHistory {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let mut bars = Vec::new();
        let mut prev_close = closes[0];
        for (i, &close) in closes.iter().enumerate() {
            let time = start + chrono::TimeDelta::minutes(i as i64);
            let open = prev_close;
            let high = open.max(close) + 0.0002;
            let low = open.min(close) - 0.0002;
            bars.push(RawBar::new(time, open, high, low, close, 100.0));
            prev_close = close;
        }
        BarHistory::from_bars(bars).unwrap()
    }

    fn pip_config() -> RenkoConfig {
        RenkoConfig::new(dec!(0.0010), 4).unwrap()
    }

    fn run(history: &BarHistory, config: RenkoConfig) -> (Vec<Brick>, Vec<Step>, Option<Brick>) {
        let mut aggregator = RenkoAggregator::new(config);
        let mut bricks = Vec::new();
        let mut steps = Vec::new();
        for index in 0..BarSource::len(history) {
            let step = aggregator.process(history, index).unwrap();
            if let Some(brick) = step.finalized {
                bricks.push(brick);
            }
            steps.push(step);
        }
        (bricks, steps, aggregator.finish())
    }

    #[test]
    fn test_first_brick_closes_at_unit() {
        let history = make_history(&[1.1000, 1.1005, 1.1011, 1.1009]);
        let (bricks, steps, open_brick) = run(&history, pip_config());

        assert_eq!(bricks.len(), 1);
        assert!(steps[2].finalized.is_some());

        let brick = &bricks[0];
        assert_eq!(brick.open, dec!(1.1000));
        assert_eq!(brick.close, dec!(1.1011));
        assert_eq!(brick.kind(), BrickKind::Bullish);

        // The 0.0002 pullback is a reversal and needs 0.0020 to close.
        assert!(steps[3].finalized.is_none());
        let partial = open_brick.unwrap();
        assert_eq!(partial.open, dec!(1.1011));
        assert_eq!(partial.close, dec!(1.1009));
        assert_eq!(partial.kind(), BrickKind::Bearish);
    }

    #[test]
    fn test_continuation_closes_at_unit() {
        let history = make_history(&[1.1000, 1.1005, 1.1011, 1.1009, 1.1021]);
        let (bricks, steps, _) = run(&history, pip_config());

        assert_eq!(bricks.len(), 2);
        assert!(steps[4].finalized.is_some());

        let second = &bricks[1];
        assert_eq!(second.open, bricks[0].close);
        assert_eq!(second.close, dec!(1.1021));
        assert_eq!(second.kind(), BrickKind::Bullish);
    }

    #[test]
    fn test_reversal_requires_double_and_spans_previous_body() {
        let history = make_history(&[1.1000, 1.1011, 1.1000, 1.0991]);
        let (bricks, steps, _) = run(&history, pip_config());

        // 0.0011 against a bullish brick is past one unit but short of two.
        assert!(steps[2].finalized.is_none());
        assert!(steps[3].finalized.is_some());
        assert_eq!(bricks.len(), 2);

        let reversal = &bricks[1];
        assert_eq!(reversal.kind(), BrickKind::Bearish);
        assert_eq!(reversal.close, dec!(1.0991));
        // The reversal's open is pulled back to the prior brick's open, so
        // its body overlaps the body it reversed.
        assert_eq!(reversal.open, bricks[0].open);
        assert_eq!(reversal.open, dec!(1.1000));
    }

    #[test]
    fn test_monotonic_run_closes_every_unit() {
        let history = make_history(&[1.1000, 1.1010, 1.1020, 1.1030, 1.1040]);
        let (bricks, _, _) = run(&history, pip_config());

        assert_eq!(bricks.len(), 4);
        for pair in bricks.windows(2) {
            assert_eq!(pair[1].open, pair[0].close);
            assert_eq!(pair[1].kind(), BrickKind::Bullish);
        }
        for brick in &bricks {
            assert_eq!(brick.body_range(), dec!(0.0010));
        }
    }

    #[test]
    fn test_gap_closes_single_oversized_brick() {
        let history = make_history(&[1.1000, 1.1035]);
        let (bricks, _, _) = run(&history, pip_config());

        assert_eq!(bricks.len(), 1);
        assert_eq!(bricks[0].body_range(), dec!(0.0035));
    }

    #[test]
    fn test_rounding_tie_break_away_from_zero() {
        let config = RenkoConfig::new(dec!(0.0009), 4).unwrap();
        let history = make_history(&[1.1000, 1.10045, 1.10085]);
        let (bricks, steps, _) = run(&history, config);

        // 0.00045 rounds to 0.0005: open. 0.00085 rounds to 0.0009: closed
        // at that step, not the one before.
        assert!(steps[1].finalized.is_none());
        assert!(steps[2].finalized.is_some());
        assert_eq!(bricks[0].close, dec!(1.10085));
    }

    #[test]
    fn test_half_tick_below_unit_still_closes() {
        let history = make_history(&[1.1000, 1.10095]);
        let (bricks, _, _) = run(&history, pip_config());

        // 0.00095 rounds up to 0.0010 and crosses the threshold.
        assert_eq!(bricks.len(), 1);
    }

    #[test]
    fn test_brick_covers_full_raw_range() {
        let history = make_history(&[1.1000, 1.1005, 1.1011]);
        let (bricks, _, _) = run(&history, pip_config());

        let brick = &bricks[0];
        assert_eq!(brick.start_time, history.bar(0).unwrap().time);
        assert_eq!(brick.end_time, history.bar(2).unwrap().time);
        assert!((brick.volume - 300.0).abs() < 1e-10);

        let high = history.max_high(0, 2).unwrap();
        let low = history.min_low(0, 2).unwrap();
        assert!((brick.high - high).abs() < 1e-12);
        assert!((brick.low - low).abs() < 1e-12);
    }

    #[test]
    fn test_preview_tracks_live_brick() {
        let history = make_history(&[1.1000, 1.1005, 1.1011, 1.1009]);
        let (_, steps, _) = run(&history, pip_config());

        // Before closure the preview is the evolving first brick.
        assert!((steps[1].preview.open - 1.1000).abs() < 1e-12);
        assert!((steps[1].preview.close - 1.1005).abs() < 1e-12);

        // Right after closure the preview is the fresh brick, already
        // reduced over its single-bar range.
        assert!((steps[2].preview.open - 1.1011).abs() < 1e-12);
        assert!((steps[2].preview.close - 1.1011).abs() < 1e-12);
        let bar = history.bar(2).unwrap();
        assert!((steps[2].preview.high - bar.high).abs() < 1e-12);
        assert!((steps[2].preview.low - bar.low).abs() < 1e-12);

        assert!((steps[3].preview.close - 1.1009).abs() < 1e-12);
    }

    #[test]
    fn test_replay_is_deterministic() {
        let history = make_history(&[1.1000, 1.1012, 1.1003, 1.0990, 1.1001, 1.1015]);
        let first = run(&history, pip_config());
        let second = run(&history, pip_config());

        assert_eq!(first.0, second.0);
        assert_eq!(first.2, second.2);
    }

    #[test]
    fn test_reprocessing_same_index_is_allowed() {
        let history = make_history(&[1.1000, 1.1005]);
        let mut aggregator = RenkoAggregator::new(pip_config());

        aggregator.process(&history, 0).unwrap();
        aggregator.process(&history, 1).unwrap();
        let step = aggregator.process(&history, 1).unwrap();
        assert!((step.preview.close - 1.1005).abs() < 1e-12);
    }

    #[test]
    fn test_index_regression_is_rejected() {
        let history = make_history(&[1.1000, 1.1005, 1.1011]);
        let mut aggregator = RenkoAggregator::new(pip_config());

        aggregator.process(&history, 0).unwrap();
        aggregator.process(&history, 2).unwrap();
        let err = aggregator.process(&history, 1).unwrap_err();
        assert!(matches!(err, BricklineError::IndexRegression { index: 1, last: 2 }));
    }

    #[test]
    fn test_index_out_of_range_is_rejected() {
        let history = make_history(&[1.1000]);
        let mut aggregator = RenkoAggregator::new(pip_config());

        let err = aggregator.process(&history, 1).unwrap_err();
        assert!(matches!(err, BricklineError::IndexOutOfRange { index: 1, len: 1 }));
    }

    #[test]
    fn test_unresolvable_start_time_is_fatal() {
        /// Source whose time lookup always fails.
        struct Amnesiac(BarHistory);

        impl BarSource for Amnesiac {
            fn len(&self) -> usize {
                BarSource::len(&self.0)
            }
            fn bar(&self, index: usize) -> Option<&RawBar> {
                self.0.bar(index)
            }
            fn index_of_time(&self, _time: chrono::DateTime<Utc>) -> Option<usize> {
                None
            }
        }

        let source = Amnesiac(make_history(&[1.1000, 1.1005]));
        let mut aggregator = RenkoAggregator::new(pip_config());
        let err = aggregator.process(&source, 0).unwrap_err();
        assert!(matches!(err, BricklineError::StartTimeNotFound { .. }));
    }

    #[test]
    fn test_threshold_selection() {
        let history = make_history(&[1.1000, 1.1011]);
        let (bricks, _, _) = run(&history, pip_config());
        let bullish = bricks[0];

        let mut aggregator = RenkoAggregator::new(pip_config());
        // Without a previous brick every kind closes at one unit.
        assert_eq!(aggregator.closing_threshold(BrickKind::Bullish), dec!(0.0010));
        assert_eq!(aggregator.closing_threshold(BrickKind::Neutral), dec!(0.0010));

        aggregator.previous = Some(bullish);
        assert_eq!(aggregator.closing_threshold(BrickKind::Bullish), dec!(0.0010));
        assert_eq!(aggregator.closing_threshold(BrickKind::Bearish), dec!(0.0020));
        // Neutral differs from both directions, so it reverses either.
        assert_eq!(aggregator.closing_threshold(BrickKind::Neutral), dec!(0.0020));
    }

    #[test]
    fn test_finish_without_bars() {
        let aggregator = RenkoAggregator::new(pip_config());
        assert!(aggregator.finish().is_none());
    }
}
