//! Finalized-brick emission and the replay driver.

use brickline_types::{BarSource, RenkoConfig, Result};

use crate::{Brick, OhlcSeries, OutputToggles, RenkoAggregator};

/// Receiver for finalized bricks.
///
/// Bricks arrive in finalization order, monotonic by start time. A host
/// charting layer would draw each brick here; the library ships a plain
/// collecting implementation for `Vec<Brick>`.
pub trait BrickSink {
    /// Accepts a finalized brick.
    ///
    /// # Errors
    ///
    /// Implementations may fail, e.g. on I/O; a failure aborts the replay.
    fn emit(&mut self, brick: Brick) -> Result<()>;
}

impl BrickSink for Vec<Brick> {
    fn emit(&mut self, brick: Brick) -> Result<()> {
        self.push(brick);
        Ok(())
    }
}

/// Folds an entire bar source through a fresh aggregator.
///
/// Every finalized brick goes to `sink`; the live-brick preview for each
/// index is recorded on the enabled output channels. Returns the recorded
/// series and the still-forming brick, if any.
///
/// # Errors
///
/// Propagates the first error from [`RenkoAggregator::process`] or the
/// sink; the fold stops there.
pub fn replay<S, K>(
    bars: &S,
    config: RenkoConfig,
    toggles: OutputToggles,
    sink: &mut K,
) -> Result<(OhlcSeries, Option<Brick>)>
where
    S: BarSource + ?Sized,
    K: BrickSink + ?Sized,
{
    let mut aggregator = RenkoAggregator::new(config);
    let mut series = OhlcSeries::new(toggles);
    for index in 0..bars.len() {
        let step = aggregator.process(bars, index)?;
        if let Some(brick) = step.finalized {
            sink.emit(brick)?;
        }
        series.record(index, &step.preview);
    }
    Ok((series, aggregator.finish()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use brickline_types::{BarHistory, RawBar};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn make_history(closes: &[f64]) -> BarHistory {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let mut bars = Vec::new();
        let mut prev_close = closes[0];
        for (i, &close) in closes.iter().enumerate() {
            let time = start + chrono::TimeDelta::minutes(i as i64);
            let high = prev_close.max(close) + 0.0002;
            let low = prev_close.min(close) - 0.0002;
            bars.push(RawBar::new(time, prev_close, high, low, close, 100.0));
            prev_close = close;
        }
        BarHistory::from_bars(bars).unwrap()
    }

    #[test]
    fn test_replay_collects_bricks_in_order() {
        let history = make_history(&[1.1000, 1.1010, 1.1020, 1.1015]);
        let config = RenkoConfig::new(dec!(0.0010), 4).unwrap();

        let mut bricks = Vec::new();
        let (series, partial) = replay(&history, config, OutputToggles::all(), &mut bricks).unwrap();

        assert_eq!(bricks.len(), 2);
        assert!(bricks[0].start_time <= bricks[1].start_time);
        assert_eq!(bricks[1].open, bricks[0].close);
        assert!(partial.is_some());

        // Every processed index has a value on every enabled channel.
        assert_eq!(series.len(), 4);
        assert!(series.open().iter().all(Option::is_some));
        assert!(series.high().iter().all(Option::is_some));
        assert!(series.low().iter().all(Option::is_some));
        assert!(series.close().iter().all(Option::is_some));
        assert_relative_eq!(series.close()[3].unwrap(), 1.1015);
    }

    #[test]
    fn test_replay_respects_toggles() {
        let history = make_history(&[1.1000, 1.1010]);
        let config = RenkoConfig::new(dec!(0.0010), 4).unwrap();
        let toggles = OutputToggles {
            open: false,
            ..OutputToggles::all()
        };

        let mut bricks = Vec::new();
        let (series, _) = replay(&history, config, toggles, &mut bricks).unwrap();

        assert!(series.open().iter().all(Option::is_none));
        assert!(series.close().iter().all(Option::is_some));
    }

    #[test]
    fn test_replay_empty_source() {
        let history = BarHistory::new();
        let config = RenkoConfig::new(dec!(0.0010), 4).unwrap();

        let mut bricks = Vec::new();
        let (series, partial) = replay(&history, config, OutputToggles::all(), &mut bricks).unwrap();

        assert!(bricks.is_empty());
        assert!(series.is_empty());
        assert!(partial.is_none());
    }
}
