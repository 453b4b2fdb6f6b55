//! Benchmark utilities for brickline.

use brickline_types::{BarHistory, RawBar};
use chrono::{TimeDelta, TimeZone, Utc};

/// Generates a deterministic random-walk bar history.
///
/// Uses a fixed-seed linear congruential generator so every run benchmarks
/// the same stream. Each bar moves the close by up to five pips in either
/// direction from the prior close.
#[must_use]
pub fn synthetic_history(bars: usize) -> BarHistory {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut price = 1.1000_f64;

    let mut history = BarHistory::new();
    for i in 0..bars {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let step = ((state >> 33) % 11) as f64 - 5.0;

        let open = price;
        let close = price + step * 0.0001;
        let high = open.max(close) + 0.0002;
        let low = open.min(close) - 0.0002;
        let time = start + TimeDelta::minutes(i as i64);
        history
            .push(RawBar::new(time, open, high, low, close, 100.0))
            .expect("synthetic bars are valid");
        price = close;
    }
    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use brickline_types::BarSource;

    #[test]
    fn test_synthetic_history_is_deterministic() {
        let a = synthetic_history(100);
        let b = synthetic_history(100);
        assert_eq!(a, b);
        assert_eq!(a.len(), 100);
    }
}
