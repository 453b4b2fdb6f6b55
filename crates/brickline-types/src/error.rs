//! Error types for brickline.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias for brickline operations.
pub type Result<T> = std::result::Result<T, BricklineError>;

/// Errors raised while building bricks from a raw bar stream.
///
/// Every variant is a fatal precondition violation: the aggregation is a
/// deterministic fold with no retry path, and a caller that hits one of
/// these must discard or rebuild the aggregator before feeding more bars.
#[derive(Error, Debug)]
pub enum BricklineError {
    /// Brick size must be strictly positive.
    #[error("Brick size must be positive, got {size}")]
    NonPositiveBrickSize {
        /// The rejected size.
        size: Decimal,
    },

    /// A bar index was outside the source's range.
    #[error("Bar index {index} out of range for source of length {len}")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Length of the bar source.
        len: usize,
    },

    /// Bar indices must be presented in non-decreasing order.
    #[error("Bar index {index} presented after index {last}")]
    IndexRegression {
        /// The rejected index.
        index: usize,
        /// The most recently processed index.
        last: usize,
    },

    /// Bar open times must be non-decreasing.
    #[error("Bar at {time} is earlier than its predecessor")]
    NonMonotonicTime {
        /// Open time of the rejected bar.
        time: DateTime<Utc>,
    },

    /// Bar prices and volume must be finite.
    #[error("Bar at {time} has a non-finite price or volume")]
    NonFinitePrice {
        /// Open time of the rejected bar.
        time: DateTime<Utc>,
    },

    /// The current brick's start time has no matching bar in the source.
    #[error("No bar opens at {time}; cannot resolve the current brick's start index")]
    StartTimeNotFound {
        /// The unresolved start time.
        time: DateTime<Utc>,
    },

    /// A range reduction was requested over an empty index range.
    #[error("Empty bar range: start {start} > end {end}")]
    EmptyRange {
        /// Start index of the range.
        start: usize,
        /// End index of the range.
        end: usize,
    },

    /// I/O error from a brick sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
