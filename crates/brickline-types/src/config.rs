//! Aggregation configuration.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::{BricklineError, Result};

/// Configuration for the renko brick aggregation.
///
/// A brick closes once its body range reaches one `brick_size` when
/// continuing in the prior brick's direction, and twice `brick_size` when
/// reversing against it. `digits` is the symbol's decimal precision, applied
/// to the body range before the threshold comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenkoConfig {
    /// Minimum body movement to close a continuation brick.
    brick_size: Decimal,
    /// Symbol decimal precision for body-range rounding.
    digits: u32,
}

impl RenkoConfig {
    /// Creates a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BricklineError::NonPositiveBrickSize`] unless `brick_size`
    /// is strictly positive.
    pub fn new(brick_size: Decimal, digits: u32) -> Result<Self> {
        if brick_size <= Decimal::ZERO {
            return Err(BricklineError::NonPositiveBrickSize { size: brick_size });
        }
        Ok(Self { brick_size, digits })
    }

    /// Returns the brick size.
    #[must_use]
    pub const fn brick_size(&self) -> Decimal {
        self.brick_size
    }

    /// Returns the symbol decimal precision.
    #[must_use]
    pub const fn digits(&self) -> u32 {
        self.digits
    }

    /// Returns the reversal threshold (twice the brick size).
    #[must_use]
    pub fn reversal_size(&self) -> Decimal {
        self.brick_size * Decimal::TWO
    }

    /// Rounds a body range to the symbol precision.
    ///
    /// Midpoints round away from zero, so a body exactly half a tick short
    /// of a threshold still crosses it.
    #[must_use]
    pub fn round_body(&self, body: Decimal) -> Decimal {
        body.round_dp_with_strategy(self.digits, RoundingStrategy::MidpointAwayFromZero)
    }
}
