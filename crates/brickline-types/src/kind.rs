//! Brick direction classification.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Direction of a brick, derived from its open and close prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrickKind {
    /// Close above open.
    Bullish,
    /// Close below open.
    Bearish,
    /// Close equal to open.
    Neutral,
}

impl BrickKind {
    /// Classifies a brick by comparing its open and close prices.
    #[must_use]
    pub fn of(open: Decimal, close: Decimal) -> Self {
        if open < close {
            Self::Bullish
        } else if open > close {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }

    /// Returns the kind as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Neutral => "neutral",
        }
    }

    /// Returns all brick kinds.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Bullish, Self::Bearish, Self::Neutral]
    }
}

impl std::fmt::Display for BrickKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BrickKind {
    type Err = BrickKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bullish" | "bull" | "up" => Ok(Self::Bullish),
            "bearish" | "bear" | "down" => Ok(Self::Bearish),
            "neutral" | "flat" => Ok(Self::Neutral),
            _ => Err(BrickKindParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid brick kind string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrickKindParseError(String);

impl std::fmt::Display for BrickKindParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid brick kind '{}', expected one of: bullish, bearish, neutral",
            self.0
        )
    }
}

impl std::error::Error for BrickKindParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_classification() {
        assert_eq!(BrickKind::of(dec!(1.1000), dec!(1.1010)), BrickKind::Bullish);
        assert_eq!(BrickKind::of(dec!(1.1010), dec!(1.1000)), BrickKind::Bearish);
        assert_eq!(BrickKind::of(dec!(1.1000), dec!(1.1000)), BrickKind::Neutral);
    }

    #[test]
    fn test_parse() {
        assert_eq!("bullish".parse::<BrickKind>().unwrap(), BrickKind::Bullish);
        assert_eq!("DOWN".parse::<BrickKind>().unwrap(), BrickKind::Bearish);
        assert!("sideways".parse::<BrickKind>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(BrickKind::Neutral.to_string(), "neutral");
    }
}
