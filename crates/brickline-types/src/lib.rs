//! Core types for the brickline renko brick builder.
//!
//! This crate provides the fundamental data structures used throughout
//! brickline:
//!
//! - [`RawBar`] - A raw OHLCV price bar from the host series
//! - [`BarSource`] / [`BarHistory`] - Indexed, read-only bar history with
//!   range reductions
//! - [`BrickKind`] - Bullish/bearish/neutral brick classification
//! - [`RenkoConfig`] - Brick size, reversal threshold, and rounding precision

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/brickline/brickline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod config;
mod error;
mod kind;
mod source;

pub use bar::RawBar;
pub use config::RenkoConfig;
pub use error::{BricklineError, Result};
pub use kind::{BrickKind, BrickKindParseError};
pub use source::{BarHistory, BarSource};
