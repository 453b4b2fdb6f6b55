//! Renko brick aggregation for the brickline brick builder.
//!
//! This crate provides bar-to-brick aggregation with an asymmetric
//! threshold (one brick size to continue, two to reverse):
//!
//! - [`Brick`] - Finalized synthetic brick bar
//! - [`RenkoAggregator`] - Streaming aggregation state machine
//! - [`OhlcSeries`] / [`OutputToggles`] - Per-index live-brick output
//!   channels
//! - [`BrickSink`] / [`replay`] - Finalized-brick emission and the
//!   whole-source driver

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/brickline/brickline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod brick;
mod series;
mod sink;

pub use aggregator::{RenkoAggregator, Step};
pub use brick::Brick;
pub use series::{Ohlc, OhlcSeries, OutputToggles};
pub use sink::{BrickSink, replay};
