//! JSON output format.

use brickline_renko::{Brick, OhlcSeries};
use brickline_types::RawBar;
use serde::Serialize;
use std::io::Write;

use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

/// Series rendered as one nullable array per channel.
#[derive(Serialize)]
struct SeriesView<'a> {
    open: &'a [Option<f64>],
    high: &'a [Option<f64>],
    low: &'a [Option<f64>],
    close: &'a [Option<f64>],
}

/// One series index rendered as an NDJSON row.
#[derive(Serialize)]
struct SeriesRow {
    index: usize,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }

    /// Writes a serializable slice in the configured style.
    fn write_items<T: Serialize, W: Write>(
        &self,
        items: &[T],
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, items)?;
                } else {
                    serde_json::to_writer(&mut writer, items)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for item in items {
                    serde_json::to_writer(&mut writer, item)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }
}

impl Formatter for JsonFormatter {
    fn write_bars<W: Write + Send>(
        &self,
        bars: &[RawBar],
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_items(bars, writer)
    }

    fn write_bricks<W: Write + Send>(
        &self,
        bricks: &[Brick],
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_items(bricks, writer)
    }

    fn write_series<W: Write + Send>(
        &self,
        series: &OhlcSeries,
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array => {
                let view = SeriesView {
                    open: series.open(),
                    high: series.high(),
                    low: series.low(),
                    close: series.close(),
                };
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, &view)?;
                } else {
                    serde_json::to_writer(&mut writer, &view)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for index in 0..series.len() {
                    let row = SeriesRow {
                        index,
                        open: series.open()[index],
                        high: series.high()[index],
                        low: series.low()[index],
                        close: series.close()[index],
                    };
                    serde_json::to_writer(&mut writer, &row)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}
