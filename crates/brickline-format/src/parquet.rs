//! Apache Parquet output format.

use arrow::array::{Float64Array, StringArray, TimestampMicrosecondArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use brickline_renko::{Brick, OhlcSeries};
use brickline_types::RawBar;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use rust_decimal::prelude::ToPrimitive;
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter};

/// Parquet formatter.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Creates the Arrow schema for raw bar data.
    fn bar_schema() -> Schema {
        Schema::new(vec![
            Field::new(
                "time",
                DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
                false,
            ),
            Field::new("open", DataType::Float64, false),
            Field::new("high", DataType::Float64, false),
            Field::new("low", DataType::Float64, false),
            Field::new("close", DataType::Float64, false),
            Field::new("volume", DataType::Float64, false),
        ])
    }

    /// Creates the Arrow schema for brick data.
    fn brick_schema() -> Schema {
        Schema::new(vec![
            Field::new(
                "start_time",
                DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
                false,
            ),
            Field::new(
                "end_time",
                DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
                false,
            ),
            Field::new("open", DataType::Float64, false),
            Field::new("high", DataType::Float64, false),
            Field::new("low", DataType::Float64, false),
            Field::new("close", DataType::Float64, false),
            Field::new("volume", DataType::Float64, false),
            Field::new("kind", DataType::Utf8, false),
        ])
    }

    /// Creates the Arrow schema for the output series.
    fn series_schema() -> Schema {
        Schema::new(vec![
            Field::new("index", DataType::UInt64, false),
            Field::new("open", DataType::Float64, true),
            Field::new("high", DataType::Float64, true),
            Field::new("low", DataType::Float64, true),
            Field::new("close", DataType::Float64, true),
        ])
    }

    /// Converts raw bars to an Arrow RecordBatch.
    fn bars_to_batch(bars: &[RawBar]) -> Result<RecordBatch, FormatError> {
        let times: Vec<_> = bars.iter().map(|b| b.time.timestamp_micros()).collect();
        let opens: Vec<_> = bars.iter().map(|b| b.open).collect();
        let highs: Vec<_> = bars.iter().map(|b| b.high).collect();
        let lows: Vec<_> = bars.iter().map(|b| b.low).collect();
        let closes: Vec<_> = bars.iter().map(|b| b.close).collect();
        let volumes: Vec<_> = bars.iter().map(|b| b.volume).collect();

        RecordBatch::try_new(
            Arc::new(Self::bar_schema()),
            vec![
                Arc::new(TimestampMicrosecondArray::from(times).with_timezone("UTC")),
                Arc::new(Float64Array::from(opens)),
                Arc::new(Float64Array::from(highs)),
                Arc::new(Float64Array::from(lows)),
                Arc::new(Float64Array::from(closes)),
                Arc::new(Float64Array::from(volumes)),
            ],
        )
        .map_err(|e| FormatError::Parquet(e.to_string()))
    }

    /// Converts bricks to an Arrow RecordBatch.
    fn bricks_to_batch(bricks: &[Brick]) -> Result<RecordBatch, FormatError> {
        let starts: Vec<_> = bricks
            .iter()
            .map(|b| b.start_time.timestamp_micros())
            .collect();
        let ends: Vec<_> = bricks
            .iter()
            .map(|b| b.end_time.timestamp_micros())
            .collect();
        let opens: Vec<_> = bricks
            .iter()
            .map(|b| b.open.to_f64().unwrap_or(f64::NAN))
            .collect();
        let highs: Vec<_> = bricks.iter().map(|b| b.high).collect();
        let lows: Vec<_> = bricks.iter().map(|b| b.low).collect();
        let closes: Vec<_> = bricks
            .iter()
            .map(|b| b.close.to_f64().unwrap_or(f64::NAN))
            .collect();
        let volumes: Vec<_> = bricks.iter().map(|b| b.volume).collect();
        let kinds: Vec<_> = bricks.iter().map(|b| b.kind().as_str()).collect();

        RecordBatch::try_new(
            Arc::new(Self::brick_schema()),
            vec![
                Arc::new(TimestampMicrosecondArray::from(starts).with_timezone("UTC")),
                Arc::new(TimestampMicrosecondArray::from(ends).with_timezone("UTC")),
                Arc::new(Float64Array::from(opens)),
                Arc::new(Float64Array::from(highs)),
                Arc::new(Float64Array::from(lows)),
                Arc::new(Float64Array::from(closes)),
                Arc::new(Float64Array::from(volumes)),
                Arc::new(StringArray::from(kinds)),
            ],
        )
        .map_err(|e| FormatError::Parquet(e.to_string()))
    }

    /// Converts the output series to an Arrow RecordBatch.
    fn series_to_batch(series: &OhlcSeries) -> Result<RecordBatch, FormatError> {
        let indices: Vec<_> = (0..series.len() as u64).collect();

        RecordBatch::try_new(
            Arc::new(Self::series_schema()),
            vec![
                Arc::new(UInt64Array::from(indices)),
                Arc::new(Float64Array::from(series.open().to_vec())),
                Arc::new(Float64Array::from(series.high().to_vec())),
                Arc::new(Float64Array::from(series.low().to_vec())),
                Arc::new(Float64Array::from(series.close().to_vec())),
            ],
        )
        .map_err(|e| FormatError::Parquet(e.to_string()))
    }

    /// Writes record batches through an Arrow writer.
    fn write_batches<W: Write + Send>(
        &self,
        schema: Schema,
        batches: impl Iterator<Item = Result<RecordBatch, FormatError>>,
        writer: W,
    ) -> Result<(), FormatError> {
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer = ArrowWriter::try_new(writer, Arc::new(schema), Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        for batch in batches {
            arrow_writer
                .write(&batch?)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }
}

impl Formatter for ParquetFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[RawBar], writer: W) -> Result<(), FormatError> {
        self.write_batches(
            Self::bar_schema(),
            bars.chunks(self.row_group_size).map(Self::bars_to_batch),
            writer,
        )
    }

    fn write_bricks<W: Write + Send>(
        &self,
        bricks: &[Brick],
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_batches(
            Self::brick_schema(),
            bricks.chunks(self.row_group_size).map(Self::bricks_to_batch),
            writer,
        )
    }

    fn write_series<W: Write + Send>(
        &self,
        series: &OhlcSeries,
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_batches(
            Self::series_schema(),
            std::iter::once(Self::series_to_batch(series)),
            writer,
        )
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}
