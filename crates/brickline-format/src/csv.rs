//! CSV output format.

use brickline_renko::{Brick, OhlcSeries};
use brickline_types::RawBar;
use std::io::Write;

use crate::{FormatError, Formatter};

/// CSV formatter.
#[derive(Debug, Clone, Default)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }
}

/// Formats a sparse channel value, leaving the cell empty for `None`.
fn cell(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| v.to_string())
}

impl Formatter for CsvFormatter {
    fn write_bars<W: Write + Send>(
        &self,
        bars: &[RawBar],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "time{d}open{d}high{d}low{d}close{d}volume")?;
        }

        for bar in bars {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                bar.time.format("%Y-%m-%dT%H:%M:%SZ"),
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.volume
            )?;
        }

        Ok(())
    }

    fn write_bricks<W: Write + Send>(
        &self,
        bricks: &[Brick],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(
                writer,
                "start_time{d}end_time{d}open{d}high{d}low{d}close{d}volume{d}kind"
            )?;
        }

        for brick in bricks {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                brick.start_time.format("%Y-%m-%dT%H:%M:%SZ"),
                brick.end_time.format("%Y-%m-%dT%H:%M:%SZ"),
                brick.open,
                brick.high,
                brick.low,
                brick.close,
                brick.volume,
                brick.kind()
            )?;
        }

        Ok(())
    }

    fn write_series<W: Write + Send>(
        &self,
        series: &OhlcSeries,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "index{d}open{d}high{d}low{d}close")?;
        }

        for index in 0..series.len() {
            writeln!(
                writer,
                "{index}{d}{}{d}{}{d}{}{d}{}",
                cell(series.open()[index]),
                cell(series.high()[index]),
                cell(series.low()[index]),
                cell(series.close()[index])
            )?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brickline_renko::{Ohlc, OutputToggles};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    fn create_test_brick() -> Brick {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 15, 12, 45, 0).unwrap();
        Brick::new(start, end, dec!(1.1000), dec!(1.1010), 1.1015, 1.0995, 500.0)
    }

    #[test]
    fn test_csv_bricks() {
        let formatter = CsvFormatter::new();
        let bricks = vec![create_test_brick()];
        let mut output = Cursor::new(Vec::new());

        formatter.write_bricks(&bricks, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains("start_time,end_time,open,high,low,close,volume,kind"));
        assert!(result.contains("2024-01-15T12:30:00Z"));
        assert!(result.contains("bullish"));
    }

    #[test]
    fn test_csv_no_header() {
        let formatter = CsvFormatter::new().with_header(false);
        let bricks = vec![create_test_brick()];
        let mut output = Cursor::new(Vec::new());

        formatter.write_bricks(&bricks, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(!result.contains("start_time"));
    }

    #[test]
    fn test_tsv() {
        let formatter = CsvFormatter::tsv();
        let bar = RawBar::new(
            Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 0).unwrap(),
            1.1000,
            1.1015,
            1.0995,
            1.1010,
            250.0,
        );
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&[bar], &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains("time\topen\thigh"));
    }

    #[test]
    fn test_csv_series_blank_cells() {
        let toggles = OutputToggles {
            high: false,
            ..OutputToggles::all()
        };
        let mut series = OhlcSeries::new(toggles);
        series.record(
            0,
            &Ohlc {
                open: 1.1,
                high: 1.2,
                low: 1.0,
                close: 1.15,
            },
        );

        let formatter = CsvFormatter::new();
        let mut output = Cursor::new(Vec::new());
        formatter.write_series(&series, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let mut lines = result.lines();
        assert_eq!(lines.next().unwrap(), "index,open,high,low,close");
        assert_eq!(lines.next().unwrap(), "0,1.1,,1,1.15");
    }
}
