//! CSV input for raw bar streams.

use brickline_types::RawBar;
use std::io::Read;

use crate::FormatError;

/// Reads raw bars from CSV input.
///
/// Expects a header row `time,open,high,low,close,volume` with RFC 3339
/// timestamps, e.g. `2024-01-15T12:30:00Z,1.1000,1.1015,1.0995,1.1010,250`.
/// Bars are returned in file order; stream-order validation belongs to
/// [`BarHistory`](brickline_types::BarHistory).
///
/// # Errors
///
/// Returns [`FormatError::Csv`] for malformed rows or missing columns.
pub fn read_bars<R: Read>(reader: R) -> Result<Vec<RawBar>, FormatError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut bars = Vec::new();
    for record in csv_reader.deserialize() {
        let bar: RawBar = record?;
        bars.push(bar);
    }
    Ok(bars)
}
