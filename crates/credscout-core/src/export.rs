//! CSV re-serialization of a filtered view.

use chrono::NaiveDate;
use polars::prelude::*;

use crate::error::Result;

/// Serializes the view as UTF-8 CSV with a header row, using the same
/// column set as the in-memory table.
pub fn to_csv(df: &DataFrame) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut clone = df.clone();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(&mut clone)?;
    Ok(buffer)
}

/// Download filename embedding the export date.
pub fn filename(date: NaiveDate) -> String {
    format!("credscout_programs_{}.csv", date.format("%Y-%m-%d"))
}
