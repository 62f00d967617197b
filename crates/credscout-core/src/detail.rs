//! Typed extraction of a single catalog row for detail views.

use chrono::{DateTime, NaiveDateTime};
use polars::prelude::*;
use serde::Serialize;

use credscout_parser::formats::schema;

use crate::error::Result;

#[derive(Debug, Clone, Serialize)]
pub struct ProgramDetail {
    pub program_id: i64,
    pub title: String,
    pub institution: String,
    pub credential_type: String,
    pub province: String,
    pub delivery_mode: String,
    pub duration_weeks: Option<f64>,
    pub duration_display: Option<String>,
    pub price_cad: Option<f64>,
    pub price_display: Option<String>,
    pub skills: Vec<String>,
    pub description: String,
    pub program_url: String,
    pub date_added: Option<NaiveDateTime>,
    pub offering_level: Option<String>,
    pub data_quality: Option<String>,
}

impl ProgramDetail {
    /// Duration as shown to a reader: the parsed week count when available,
    /// otherwise the retained source text.
    pub fn duration_label(&self) -> Option<String> {
        self.duration_weeks
            .map(|weeks| format!("{weeks:.1} weeks"))
            .or_else(|| self.duration_display.clone())
    }

    /// Price as shown to a reader, falling back to the source text.
    pub fn price_label(&self) -> Option<String> {
        self.price_cad
            .map(|price| format!("${price:.0}"))
            .or_else(|| self.price_display.clone())
    }
}

/// Extracts one row of the (usually filtered) view. Returns `None` for an
/// out-of-bounds index, including any index into an empty view.
pub fn program_at(df: &DataFrame, row: usize) -> Result<Option<ProgramDetail>> {
    if row >= df.height() {
        return Ok(None);
    }

    let opt_string = |column: &str| -> Result<Option<String>> {
        Ok(df.column(column)?.str()?.get(row).map(str::to_string))
    };
    let string = |column: &str| -> Result<String> {
        Ok(df
            .column(column)?
            .str()?
            .get(row)
            .unwrap_or_default()
            .to_string())
    };

    let skills = df
        .column(schema::COL_SKILLS)?
        .str()?
        .get(row)
        .filter(|entry| !entry.trim().eq_ignore_ascii_case("unknown"))
        .map(|entry| {
            entry
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let date_added = df
        .column(schema::COL_DATE_ADDED)?
        .datetime()?
        .get(row)
        .and_then(DateTime::from_timestamp_micros)
        .map(|dt| dt.naive_utc());

    Ok(Some(ProgramDetail {
        program_id: df
            .column(schema::COL_PROGRAM_ID)?
            .i64()?
            .get(row)
            .unwrap_or_default(),
        title: string(schema::COL_TITLE)?,
        institution: string(schema::COL_INSTITUTION)?,
        credential_type: string(schema::COL_CREDENTIAL_TYPE)?,
        province: string(schema::COL_PROVINCE)?,
        delivery_mode: string(schema::COL_DELIVERY_MODE)?,
        duration_weeks: df.column(schema::COL_DURATION_WEEKS)?.f64()?.get(row),
        duration_display: opt_string(schema::COL_DURATION_DISPLAY)?,
        price_cad: df.column(schema::COL_PRICE_CAD)?.f64()?.get(row),
        price_display: opt_string(schema::COL_PRICE_DISPLAY)?,
        skills,
        description: string(schema::COL_DESCRIPTION)?,
        program_url: string(schema::COL_PROGRAM_URL)?,
        date_added,
        offering_level: opt_string(schema::COL_OFFERING_LEVEL)?,
        data_quality: opt_string(schema::COL_DATA_QUALITY)?,
    }))
}
