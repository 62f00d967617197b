use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;

use crate::errors::ParserError;

use super::schema;

/// Column vectors accumulated while reading a catalog, one entry per row.
#[derive(Debug, Default)]
pub(crate) struct ProgramColumns {
    pub program_id: Vec<i64>,
    pub title: Vec<String>,
    pub institution: Vec<String>,
    pub credential_type: Vec<String>,
    pub province: Vec<String>,
    pub delivery_mode: Vec<String>,
    pub duration_weeks: Vec<Option<f64>>,
    pub duration_display: Vec<Option<String>>,
    pub price_cad: Vec<Option<f64>>,
    pub price_display: Vec<Option<String>>,
    pub skills: Vec<Option<String>>,
    pub description: Vec<String>,
    pub program_url: Vec<String>,
    pub date_added: Vec<Option<i64>>,
    pub offering_level: Vec<Option<String>>,
    pub data_quality: Vec<Option<String>>,
}

impl ProgramColumns {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            program_id: Vec::with_capacity(capacity),
            title: Vec::with_capacity(capacity),
            institution: Vec::with_capacity(capacity),
            credential_type: Vec::with_capacity(capacity),
            province: Vec::with_capacity(capacity),
            delivery_mode: Vec::with_capacity(capacity),
            duration_weeks: Vec::with_capacity(capacity),
            duration_display: Vec::with_capacity(capacity),
            price_cad: Vec::with_capacity(capacity),
            price_display: Vec::with_capacity(capacity),
            skills: Vec::with_capacity(capacity),
            description: Vec::with_capacity(capacity),
            program_url: Vec::with_capacity(capacity),
            date_added: Vec::with_capacity(capacity),
            offering_level: Vec::with_capacity(capacity),
            data_quality: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.program_id.len()
    }
}

fn str_column(name: &str, values: &[String]) -> Column {
    let utf8: Vec<&str> = values.iter().map(String::as_str).collect();
    Series::new(name.into(), utf8).into()
}

fn opt_str_column(name: &str, values: &[Option<String>]) -> Column {
    let utf8: Vec<Option<&str>> = values.iter().map(|v| v.as_deref()).collect();
    Series::new(name.into(), utf8).into()
}

/// Assembles the accumulated columns into the canonical catalog frame.
pub(crate) fn build_program_dataframe(
    parser: &'static str,
    columns: ProgramColumns,
) -> Result<DataFrame, ParserError> {
    let rows = columns.len();
    let lengths = [
        (schema::COL_TITLE, columns.title.len()),
        (schema::COL_INSTITUTION, columns.institution.len()),
        (schema::COL_CREDENTIAL_TYPE, columns.credential_type.len()),
        (schema::COL_PROVINCE, columns.province.len()),
        (schema::COL_DELIVERY_MODE, columns.delivery_mode.len()),
        (schema::COL_DURATION_WEEKS, columns.duration_weeks.len()),
        (schema::COL_DURATION_DISPLAY, columns.duration_display.len()),
        (schema::COL_PRICE_CAD, columns.price_cad.len()),
        (schema::COL_PRICE_DISPLAY, columns.price_display.len()),
        (schema::COL_SKILLS, columns.skills.len()),
        (schema::COL_DESCRIPTION, columns.description.len()),
        (schema::COL_PROGRAM_URL, columns.program_url.len()),
        (schema::COL_DATE_ADDED, columns.date_added.len()),
        (schema::COL_OFFERING_LEVEL, columns.offering_level.len()),
        (schema::COL_DATA_QUALITY, columns.data_quality.len()),
    ];
    for (name, len) in lengths {
        if len != rows {
            return Err(ParserError::Validation {
                parser,
                message: format!("column '{name}' had {len} rows, expected {rows}"),
            });
        }
    }

    let date_series = Series::new(schema::COL_DATE_ADDED.into(), columns.date_added)
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))
        .map_err(|err| ParserError::Validation {
            parser,
            message: format!("failed to cast date_added column: {err}"),
        })?;

    let cols: Vec<Column> = vec![
        Series::new(schema::COL_PROGRAM_ID.into(), columns.program_id).into(),
        str_column(schema::COL_TITLE, &columns.title),
        str_column(schema::COL_INSTITUTION, &columns.institution),
        str_column(schema::COL_CREDENTIAL_TYPE, &columns.credential_type),
        str_column(schema::COL_PROVINCE, &columns.province),
        str_column(schema::COL_DELIVERY_MODE, &columns.delivery_mode),
        Series::new(schema::COL_DURATION_WEEKS.into(), columns.duration_weeks).into(),
        opt_str_column(schema::COL_DURATION_DISPLAY, &columns.duration_display),
        Series::new(schema::COL_PRICE_CAD.into(), columns.price_cad).into(),
        opt_str_column(schema::COL_PRICE_DISPLAY, &columns.price_display),
        opt_str_column(schema::COL_SKILLS, &columns.skills),
        str_column(schema::COL_DESCRIPTION, &columns.description),
        str_column(schema::COL_PROGRAM_URL, &columns.program_url),
        date_series.into(),
        opt_str_column(schema::COL_OFFERING_LEVEL, &columns.offering_level),
        opt_str_column(schema::COL_DATA_QUALITY, &columns.data_quality),
    ];

    DataFrame::new(cols).map_err(|err| ParserError::Validation {
        parser,
        message: format!("failed to build catalog dataframe: {err}"),
    })
}

pub(crate) fn clean_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

/// Parses a calendar date (or datetime) into microseconds since the epoch.
/// Missing or unparseable values become `None`; dates never reject a row.
pub(crate) fn parse_date_micros(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(midnight.and_utc().timestamp_micros());
    }

    static DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.and_utc().timestamp_micros());
        }
    }

    None
}

pub(crate) fn parse_optional_f64(value: Option<&str>) -> Option<f64> {
    let trimmed = value?.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("unknown")
    {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub(crate) fn parse_optional_i64(value: Option<&str>) -> Option<i64> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}
