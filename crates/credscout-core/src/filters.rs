//! Filter predicates over a loaded catalog frame.
//!
//! A filter is a conjunction of optional clauses; an unset clause matches
//! every row. Applying a filter derives a new frame and never mutates the
//! base table, so applying the same filter twice is a no-op.

use std::collections::BTreeSet;

use polars::prelude::*;

use credscout_parser::formats::schema;
use credscout_parser::{DataQuality, OfferingLevel};

use crate::error::Result;

/// Inclusive numeric bound for a range clause.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProgramFilter {
    /// Case-insensitive substring matched against title, institution,
    /// skills, and description; a row matches if any field contains it.
    pub search: Option<String>,
    pub credential_type: Option<String>,
    pub province: Option<String>,
    pub delivery_mode: Option<String>,
    pub institution: Option<String>,
    pub offering_level: Option<OfferingLevel>,
    pub data_quality: Option<DataQuality>,
    /// Rows with a null price pass; incomplete scraped rows stay visible.
    pub price_cad: Option<NumericRange>,
    /// Rows with a null duration pass, same policy as price.
    pub duration_weeks: Option<NumericRange>,
}

impl ProgramFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.credential_type.is_none()
            && self.province.is_none()
            && self.delivery_mode.is_none()
            && self.institution.is_none()
            && self.offering_level.is_none()
            && self.data_quality.is_none()
            && self.price_cad.is_none()
            && self.duration_weeks.is_none()
    }

    pub fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        if self.is_empty() || df.height() == 0 {
            return Ok(df.clone());
        }

        let len = df.height();
        let mut mask = vec![true; len];

        if let Some(term) = self.search.as_deref() {
            let needle = term.to_lowercase();
            let title = df.column(schema::COL_TITLE)?.str()?;
            let institution = df.column(schema::COL_INSTITUTION)?.str()?;
            let skills = df.column(schema::COL_SKILLS)?.str()?;
            let description = df.column(schema::COL_DESCRIPTION)?.str()?;

            for (idx, keep) in mask.iter_mut().enumerate() {
                let hit = [
                    title.get(idx),
                    institution.get(idx),
                    skills.get(idx),
                    description.get(idx),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle));
                *keep = *keep && hit;
            }
        }

        let equality_clauses = [
            (schema::COL_CREDENTIAL_TYPE, self.credential_type.as_deref()),
            (schema::COL_PROVINCE, self.province.as_deref()),
            (schema::COL_DELIVERY_MODE, self.delivery_mode.as_deref()),
            (schema::COL_INSTITUTION, self.institution.as_deref()),
            (
                schema::COL_OFFERING_LEVEL,
                self.offering_level.map(|level| level.as_str()),
            ),
            (
                schema::COL_DATA_QUALITY,
                self.data_quality.map(|tier| tier.as_str()),
            ),
        ];
        for (column, selected) in equality_clauses {
            let Some(wanted) = selected else { continue };
            let values = df.column(column)?.str()?;
            for (idx, keep) in mask.iter_mut().enumerate() {
                *keep = *keep && values.get(idx) == Some(wanted);
            }
        }

        let range_clauses = [
            (schema::COL_PRICE_CAD, self.price_cad),
            (schema::COL_DURATION_WEEKS, self.duration_weeks),
        ];
        for (column, selected) in range_clauses {
            let Some(range) = selected else { continue };
            let values = df.column(column)?.f64()?;
            for (idx, keep) in mask.iter_mut().enumerate() {
                // null passes: absence is not exclusion under a range filter
                let pass = values.get(idx).map_or(true, |value| range.contains(value));
                *keep = *keep && pass;
            }
        }

        let mask_ca: BooleanChunked = mask.into_iter().map(Some).collect();
        Ok(df.filter(&mask_ca)?)
    }
}

/// Sorted distinct non-null values of a categorical column, for host filter
/// widgets (which prepend their own "All" sentinel).
pub fn facet_values(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let values = df.column(column)?.str()?;
    let distinct: BTreeSet<&str> = values.iter().flatten().collect();
    Ok(distinct.into_iter().map(str::to_string).collect())
}
