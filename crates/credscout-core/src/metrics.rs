//! Summary statistics over a filtered catalog frame.
//!
//! Every aggregation degrades gracefully on an empty frame: counts are
//! zero, means and medians are `None`, frequency tables are empty.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use polars::prelude::*;
use serde::Serialize;

use credscout_parser::formats::schema;
use credscout_parser::OfferingLevel;

use crate::error::{PipelineError, Result};

/// Assumed number of separately scraped component courses per certificate,
/// used to correct raw unique-program counts. A fixed assumption carried
/// over from the source analysis, not derived from data; callers may pass
/// their own ratio.
pub const COURSES_PER_CERTIFICATE: f64 = 4.0;

#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    pub total_programs: usize,
    pub unfiltered_programs: usize,
    pub delta_vs_unfiltered: i64,
    pub distinct_institutions: usize,
    pub mean_price_cad: Option<f64>,
    pub median_price_cad: Option<f64>,
    pub added_last_30_days: usize,
    pub estimated_unique_programs: u64,
}

pub fn summarize(
    filtered: &DataFrame,
    unfiltered_programs: usize,
    now: DateTime<Utc>,
    courses_per_certificate: f64,
) -> Result<CatalogSummary> {
    let total_programs = filtered.height();

    let institutions = filtered.column(schema::COL_INSTITUTION)?.str()?;
    let distinct_institutions = institutions.iter().flatten().collect::<HashSet<_>>().len();

    let prices: Vec<f64> = filtered
        .column(schema::COL_PRICE_CAD)?
        .f64()?
        .iter()
        .flatten()
        .collect();
    let mean_price_cad = mean(&prices);
    let median_price_cad = median(prices);

    let window_start = (now - Duration::days(30)).timestamp_micros();
    let added_last_30_days = filtered
        .column(schema::COL_DATE_ADDED)?
        .datetime()?
        .iter()
        .flatten()
        .filter(|ts| *ts >= window_start)
        .count();

    let estimated_unique_programs = estimated_unique_programs(filtered, courses_per_certificate)?;

    Ok(CatalogSummary {
        total_programs,
        unfiltered_programs,
        delta_vs_unfiltered: total_programs as i64 - unfiltered_programs as i64,
        distinct_institutions,
        mean_price_cad,
        median_price_cad,
        added_last_30_days,
        estimated_unique_programs,
    })
}

/// Estimates how many distinct programs the view covers: component courses
/// of one certificate are scraped as separate rows, so course-level rows
/// are discounted by the per-certificate ratio.
pub fn estimated_unique_programs(df: &DataFrame, courses_per_certificate: f64) -> Result<u64> {
    if !courses_per_certificate.is_finite() || courses_per_certificate <= 0.0 {
        return Err(PipelineError::Validation(format!(
            "courses-per-certificate ratio must be positive, got {courses_per_certificate}"
        )));
    }

    let levels = df.column(schema::COL_OFFERING_LEVEL)?.str()?;
    let course_rows = levels
        .iter()
        .flatten()
        .filter(|level| *level == OfferingLevel::Course.as_str())
        .count();
    let non_course_rows = df.height() - course_rows;

    Ok((non_course_rows as f64 + course_rows as f64 / courses_per_certificate).round() as u64)
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

/// Frequency of individual skill tokens across the view, descending by
/// count. Counting is stable: ties keep first-encountered order.
pub fn skill_frequencies(df: &DataFrame) -> Result<Vec<SkillCount>> {
    let skills = df.column(schema::COL_SKILLS)?.str()?;

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for entry in skills.iter().flatten() {
        if entry.trim().eq_ignore_ascii_case("unknown") {
            continue;
        }
        for token in entry.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            if !counts.contains_key(token) {
                order.push(token.to_string());
            }
            *counts.entry(token.to_string()).or_insert(0) += 1;
        }
    }

    let mut frequencies: Vec<SkillCount> = order
        .into_iter()
        .map(|skill| {
            let count = counts[&skill];
            SkillCount { skill, count }
        })
        .collect();
    // stable sort keeps insertion order within equal counts
    frequencies.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(frequencies)
}

pub fn top_skills(df: &DataFrame, limit: usize) -> Result<Vec<SkillCount>> {
    let mut frequencies = skill_frequencies(df)?;
    frequencies.truncate(limit);
    Ok(frequencies)
}

#[derive(Debug, Clone, Serialize)]
pub struct InstitutionStats {
    pub institution: String,
    pub programs: usize,
    pub mean_price_cad: Option<f64>,
    pub mean_duration_weeks: Option<f64>,
}

#[derive(Default)]
struct InstitutionAccumulator {
    programs: usize,
    price_sum: f64,
    price_rows: usize,
    duration_sum: f64,
    duration_rows: usize,
}

/// Per-institution rollup (row count, mean price, mean duration), sorted
/// descending by count and capped at `limit`.
pub fn institution_rollup(df: &DataFrame, limit: usize) -> Result<Vec<InstitutionStats>> {
    let institutions = df.column(schema::COL_INSTITUTION)?.str()?;
    let prices = df.column(schema::COL_PRICE_CAD)?.f64()?;
    let durations = df.column(schema::COL_DURATION_WEEKS)?.f64()?;

    let mut order: Vec<String> = Vec::new();
    let mut accumulators: HashMap<String, InstitutionAccumulator> = HashMap::new();

    for idx in 0..df.height() {
        let Some(institution) = institutions.get(idx) else {
            continue;
        };
        if !accumulators.contains_key(institution) {
            order.push(institution.to_string());
        }
        let acc = accumulators.entry(institution.to_string()).or_default();
        acc.programs += 1;
        if let Some(price) = prices.get(idx) {
            acc.price_sum += price;
            acc.price_rows += 1;
        }
        if let Some(duration) = durations.get(idx) {
            acc.duration_sum += duration;
            acc.duration_rows += 1;
        }
    }

    let mut rollup: Vec<InstitutionStats> = order
        .into_iter()
        .map(|institution| {
            let acc = &accumulators[&institution];
            InstitutionStats {
                institution,
                programs: acc.programs,
                mean_price_cad: (acc.price_rows > 0)
                    .then(|| acc.price_sum / acc.price_rows as f64),
                mean_duration_weeks: (acc.duration_rows > 0)
                    .then(|| acc.duration_sum / acc.duration_rows as f64),
            }
        })
        .collect();
    rollup.sort_by(|a, b| b.programs.cmp(&a.programs));
    rollup.truncate(limit);
    Ok(rollup)
}
