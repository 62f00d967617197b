//! Heuristic cleanup for free-text scrape fields.
//!
//! Every function here is pure and total: unparseable input resolves to
//! `None` or a fallback category, never an error. Rows are independent, so
//! derivation order across rows does not affect output.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{DataQuality, OfferingLevel};

static FIRST_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("first-number regex is valid"));

fn is_missing(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(text) => {
            let trimmed = text.trim();
            trimmed.is_empty() || trimmed.eq_ignore_ascii_case("unknown")
        }
    }
}

/// Parses a free-text price like `"$1,234.00 CAD"` into a non-negative CAD
/// amount. Missing, non-numeric, or negative input resolves to `None`.
pub fn clean_price(raw: Option<&str>) -> Option<f64> {
    if is_missing(raw) {
        return None;
    }

    let cleaned: String = raw?
        .to_lowercase()
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();
    let cleaned = cleaned
        .strip_suffix("cad")
        .or_else(|| cleaned.strip_prefix("cad"))
        .unwrap_or(&cleaned);

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

/// Parses a free-text duration into weeks by scaling the first number found
/// by the unit keyword in the text. A value with no recognized unit is
/// ambiguous and resolves to `None` rather than defaulting.
pub fn clean_duration(raw: Option<&str>) -> Option<f64> {
    if is_missing(raw) {
        return None;
    }

    let text = raw?;
    let value: f64 = FIRST_NUMBER.find(text)?.as_str().parse().ok()?;
    let folded = text.to_lowercase();

    let weeks = if folded.contains("month") {
        value * 4.0
    } else if folded.contains("week") {
        value
    } else if folded.contains("day") {
        value / 7.0
    } else if folded.contains("hour") {
        value / 40.0
    } else if folded.contains("year") {
        value * 52.0
    } else {
        return None;
    };

    (weeks >= 0.0).then_some(weeks)
}

/// Inputs to the offering-level decision list.
#[derive(Debug, Clone)]
pub struct LevelSignals {
    pub price_cad: Option<f64>,
    pub duration_weeks: Option<f64>,
    credential_folded: String,
}

impl LevelSignals {
    pub fn new(
        price_cad: Option<f64>,
        duration_weeks: Option<f64>,
        credential_type: &str,
    ) -> Self {
        Self {
            price_cad,
            duration_weeks,
            credential_folded: credential_type.to_lowercase(),
        }
    }

    fn credential_contains(&self, needle: &str) -> bool {
        self.credential_folded.contains(needle)
    }
}

// A null price or duration satisfies no numeric condition.
fn below(value: Option<f64>, bound: f64) -> bool {
    value.is_some_and(|v| v < bound)
}

fn above(value: Option<f64>, bound: f64) -> bool {
    value.is_some_and(|v| v > bound)
}

fn is_micro_learning(s: &LevelSignals) -> bool {
    below(s.price_cad, 500.0) || below(s.duration_weeks, 2.0)
}

fn is_diploma(s: &LevelSignals) -> bool {
    above(s.price_cad, 5000.0) || above(s.duration_weeks, 24.0)
}

fn is_course(s: &LevelSignals) -> bool {
    s.credential_contains("course") && below(s.price_cad, 1000.0)
}

fn is_certificate_advanced(s: &LevelSignals) -> bool {
    is_certificate_family(s) && above(s.price_cad, 2000.0)
}

fn is_certificate_family(s: &LevelSignals) -> bool {
    s.credential_contains("certificate") || s.credential_contains("credential")
}

fn is_professional_development(s: &LevelSignals) -> bool {
    s.credential_contains("professional") || s.credential_contains("statement")
}

/// The decision list, top to bottom, first match wins. Order is load-bearing:
/// a 400-dollar certificate is micro-learning, not a certificate.
const LEVEL_RULES: &[(fn(&LevelSignals) -> bool, OfferingLevel)] = &[
    (is_micro_learning, OfferingLevel::MicroLearning),
    (is_diploma, OfferingLevel::Diploma),
    (is_course, OfferingLevel::Course),
    (is_certificate_advanced, OfferingLevel::CertificateAdvanced),
    (is_certificate_family, OfferingLevel::Certificate),
    (
        is_professional_development,
        OfferingLevel::ProfessionalDevelopment,
    ),
];

/// Buckets a row into one of the six offering levels.
pub fn categorize_offering_level(signals: &LevelSignals) -> OfferingLevel {
    for (applies, level) in LEVEL_RULES {
        if applies(signals) {
            return *level;
        }
    }
    OfferingLevel::Certificate
}

/// The raw text fields whose completeness determines the quality tier.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualitySignals<'a> {
    pub credential_type: Option<&'a str>,
    pub delivery_mode: Option<&'a str>,
    pub duration: Option<&'a str>,
    pub skills: Option<&'a str>,
    pub price: Option<&'a str>,
    pub description: Option<&'a str>,
}

impl QualitySignals<'_> {
    fn missing_count(&self) -> usize {
        [
            self.credential_type,
            self.delivery_mode,
            self.duration,
            self.skills,
            self.price,
            self.description,
        ]
        .into_iter()
        .filter(|field| is_missing(*field))
        .count()
    }
}

/// Grades a row by how many of its six informative fields are absent.
pub fn assess_quality(signals: &QualitySignals<'_>) -> DataQuality {
    match signals.missing_count() {
        0 | 1 => DataQuality::Good,
        2 | 3 => DataQuality::Moderate,
        _ => DataQuality::Poor,
    }
}
