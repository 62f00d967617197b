use anyhow::{anyhow, Result};
use clap::Args;

use credscout_core::filters::{NumericRange, ProgramFilter};
use credscout_parser::{DataQuality, OfferingLevel};

/// Filter flags shared by every subcommand; unset flags match everything.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Case-insensitive search across title, institution, skills, and description
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub credential_type: Option<String>,
    #[arg(long)]
    pub province: Option<String>,
    #[arg(long)]
    pub delivery_mode: Option<String>,
    #[arg(long)]
    pub institution: Option<String>,
    /// One of: micro_learning, course, certificate, certificate_advanced,
    /// professional_development, diploma
    #[arg(long)]
    pub offering_level: Option<String>,
    /// One of: good, moderate, poor
    #[arg(long)]
    pub data_quality: Option<String>,
    /// Inclusive lower price bound in CAD
    #[arg(long)]
    pub min_price: Option<f64>,
    /// Inclusive upper price bound in CAD
    #[arg(long)]
    pub max_price: Option<f64>,
    /// Inclusive lower duration bound in weeks
    #[arg(long)]
    pub min_duration: Option<f64>,
    /// Inclusive upper duration bound in weeks
    #[arg(long)]
    pub max_duration: Option<f64>,
}

fn range(min: Option<f64>, max: Option<f64>) -> Option<NumericRange> {
    if min.is_none() && max.is_none() {
        return None;
    }
    Some(NumericRange::new(
        min.unwrap_or(0.0),
        max.unwrap_or(f64::INFINITY),
    ))
}

impl FilterArgs {
    pub fn to_filter(&self) -> Result<ProgramFilter> {
        let offering_level = self
            .offering_level
            .as_deref()
            .map(OfferingLevel::try_from)
            .transpose()
            .map_err(|err| anyhow!(err))?;
        let data_quality = self
            .data_quality
            .as_deref()
            .map(DataQuality::try_from)
            .transpose()
            .map_err(|err| anyhow!(err))?;

        Ok(ProgramFilter {
            search: self.search.clone(),
            credential_type: self.credential_type.clone(),
            province: self.province.clone(),
            delivery_mode: self.delivery_mode.clone(),
            institution: self.institution.clone(),
            offering_level,
            data_quality,
            price_cad: range(self.min_price, self.max_price),
            duration_weeks: range(self.min_duration, self.max_duration),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_the_filter() {
        let args = FilterArgs {
            search: Some("python".to_string()),
            province: Some("ON".to_string()),
            offering_level: Some("course".to_string()),
            data_quality: Some("good".to_string()),
            min_price: Some(100.0),
            max_price: Some(4999.0),
            ..Default::default()
        };

        let filter = args.to_filter().unwrap();
        assert_eq!(filter.search.as_deref(), Some("python"));
        assert_eq!(filter.offering_level, Some(OfferingLevel::Course));
        assert_eq!(filter.data_quality, Some(DataQuality::Good));
        assert_eq!(filter.price_cad, Some(NumericRange::new(100.0, 4999.0)));
        assert_eq!(filter.duration_weeks, None);
    }

    #[test]
    fn single_sided_ranges_default_the_open_bound() {
        let args = FilterArgs {
            max_duration: Some(10.0),
            ..Default::default()
        };
        let filter = args.to_filter().unwrap();
        assert_eq!(filter.duration_weeks, Some(NumericRange::new(0.0, 10.0)));
    }

    #[test]
    fn unknown_offering_level_is_rejected() {
        let args = FilterArgs {
            offering_level: Some("bootcamp".to_string()),
            ..Default::default()
        };
        assert!(args.to_filter().is_err());
    }
}
