use std::fmt;

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Coarse offering tier derived from price, duration, and credential wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfferingLevel {
    MicroLearning,
    Course,
    Certificate,
    CertificateAdvanced,
    ProfessionalDevelopment,
    Diploma,
}

impl OfferingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferingLevel::MicroLearning => "micro_learning",
            OfferingLevel::Course => "course",
            OfferingLevel::Certificate => "certificate",
            OfferingLevel::CertificateAdvanced => "certificate_advanced",
            OfferingLevel::ProfessionalDevelopment => "professional_development",
            OfferingLevel::Diploma => "diploma",
        }
    }

    pub const ALL: [OfferingLevel; 6] = [
        OfferingLevel::MicroLearning,
        OfferingLevel::Course,
        OfferingLevel::Certificate,
        OfferingLevel::CertificateAdvanced,
        OfferingLevel::ProfessionalDevelopment,
        OfferingLevel::Diploma,
    ];
}

impl fmt::Display for OfferingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for OfferingLevel {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "micro_learning" | "micro-learning" => Ok(OfferingLevel::MicroLearning),
            "course" => Ok(OfferingLevel::Course),
            "certificate" => Ok(OfferingLevel::Certificate),
            "certificate_advanced" | "certificate-advanced" => {
                Ok(OfferingLevel::CertificateAdvanced)
            }
            "professional_development" | "professional-development" => {
                Ok(OfferingLevel::ProfessionalDevelopment)
            }
            "diploma" => Ok(OfferingLevel::Diploma),
            other => Err(format!("unknown offering level '{other}'")),
        }
    }
}

/// Completeness tier for a scraped row, ordered from most to least complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataQuality {
    Good,
    Moderate,
    Poor,
}

impl DataQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataQuality::Good => "good",
            DataQuality::Moderate => "moderate",
            DataQuality::Poor => "poor",
        }
    }
}

impl fmt::Display for DataQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DataQuality {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "good" => Ok(DataQuality::Good),
            "moderate" => Ok(DataQuality::Moderate),
            "poor" => Ok(DataQuality::Poor),
            other => Err(format!("unknown data quality tier '{other}'")),
        }
    }
}

/// Which of the two accepted CSV shapes produced a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    /// Header row with the normalized column set already present.
    Processed,
    /// Headerless positional scrape output; normalized fields are derived.
    RawScrape,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Processed => "processed",
            SourceFormat::RawScrape => "raw_scrape",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One loaded dataset: the normalized program table plus the shape it came from.
///
/// The frame is never mutated after load; query layers derive new frames.
#[derive(Debug, Clone)]
pub struct ProgramCatalog {
    pub df: DataFrame,
    pub source: SourceFormat,
}

impl ProgramCatalog {
    pub fn height(&self) -> usize {
        self.df.height()
    }
}
