use csv::StringRecord;

use crate::errors::ParserError;
use crate::model::{ProgramCatalog, SourceFormat};
use crate::normalize::{
    assess_quality, categorize_offering_level, clean_duration, clean_price, LevelSignals,
    QualitySignals,
};
use crate::registry::CatalogParser;

use super::schema;
use super::{build_program_dataframe, clean_optional, parse_date_micros, ProgramColumns};

const FIELD_INSTITUTION: usize = 0;
const FIELD_TITLE: usize = 1;
const FIELD_CREDENTIAL_TYPE: usize = 2;
const FIELD_DELIVERY_MODE: usize = 3;
const FIELD_DURATION: usize = 4;
const FIELD_SKILLS: usize = 5;
const FIELD_PRICE: usize = 6;
const FIELD_DESCRIPTION: usize = 7;
const FIELD_URL: usize = 8;
const FIELD_SCRAPED_DATE: usize = 9;

/// Parser for headerless raw scrape output with ten positional columns.
///
/// Price, duration, offering level, and data quality are derived per row via
/// the normalization heuristics; identifiers are assigned sequentially and
/// the province is not present in the source, so it loads as `"Unknown"`.
pub struct RawScrapeParser;

impl Default for RawScrapeParser {
    fn default() -> Self {
        Self
    }
}

impl RawScrapeParser {
    const NAME: &'static str = "RAW_SCRAPE";

    fn looks_like_processed_header(record: &StringRecord) -> bool {
        record.iter().any(|field| {
            let folded = field.trim().to_ascii_lowercase();
            schema::PROCESSED_MARKER_COLUMNS.contains(&folded.as_str())
                || folded == schema::COL_TITLE
                || folded == schema::COL_DATE_ADDED
        })
    }

    fn field<'a>(record: &'a StringRecord, idx: usize) -> Option<&'a str> {
        record.get(idx).map(str::trim).filter(|v| !v.is_empty())
    }
}

impl CatalogParser for RawScrapeParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&self, content: &str) -> Result<ProgramCatalog, ParserError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut columns = ProgramColumns::with_capacity(16);

        for (row_idx, record) in reader.records().enumerate() {
            let record = record.map_err(|err| ParserError::Csv {
                parser: Self::NAME,
                source: err,
            })?;
            let line_index = row_idx + 1;

            if row_idx == 0 {
                if Self::looks_like_processed_header(&record) {
                    return Err(ParserError::FormatMismatch {
                        parser: Self::NAME,
                        reason: "first row looks like a processed catalog header".to_string(),
                    });
                }
                if record.len() != schema::RAW_SCRAPE_FIELD_COUNT {
                    return Err(ParserError::FormatMismatch {
                        parser: Self::NAME,
                        reason: format!(
                            "expected {} positional columns, found {}",
                            schema::RAW_SCRAPE_FIELD_COUNT,
                            record.len()
                        ),
                    });
                }
            } else if record.len() != schema::RAW_SCRAPE_FIELD_COUNT {
                return Err(ParserError::DataRow {
                    parser: Self::NAME,
                    line_index,
                    message: format!(
                        "expected {} columns but found {}",
                        schema::RAW_SCRAPE_FIELD_COUNT,
                        record.len()
                    ),
                });
            }

            let credential_type = Self::field(&record, FIELD_CREDENTIAL_TYPE);
            let delivery_mode = Self::field(&record, FIELD_DELIVERY_MODE);
            let duration_text = Self::field(&record, FIELD_DURATION);
            let skills_text = Self::field(&record, FIELD_SKILLS);
            let price_text = Self::field(&record, FIELD_PRICE);
            let description = Self::field(&record, FIELD_DESCRIPTION);

            let price_cad = clean_price(price_text);
            let duration_weeks = clean_duration(duration_text);

            let level = categorize_offering_level(&LevelSignals::new(
                price_cad,
                duration_weeks,
                credential_type.unwrap_or_default(),
            ));
            let quality = assess_quality(&QualitySignals {
                credential_type,
                delivery_mode,
                duration: duration_text,
                skills: skills_text,
                price: price_text,
                description,
            });

            columns.program_id.push(row_idx as i64);
            columns
                .title
                .push(Self::field(&record, FIELD_TITLE).unwrap_or_default().to_string());
            columns.institution.push(
                Self::field(&record, FIELD_INSTITUTION)
                    .unwrap_or_default()
                    .to_string(),
            );
            columns
                .credential_type
                .push(credential_type.unwrap_or_default().to_string());
            // the scrape carries no province column
            columns.province.push("Unknown".to_string());
            columns
                .delivery_mode
                .push(delivery_mode.unwrap_or_default().to_string());
            columns.duration_weeks.push(duration_weeks);
            columns
                .duration_display
                .push(duration_text.map(|v| v.to_string()));
            columns.price_cad.push(price_cad);
            columns.price_display.push(price_text.map(|v| v.to_string()));
            columns
                .skills
                .push(clean_optional(skills_text));
            columns
                .description
                .push(description.unwrap_or_default().to_string());
            columns.program_url.push(
                Self::field(&record, FIELD_URL)
                    .unwrap_or_default()
                    .to_string(),
            );
            columns.date_added.push(
                Self::field(&record, FIELD_SCRAPED_DATE).and_then(parse_date_micros),
            );
            columns
                .offering_level
                .push(Some(level.as_str().to_string()));
            columns
                .data_quality
                .push(Some(quality.as_str().to_string()));
        }

        if columns.len() == 0 {
            return Err(ParserError::EmptyData { parser: Self::NAME });
        }

        let df = build_program_dataframe(Self::NAME, columns)?;
        Ok(ProgramCatalog {
            df,
            source: SourceFormat::RawScrape,
        })
    }
}
