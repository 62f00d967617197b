use std::collections::HashMap;

use csv::StringRecord;

use crate::errors::ParserError;
use crate::model::{ProgramCatalog, SourceFormat};
use crate::registry::CatalogParser;

use super::schema;
use super::{
    build_program_dataframe, clean_optional, parse_date_micros, parse_optional_f64,
    parse_optional_i64, ProgramColumns,
};

/// Parser for catalogs that already carry the normalized header row.
///
/// Values are taken as given: derived fields present in the file are loaded
/// verbatim and never recomputed, absent optional columns load as null.
pub struct ProcessedCatalogParser;

impl Default for ProcessedCatalogParser {
    fn default() -> Self {
        Self
    }
}

impl ProcessedCatalogParser {
    const NAME: &'static str = "PROCESSED_CATALOG";

    fn header_index(header: &StringRecord) -> HashMap<String, usize> {
        header
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().to_ascii_lowercase(), idx))
            .collect()
    }

    fn field<'a>(record: &'a StringRecord, index: Option<&usize>) -> Option<&'a str> {
        index.and_then(|idx| record.get(*idx))
    }
}

impl CatalogParser for ProcessedCatalogParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&self, content: &str) -> Result<ProgramCatalog, ParserError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let header = reader
            .headers()
            .map_err(|err| ParserError::Csv {
                parser: Self::NAME,
                source: err,
            })?
            .clone();
        let index = Self::header_index(&header);

        if !schema::PROCESSED_MARKER_COLUMNS
            .iter()
            .any(|marker| index.contains_key(*marker))
        {
            return Err(ParserError::FormatMismatch {
                parser: Self::NAME,
                reason: format!(
                    "header has none of the marker columns {:?}",
                    schema::PROCESSED_MARKER_COLUMNS
                ),
            });
        }

        for required in [schema::COL_TITLE, schema::COL_INSTITUTION] {
            if !index.contains_key(required) {
                return Err(ParserError::InvalidHeader {
                    parser: Self::NAME,
                    message: format!("marker column present but '{required}' is missing"),
                });
            }
        }

        let mut columns = ProgramColumns::with_capacity(16);

        for (row_idx, record) in reader.records().enumerate() {
            let record = record.map_err(|err| ParserError::Csv {
                parser: Self::NAME,
                source: err,
            })?;
            // line 1 is the header
            let line_index = row_idx + 2;

            if record.len() != header.len() {
                return Err(ParserError::DataRow {
                    parser: Self::NAME,
                    line_index,
                    message: format!(
                        "expected {} columns but found {}",
                        header.len(),
                        record.len()
                    ),
                });
            }

            let get = |name: &str| Self::field(&record, index.get(name));

            let program_id = parse_optional_i64(get(schema::COL_PROGRAM_ID))
                .unwrap_or(row_idx as i64);
            let duration_weeks =
                parse_optional_f64(get(schema::COL_DURATION_WEEKS)).filter(|v| *v >= 0.0);
            let price_cad = parse_optional_f64(get(schema::COL_PRICE_CAD)).filter(|v| *v >= 0.0);

            columns.program_id.push(program_id);
            columns
                .title
                .push(get(schema::COL_TITLE).unwrap_or_default().trim().to_string());
            columns.institution.push(
                get(schema::COL_INSTITUTION)
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
            );
            columns.credential_type.push(
                get(schema::COL_CREDENTIAL_TYPE)
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
            );
            columns.province.push(
                clean_optional(get(schema::COL_PROVINCE)).unwrap_or_else(|| "Unknown".to_string()),
            );
            columns.delivery_mode.push(
                get(schema::COL_DELIVERY_MODE)
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
            );
            columns.duration_weeks.push(duration_weeks);
            columns
                .duration_display
                .push(clean_optional(get(schema::COL_DURATION_DISPLAY)));
            columns.price_cad.push(price_cad);
            columns
                .price_display
                .push(clean_optional(get(schema::COL_PRICE_DISPLAY)));
            columns.skills.push(clean_optional(get(schema::COL_SKILLS)));
            columns.description.push(
                get(schema::COL_DESCRIPTION)
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
            );
            columns.program_url.push(
                get(schema::COL_PROGRAM_URL)
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
            );
            columns
                .date_added
                .push(get(schema::COL_DATE_ADDED).and_then(parse_date_micros));
            columns
                .offering_level
                .push(clean_optional(get(schema::COL_OFFERING_LEVEL)));
            columns
                .data_quality
                .push(clean_optional(get(schema::COL_DATA_QUALITY)));
        }

        if columns.len() == 0 {
            return Err(ParserError::EmptyData { parser: Self::NAME });
        }

        let df = build_program_dataframe(Self::NAME, columns)?;
        Ok(ProgramCatalog {
            df,
            source: SourceFormat::Processed,
        })
    }
}
