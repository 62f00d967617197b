use crate::errors::{ParserAttempt, ParserError};
use crate::formats::{ProcessedCatalogParser, RawScrapeParser};
use crate::model::ProgramCatalog;

pub trait CatalogParser {
    fn name(&self) -> &'static str;
    fn parse(&self, content: &str) -> Result<ProgramCatalog, ParserError>;
}

/// Sniffs the schema of a catalog file by trying each known shape in order.
/// The processed shape is tried first since its header row would otherwise
/// be consumed as a data row by the positional parser.
pub fn parse_catalog(content: &str) -> Result<ProgramCatalog, ParserError> {
    let processed = ProcessedCatalogParser;
    let raw_scrape = RawScrapeParser;
    let parsers: [&dyn CatalogParser; 2] = [&processed, &raw_scrape];
    parse_with_parsers(content, &parsers)
}

pub fn parse_with_parsers(
    content: &str,
    parsers: &[&dyn CatalogParser],
) -> Result<ProgramCatalog, ParserError> {
    let mut attempts = Vec::new();

    for parser in parsers {
        match parser.parse(content) {
            Ok(catalog) => return Ok(catalog),
            Err(ParserError::FormatMismatch { reason, .. }) => {
                attempts.push(ParserAttempt::new(parser.name(), reason));
            }
            Err(err) => return Err(err),
        }
    }

    Err(ParserError::NoMatchingParser { attempts })
}
