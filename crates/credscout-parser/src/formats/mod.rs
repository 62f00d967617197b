mod common;
mod processed;
mod raw_scrape;
pub mod schema;

pub use processed::ProcessedCatalogParser;
pub use raw_scrape::RawScrapeParser;

pub(crate) use common::{
    build_program_dataframe, clean_optional, parse_date_micros, parse_optional_f64,
    parse_optional_i64, ProgramColumns,
};
