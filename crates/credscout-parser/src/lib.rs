pub mod errors;
pub mod formats;
pub mod model;
pub mod normalize;
mod registry;

pub use errors::{ParserAttempt, ParserError};
pub use model::{DataQuality, OfferingLevel, ProgramCatalog, SourceFormat};
pub use registry::{parse_catalog, parse_with_parsers, CatalogParser};
