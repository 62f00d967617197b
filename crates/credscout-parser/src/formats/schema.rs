//! Canonical column set for the normalized program table.

pub const COL_PROGRAM_ID: &str = "program_id";
pub const COL_TITLE: &str = "title";
pub const COL_INSTITUTION: &str = "institution";
pub const COL_CREDENTIAL_TYPE: &str = "credential_type";
pub const COL_PROVINCE: &str = "province";
pub const COL_DELIVERY_MODE: &str = "delivery_mode";
pub const COL_DURATION_WEEKS: &str = "duration_weeks";
pub const COL_DURATION_DISPLAY: &str = "duration_display";
pub const COL_PRICE_CAD: &str = "price_cad";
pub const COL_PRICE_DISPLAY: &str = "price_display";
pub const COL_SKILLS: &str = "skills";
pub const COL_DESCRIPTION: &str = "description";
pub const COL_PROGRAM_URL: &str = "program_url";
pub const COL_DATE_ADDED: &str = "date_added";
pub const COL_OFFERING_LEVEL: &str = "offering_level";
pub const COL_DATA_QUALITY: &str = "data_quality";

/// Columns of every loaded catalog frame, in order.
pub const PROGRAM_COLUMNS: [&str; 16] = [
    COL_PROGRAM_ID,
    COL_TITLE,
    COL_INSTITUTION,
    COL_CREDENTIAL_TYPE,
    COL_PROVINCE,
    COL_DELIVERY_MODE,
    COL_DURATION_WEEKS,
    COL_DURATION_DISPLAY,
    COL_PRICE_CAD,
    COL_PRICE_DISPLAY,
    COL_SKILLS,
    COL_DESCRIPTION,
    COL_PROGRAM_URL,
    COL_DATE_ADDED,
    COL_OFFERING_LEVEL,
    COL_DATA_QUALITY,
];

/// Header names whose presence marks a file as already pre-processed.
pub const PROCESSED_MARKER_COLUMNS: [&str; 2] = [COL_PROGRAM_ID, COL_OFFERING_LEVEL];

/// Fixed positional order of the headerless raw scrape shape.
pub const RAW_SCRAPE_FIELD_COUNT: usize = 10;
