pub mod cache;
pub mod detail;
pub mod error;
pub mod export;
pub mod filters;
pub mod metrics;
