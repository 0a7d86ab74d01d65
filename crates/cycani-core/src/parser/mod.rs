//! Parsers for cycani.org payloads
//!
//! Contains modules for the landing-page HTML and the catalog API JSON.

pub mod carousel;
pub mod catalog;

pub use carousel::extract_carousel;
pub use catalog::parse_catalog;
