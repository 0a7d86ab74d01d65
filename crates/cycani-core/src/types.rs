//! Core data types for the cycani.org catalog
//!
//! Contains the value objects produced by the parsers.

use serde::{Deserialize, Serialize};

/// A featured item from the landing-page carousel
///
/// Produced only by the HTML extractor. Replaced wholesale on refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselItem {
    /// Item title
    pub name: String,

    /// Absolute background-image URL (a slide without one is skipped)
    pub image_url: String,

    /// One-line introduction text
    pub intro: String,

    /// Relative URL to the detail page
    pub detail_url: String,
}

/// One catalog entry from the signed JSON API
///
/// Produced only by the JSON catalog parser. Appended to a growing
/// ordered sequence across pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Series name
    pub name: String,

    /// Cover image URL
    pub cover: String,

    /// Detail page path, derived as `bangumi/{id}.html`
    pub detail_url: String,

    /// Genre/class tags as the API delivers them
    pub tags: String,

    /// Synopsis text
    pub intro: String,

    /// Score as a display string (e.g. "8.0")
    pub score: String,

    /// Schedule or episode remarks (e.g. "更新至12集")
    pub remarks: String,
}
