//! URL helpers for cycani.org
//!
//! Provides the site root, the catalog API endpoint, and detail-page paths.

/// Site root, also the source of the landing-page carousel HTML.
pub const BASE_URL: &str = "https://www.cycani.org";

/// Path of the signed catalog API endpoint.
pub const CATALOG_API_PATH: &str = "/index.php/api/vod";

/// Builds the detail-page path for a catalog entry
///
/// # Example
/// ```
/// use cycani_core::url::build_detail_path;
/// assert_eq!(build_detail_path("5"), "bangumi/5.html");
/// ```
pub fn build_detail_path(id: &str) -> String {
    format!("bangumi/{}.html", id)
}

/// Builds the full catalog API URL for a given base
///
/// # Example
/// ```
/// use cycani_core::url::{build_catalog_api_url, BASE_URL};
/// assert_eq!(
///     build_catalog_api_url(BASE_URL),
///     "https://www.cycani.org/index.php/api/vod"
/// );
/// ```
pub fn build_catalog_api_url(base: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), CATALOG_API_PATH)
}
