//! Catalog parser for the signed cycani.org JSON API
//!
//! Maps the API's `vod_*` payload fields into [`CatalogEntry`] values.

use serde::Deserialize;

use crate::error::{CycaniError, Result};
use crate::types::CatalogEntry;
use crate::url::build_detail_path;

/// Top-level response shape of the catalog API
#[derive(Debug, Deserialize)]
struct CatalogResponse {
    list: Vec<RawEntry>,
}

/// One raw entry as the API delivers it
#[derive(Debug, Deserialize)]
struct RawEntry {
    vod_name: String,
    vod_pic: String,
    vod_id: VodId,
    vod_class: String,
    vod_score: String,
    vod_remarks: String,
    vod_blurb: String,
}

/// The API serves ids as strings or bare numbers depending on endpoint version
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VodId {
    Text(String),
    Number(u64),
}

impl VodId {
    fn into_string(self) -> String {
        match self {
            VodId::Text(s) => s,
            VodId::Number(n) => n.to_string(),
        }
    }
}

/// Parses a catalog API JSON payload into a list of entries
///
/// # Arguments
/// * `json` - Raw JSON string from the catalog endpoint
///
/// # Returns
/// Vector of `CatalogEntry` in payload order, empty if the page has no entries
///
/// # Errors
/// Returns `Parse` if the payload is not an object, lacks the `list` array,
/// or a required field has the wrong type
pub fn parse_catalog(json: &str) -> Result<Vec<CatalogEntry>> {
    let response: CatalogResponse = serde_json::from_str(json)
        .map_err(|e| CycaniError::Parse(format!("Invalid catalog payload: {}", e)))?;

    Ok(response
        .list
        .into_iter()
        .map(|raw| {
            let id = raw.vod_id.into_string();
            CatalogEntry {
                name: raw.vod_name,
                cover: raw.vod_pic,
                detail_url: build_detail_path(&id),
                tags: raw.vod_class,
                intro: raw.vod_blurb,
                score: raw.vod_score,
                remarks: raw.vod_remarks,
            }
        })
        .collect())
}
