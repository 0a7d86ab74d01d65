//! Cycani Catalog Core Library
//!
//! Client-side aggregation layer for the cycani.org anime catalog, combining
//! landing-page HTML scraping with the site's signed JSON API.
//!
//! # Overview
//!
//! This crate provides:
//! - A rate-limited HTTP client for the landing page and the signed catalog API
//! - An HTML extractor for the featured carousel
//! - A typed parser for the catalog API's JSON payload
//! - An intent-driven state store coordinating the three home feeds
//!   (carousel, first page, incremental pages), with automatic one-page-ahead
//!   prefetching
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use cycani_core::{CycaniClient, HomeIntent, HomeStore, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Arc::new(CycaniClient::new()?);
//!     let store = HomeStore::spawn(client);
//!     store.spawn_auto_pager();
//!
//!     store.dispatch(HomeIntent::LoadCarousel);
//!     store.dispatch(HomeIntent::LoadFirstPage);
//!
//!     let mut states = store.subscribe();
//!     while states.changed().await.is_ok() {
//!         let state = states.borrow().clone();
//!         println!(
//!             "carousel: {} items, catalog: {} entries (page {})",
//!             state.carousel.len(),
//!             state.catalog.len(),
//!             state.page
//!         );
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Request signing
//!
//! The catalog API authenticates each call with an MD5 key derived from the
//! request timestamp; see [`signature::sign`]. Keys are only valid near the
//! timestamp they were derived for, so they are computed per request and
//! never cached.

mod client;
mod error;
pub mod pagination;
pub mod parser;
pub mod signature;
mod store;
mod types;
pub mod url;

// Re-export client types
pub use client::{CatalogSource, ClientConfig, CycaniClient, RateLimiter};

// Re-export error types
pub use error::{CycaniError, Result};

// Re-export parser functions
pub use parser::{extract_carousel, parse_catalog};

// Re-export the state store
pub use store::{HomeIntent, HomeState, HomeStore, LoadState};

// Re-export data types
pub use types::{CarouselItem, CatalogEntry};

// Re-export signing for convenience
pub use signature::{sign, Signature};
