//! Pagination policy for the incremental catalog feed
//!
//! The decision is a pure function over a [`HomeState`] snapshot; the store's
//! auto-pager task evaluates it on every published state change. This keeps
//! one page prefetched ahead of display instead of reacting to scroll
//! position.

use crate::store::HomeState;

/// Decides whether the next catalog page should be requested
///
/// Returns the page number to fetch once the first page has loaded
/// successfully with a non-empty list, no load-more fetch is in flight, the
/// more feed is not in an error state (retry is user-initiated), and the
/// catalog is not exhausted. A first page with zero entries therefore never
/// triggers further requests.
pub fn next_page_request(state: &HomeState) -> Option<u32> {
    if state.catalog_state.is_success()
        && !state.catalog.is_empty()
        && !state.is_loading_more
        && !state.more_state.is_error()
        && !state.more_exhausted
    {
        Some(state.page + 1)
    } else {
        None
    }
}
