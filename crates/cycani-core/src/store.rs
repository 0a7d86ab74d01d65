//! Intent-driven state store for the home feeds
//!
//! Three independent feeds (carousel, first catalog page, incremental pages)
//! share one [`HomeState`] snapshot. All state writes funnel through a single
//! worker task draining an unbounded event channel; fetches run concurrently
//! as detached tasks and re-enter the worker as completion events, so
//! transitions for a feed never interleave mid-commit.
//!
//! Each feed carries a monotonic generation counter. A completion whose
//! generation is older than the feed's current one is discarded, so a slow
//! response can never overwrite the result of a newer request.

use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::client::CatalogSource;
use crate::error::Result;
use crate::pagination::next_page_request;
use crate::parser::{extract_carousel, parse_catalog};
use crate::types::{CarouselItem, CatalogEntry};

/// Lifecycle of one asynchronous feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No load attempted yet
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// Last fetch committed its data
    Success,
    /// Last fetch failed; retry is a re-dispatched intent
    Error,
}

impl LoadState {
    pub fn is_loading(self) -> bool {
        self == LoadState::Loading
    }

    pub fn is_success(self) -> bool {
        self == LoadState::Success
    }

    pub fn is_error(self) -> bool {
        self == LoadState::Error
    }
}

/// User or system actions the store reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeIntent {
    /// Refresh the landing-page carousel
    LoadCarousel,
    /// Load (or reload) the first catalog page, replacing the list
    LoadFirstPage,
    /// Append the next catalog page
    LoadMorePages,
}

/// Snapshot of the home view data
///
/// Cloned out of the store; mutated only by the store worker.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeState {
    /// Featured carousel items, replaced wholesale on refresh
    pub carousel: Vec<CarouselItem>,
    pub carousel_state: LoadState,

    /// Ordered catalog entries; append-only across load-more, replaced by a
    /// first-page load
    pub catalog: Vec<CatalogEntry>,
    pub catalog_state: LoadState,

    /// State of the incremental-pages feed
    pub more_state: LoadState,
    /// True while a load-more fetch is in flight
    pub is_loading_more: bool,
    /// Last successfully loaded page number
    pub page: u32,
    /// Set when a page came back empty; no further pages exist this session
    pub more_exhausted: bool,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            carousel: Vec::new(),
            carousel_state: LoadState::Idle,
            catalog: Vec::new(),
            catalog_state: LoadState::Idle,
            more_state: LoadState::Idle,
            is_loading_more: false,
            page: 1,
            more_exhausted: false,
        }
    }
}

enum Event {
    Intent(HomeIntent),
    CarouselDone {
        generation: u64,
        result: Result<Vec<CarouselItem>>,
    },
    FirstPageDone {
        generation: u64,
        result: Result<Vec<CatalogEntry>>,
    },
    MorePageDone {
        generation: u64,
        page: u32,
        result: Result<Vec<CatalogEntry>>,
    },
}

/// Handle to the home feed store
///
/// Cheap to clone; all clones share the same worker and state.
#[derive(Clone)]
pub struct HomeStore {
    events_tx: mpsc::UnboundedSender<Event>,
    state_rx: watch::Receiver<HomeState>,
}

impl HomeStore {
    /// Spawn the store worker over the given payload source
    pub fn spawn(source: Arc<dyn CatalogSource>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(HomeState::default());

        let worker = Worker {
            source,
            events: events_tx.downgrade(),
            state_tx,
            carousel_gen: 0,
            first_gen: 0,
            more_gen: 0,
        };
        tokio::spawn(worker.run(events_rx));

        Self { events_tx, state_rx }
    }

    /// Enqueue an intent; never blocks, never drops
    ///
    /// Intents are processed one at a time in arrival order.
    pub fn dispatch(&self, intent: HomeIntent) {
        let _ = self.events_tx.send(Event::Intent(intent));
    }

    /// Read-only snapshot of the current state
    pub fn state(&self) -> HomeState {
        self.state_rx.borrow().clone()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<HomeState> {
        self.state_rx.clone()
    }

    /// Spawn the auto-pager: a task that observes state and keeps one page
    /// of catalog data prefetched ahead of display
    ///
    /// Runs until the store (and every outstanding fetch) is dropped.
    pub fn spawn_auto_pager(&self) -> JoinHandle<()> {
        let mut rx = self.subscribe();
        let events = self.events_tx.downgrade();

        tokio::spawn(async move {
            loop {
                let wants_next = next_page_request(&rx.borrow_and_update()).is_some();
                if wants_next {
                    match events.upgrade() {
                        Some(tx) => {
                            let _ = tx.send(Event::Intent(HomeIntent::LoadMorePages));
                        }
                        None => break,
                    }
                }
                if rx.changed().await.is_err() {
                    break;
                }
            }
        })
    }
}

struct Worker {
    source: Arc<dyn CatalogSource>,
    // Weak so the worker itself does not keep its own channel alive
    events: mpsc::WeakUnboundedSender<Event>,
    state_tx: watch::Sender<HomeState>,
    carousel_gen: u64,
    first_gen: u64,
    more_gen: u64,
}

impl Worker {
    async fn run(mut self, mut events_rx: mpsc::UnboundedReceiver<Event>) {
        while let Some(event) = events_rx.recv().await {
            match event {
                Event::Intent(intent) => self.handle_intent(intent),
                Event::CarouselDone { generation, result } => {
                    self.commit_carousel(generation, result)
                }
                Event::FirstPageDone { generation, result } => {
                    self.commit_first_page(generation, result)
                }
                Event::MorePageDone {
                    generation,
                    page,
                    result,
                } => self.commit_more_page(generation, page, result),
            }
        }
    }

    fn handle_intent(&mut self, intent: HomeIntent) {
        match intent {
            HomeIntent::LoadCarousel => {
                self.carousel_gen += 1;
                let generation = self.carousel_gen;

                // Loading must be observable before the fetch resolves
                self.state_tx.send_modify(|s| {
                    s.carousel_state = LoadState::Loading;
                });

                let source = Arc::clone(&self.source);
                let Some(events) = self.events.upgrade() else {
                    return;
                };
                tokio::spawn(async move {
                    let result = match source.fetch_home().await {
                        Ok(html) => extract_carousel(&html),
                        Err(e) => Err(e),
                    };
                    let _ = events.send(Event::CarouselDone { generation, result });
                });
            }
            HomeIntent::LoadFirstPage => {
                self.first_gen += 1;
                // A reload also invalidates any in-flight load-more, so a
                // straggling append can never land in the replaced list
                self.more_gen += 1;
                let generation = self.first_gen;

                self.state_tx.send_modify(|s| {
                    s.catalog_state = LoadState::Loading;
                    s.more_state = LoadState::Idle;
                    s.is_loading_more = false;
                });

                let source = Arc::clone(&self.source);
                let Some(events) = self.events.upgrade() else {
                    return;
                };
                tokio::spawn(async move {
                    let result = match source.fetch_catalog_page(1).await {
                        Ok(json) => parse_catalog(&json),
                        Err(e) => Err(e),
                    };
                    let _ = events.send(Event::FirstPageDone { generation, result });
                });
            }
            HomeIntent::LoadMorePages => {
                let page = {
                    let s = self.state_tx.borrow();
                    if s.is_loading_more
                        || !s.catalog_state.is_success()
                        || s.catalog.is_empty()
                        || s.more_exhausted
                    {
                        debug!("ignoring load-more intent, feed not ready");
                        return;
                    }
                    s.page + 1
                };

                self.more_gen += 1;
                let generation = self.more_gen;

                self.state_tx.send_modify(|s| {
                    s.more_state = LoadState::Loading;
                    s.is_loading_more = true;
                });

                let source = Arc::clone(&self.source);
                let Some(events) = self.events.upgrade() else {
                    return;
                };
                tokio::spawn(async move {
                    let result = match source.fetch_catalog_page(page).await {
                        Ok(json) => parse_catalog(&json),
                        Err(e) => Err(e),
                    };
                    let _ = events.send(Event::MorePageDone {
                        generation,
                        page,
                        result,
                    });
                });
            }
        }
    }

    fn commit_carousel(&mut self, generation: u64, result: Result<Vec<CarouselItem>>) {
        if generation != self.carousel_gen {
            debug!(generation, current = self.carousel_gen, "discarding stale carousel result");
            return;
        }

        match result {
            Ok(items) => self.state_tx.send_modify(|s| {
                s.carousel = items;
                s.carousel_state = LoadState::Success;
            }),
            Err(e) => {
                warn!(error = %e, "carousel load failed");
                self.state_tx.send_modify(|s| {
                    s.carousel_state = LoadState::Error;
                });
            }
        }
    }

    fn commit_first_page(&mut self, generation: u64, result: Result<Vec<CatalogEntry>>) {
        if generation != self.first_gen {
            debug!(generation, current = self.first_gen, "discarding stale first-page result");
            return;
        }

        match result {
            Ok(entries) => self.state_tx.send_modify(|s| {
                s.catalog = entries;
                s.catalog_state = LoadState::Success;
                s.page = 1;
                s.more_state = LoadState::Idle;
                s.is_loading_more = false;
                s.more_exhausted = false;
            }),
            Err(e) => {
                warn!(error = %e, "first page load failed");
                self.state_tx.send_modify(|s| {
                    s.catalog_state = LoadState::Error;
                });
            }
        }
    }

    fn commit_more_page(&mut self, generation: u64, page: u32, result: Result<Vec<CatalogEntry>>) {
        if generation != self.more_gen {
            debug!(generation, current = self.more_gen, "discarding stale load-more result");
            return;
        }

        match result {
            Ok(entries) => self.state_tx.send_modify(|s| {
                s.is_loading_more = false;
                s.more_state = LoadState::Success;
                if entries.is_empty() {
                    s.more_exhausted = true;
                } else {
                    s.catalog.extend(entries);
                    s.page = page;
                }
            }),
            Err(e) => {
                warn!(error = %e, page, "load-more failed");
                self.state_tx.send_modify(|s| {
                    s.is_loading_more = false;
                    s.more_state = LoadState::Error;
                });
            }
        }
    }
}
