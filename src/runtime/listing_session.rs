use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::FeedConfig;
use crate::event::AppEvent;
use crate::fetch::{spawn_fetch, TokenSource};
use crate::model::filter::TokenFilters;
use crate::model::token::TokenRecord;
use crate::store::TokenStore;
use crate::ticker::{RandomWalk, Ticker, TickerHandle};

/// Lifecycle of one listing view: fetch, seed the store, run the ticker,
/// and tear everything down again when the filters change.
pub struct ListingSession {
    store: TokenStore,
    source: Arc<TokenSource>,
    feed: FeedConfig,
    app_tx: mpsc::Sender<AppEvent>,
    walk_seed: Option<u64>,
    ticker: Option<TickerHandle>,
    fetch_task: Option<JoinHandle<()>>,
    request_id: u64,
}

impl ListingSession {
    pub fn new(
        store: TokenStore,
        source: Arc<TokenSource>,
        feed: FeedConfig,
        app_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        Self {
            store,
            source,
            feed,
            app_tx,
            walk_seed: None,
            ticker: None,
            fetch_task: None,
            request_id: 0,
        }
    }

    /// Use a fixed RNG seed for every ticker this session starts.
    pub fn with_walk_seed(mut self, seed: u64) -> Self {
        self.walk_seed = Some(seed);
        self
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub fn current_request(&self) -> u64 {
        self.request_id
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| t.is_running())
    }

    /// Drop the current listing and ask the source for a fresh one.
    /// Answers to earlier requests are ignored from now on.
    pub fn request(&mut self, filters: TokenFilters) -> u64 {
        self.stop();
        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }
        self.request_id += 1;
        self.fetch_task = Some(spawn_fetch(
            self.source.clone(),
            filters,
            self.request_id,
            self.app_tx.clone(),
        ));
        self.request_id
    }

    /// Seed the store from a fetch answer and start ticking. Returns `false`
    /// for a stale answer, which is discarded.
    pub fn on_tokens_loaded(&mut self, request_id: u64, tokens: &[TokenRecord]) -> bool {
        if request_id != self.request_id {
            tracing::debug!(request_id, current = self.request_id, "Dropping stale listing");
            return false;
        }
        self.fetch_task = None;
        self.stop();
        self.store.initialize(tokens);
        if !tokens.is_empty() {
            let bounds = self.feed.walk_bounds();
            let walk = match self.walk_seed {
                Some(seed) => RandomWalk::seeded(seed, bounds),
                None => RandomWalk::new(bounds),
            };
            self.ticker = Some(Ticker::spawn(self.store.clone(), walk, self.feed.interval()));
        }
        true
    }

    /// The ticker stays stopped after a failed fetch.
    pub fn on_fetch_failed(&mut self, request_id: u64) -> bool {
        if request_id != self.request_id {
            return false;
        }
        self.fetch_task = None;
        self.stop();
        true
    }

    /// Cancel the ticker and forget the tracked set.
    pub fn stop(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
        self.store.clear();
    }
}

impl Drop for ListingSession {
    fn drop(&mut self) {
        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }
    }
}
