//! The picker session: the UI-agnostic surface a front end drives.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;

use crate::config::Config;
use crate::core::{CommanderCache, Prefetcher};
use crate::domain::{Commander, Filter};
use crate::error::{Error, Result};
use crate::ports::{CardSource, SuggestionSource};
use crate::scryfall::ScryfallClient;
use crate::suggest::{EdhrecScraper, SuggestionService};

/// One picker session: active filter, prefetch queue, filter-keyed cache,
/// and the commander currently on display.
pub struct PickerSession {
    prefetcher: Arc<Prefetcher>,
    cache: CommanderCache,
    suggestions: SuggestionService,
    current: Mutex<Option<Commander>>,
}

impl PickerSession {
    /// Wire a session from injected collaborators.
    pub fn new(
        cards: Arc<dyn CardSource>,
        scraper: Arc<dyn SuggestionSource>,
        config: &Config,
    ) -> Self {
        Self {
            prefetcher: Arc::new(Prefetcher::new(Arc::clone(&cards), config.queue)),
            cache: CommanderCache::new(
                Duration::from_secs(config.limits.cache_ttl_secs),
                config.limits.cache_capacity,
            ),
            suggestions: SuggestionService::new(scraper, cards),
            current: Mutex::new(None),
        }
    }

    /// Build the production session against Scryfall and the EDHREC relay.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client: Arc<dyn CardSource> =
            Arc::new(ScryfallClient::new(&config.network, &config.limits)?);
        let scraper: Arc<dyn SuggestionSource> = Arc::new(EdhrecScraper::new(&config.network)?);
        Ok(Self::new(client, scraper, config))
    }

    /// Change the active filter. The prefetch queue is discarded so the next
    /// pull goes through a fresh fetch and cache check.
    pub fn apply_filter(&self, filter: Filter) {
        self.prefetcher.apply_filter(filter);
    }

    pub fn filter(&self) -> Filter {
        self.prefetcher.filter()
    }

    /// Next commander for the active filter.
    ///
    /// A fresh cache hit is returned as-is, with no search dispatched.
    /// Otherwise the prefetch queue is consumed (or, when empty, a
    /// foreground single-card fetch runs) and the result is cached.
    pub async fn next_commander(&self) -> Result<Commander> {
        let key = self.prefetcher.filter().cache_key();
        if let Some(hit) = self.cache.get(&key) {
            debug!(key, "serving cached commander");
            *self.current.lock() = Some(hit.clone());
            return Ok(hit);
        }

        let commander = self.prefetcher.next().await?;
        self.cache.put(key, commander.clone());
        *self.current.lock() = Some(commander.clone());
        Ok(commander)
    }

    /// Discard the current pick and draw another with the same filter.
    /// Drops the cache entry first so the same card is not served right back.
    pub async fn reject_current(&self) -> Result<Commander> {
        self.cache.invalidate(&self.prefetcher.filter().cache_key());
        self.next_commander().await
    }

    /// Accept the current pick: fetch deck suggestions and attach them.
    /// Suggestion fetching never fails; fallbacks bottom out at staples.
    pub async fn accept_current(&self) -> Result<Commander> {
        let commander = self
            .current
            .lock()
            .clone()
            .ok_or(Error::NoCurrent { action: "accept" })?;

        let groups = self.suggestions.for_commander(&commander).await;

        let mut current = self.current.lock();
        let updated = match current.as_mut() {
            Some(c) if c.source_id == commander.source_id => {
                c.deck_suggestions = Some(groups);
                c.clone()
            }
            // The pick changed while suggestions were in flight; return the
            // accepted snapshot without touching the newer pick.
            _ => {
                let mut snapshot = commander;
                snapshot.deck_suggestions = Some(groups);
                snapshot
            }
        };
        Ok(updated)
    }

    /// The commander currently on display, if any.
    pub fn current(&self) -> Option<Commander> {
        self.current.lock().clone()
    }

    /// Length of the prefetch queue (test and diagnostics hook).
    pub fn queue_len(&self) -> usize {
        self.prefetcher.len()
    }
}
