//! Prefetch queue manager.
//!
//! Keeps a lookahead buffer of fully resolved commanders so the consumer
//! never waits on the network while the queue has entries. Refills run in
//! the background once the queue drops to the low-water mark; a filter
//! change wipes the queue and bumps a generation counter so results from an
//! overlapped refill are discarded on arrival instead of being shown stale.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::config::QueueConfig;
use crate::domain::{Commander, Filter};
use crate::error::{Error, Result};
use crate::ports::{CardSource, SearchOrder};
use crate::scryfall::{query, RawCard};

use super::partner::PartnerResolver;

struct State {
    queue: VecDeque<Commander>,
    filter: Filter,
    generation: u64,
    refill_in_flight: bool,
}

/// The queue manager. Shared as `Arc<Prefetcher>`; all queue mutations go
/// through the internal mutex as single atomic steps.
pub struct Prefetcher {
    source: Arc<dyn CardSource>,
    resolver: PartnerResolver,
    tuning: QueueConfig,
    state: Mutex<State>,
}

impl Prefetcher {
    pub fn new(source: Arc<dyn CardSource>, tuning: QueueConfig) -> Self {
        Self {
            resolver: PartnerResolver::new(Arc::clone(&source)),
            source,
            tuning,
            state: Mutex::new(State {
                queue: VecDeque::new(),
                filter: Filter::any(),
                generation: 0,
                refill_in_flight: false,
            }),
        }
    }

    /// Replace the active filter. The whole queue is discarded: commanders
    /// fetched for a different filter must never be served.
    pub fn apply_filter(&self, filter: Filter) {
        let mut state = self.state.lock();
        state.queue.clear();
        state.generation += 1;
        state.filter = filter;
        debug!(generation = state.generation, "filter applied, queue cleared");
    }

    pub fn filter(&self) -> Filter {
        self.state.lock().filter.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// O(1) pop of the queue head. Never performs I/O.
    pub fn pop(&self) -> Result<Commander> {
        self.state.lock().queue.pop_front().ok_or(Error::QueueEmpty)
    }

    /// Next ready commander.
    ///
    /// Pops the head when the queue has one; an empty queue triggers a
    /// direct foreground single-card fetch instead of waiting on a batch.
    /// Either way, dropping below the low-water mark starts a detached
    /// background refill that is never awaited here.
    pub async fn next(self: &Arc<Self>) -> Result<Commander> {
        match self.pop() {
            Ok(commander) => {
                self.maybe_spawn_refill();
                Ok(commander)
            }
            Err(Error::QueueEmpty) => {
                let commander = self.fetch_one().await?;
                self.maybe_spawn_refill();
                Ok(commander)
            }
            Err(other) => Err(other),
        }
    }

    /// Fill the queue up to the target size for the active filter.
    ///
    /// One search, with one commander-only retry if the filtered query
    /// matches nothing; still-zero results are an error. Results are
    /// shuffled before resolution because the upstream "random" order is
    /// not trusted to be unbiased.
    pub async fn refill(&self) -> Result<usize> {
        let (filter, generation) = {
            let state = self.state.lock();
            (state.filter.clone(), state.generation)
        };

        let mut cards = self.search_with_fallback(&filter).await?;
        cards.shuffle(&mut rand::thread_rng());

        let room = {
            let state = self.state.lock();
            if state.generation != generation {
                0
            } else {
                self.tuning.target_size.saturating_sub(state.queue.len())
            }
        };

        let mut appended = 0;
        for card in cards.iter().take(room) {
            let commander = self.resolver.resolve(card).await;
            let mut state = self.state.lock();
            if state.generation != generation {
                debug!("filter changed mid-refill, discarding stale results");
                break;
            }
            state.queue.push_back(commander);
            appended += 1;
        }

        debug!(appended, "refill complete");
        Ok(appended)
    }

    /// Foreground path for an empty queue: fetch and resolve a single
    /// random card with the same search/fallback logic as a refill.
    async fn fetch_one(&self) -> Result<Commander> {
        let filter = self.filter();
        let cards = self.search_with_fallback(&filter).await?;
        // search_with_fallback never returns an empty vec.
        let card = cards
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| Error::EmptyResults {
                query: query::commander_search(&filter),
            })?;
        Ok(self.resolver.resolve(card).await)
    }

    async fn search_with_fallback(&self, filter: &Filter) -> Result<Vec<RawCard>> {
        let filtered = query::commander_search(filter);
        let cards = self.source.search(&filtered, SearchOrder::Random).await?;
        if !cards.is_empty() {
            return Ok(cards);
        }

        debug!(query = %filtered, "filtered search empty, retrying commander-only");
        let cards = self
            .source
            .search(query::COMMANDER_ONLY, SearchOrder::Random)
            .await?;
        if cards.is_empty() {
            return Err(Error::EmptyResults { query: filtered });
        }
        Ok(cards)
    }

    /// Start a detached refill if the queue is at or below the low-water
    /// mark and none is already running. Failures only get logged; they
    /// must never reach the consumer that triggered the refill.
    fn maybe_spawn_refill(self: &Arc<Self>) {
        {
            let mut state = self.state.lock();
            if state.queue.len() > self.tuning.low_water_mark || state.refill_in_flight {
                return;
            }
            state.refill_in_flight = true;
        }

        let manager = Arc::clone(self);
        tokio::spawn(async move {
            let outcome = manager.refill().await;
            manager.state.lock().refill_in_flight = false;
            match outcome {
                Ok(appended) => debug!(appended, "background refill finished"),
                Err(error) => warn!(%error, "background refill failed"),
            }
        });
    }
}
