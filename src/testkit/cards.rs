//! Scripted [`CardSource`] double.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::StatusCode;

use crate::error::{Error, Result};
use crate::ports::{CardSource, SearchOrder};
use crate::scryfall::RawCard;

/// A default-filled raw card for tests; mutate fields as needed.
pub fn raw_card(name: &str) -> RawCard {
    RawCard {
        id: format!("id-{}", name.to_lowercase().replace(' ', "-")),
        name: name.to_string(),
        cmc: 3.0,
        type_line: "Legendary Creature — Human Wizard".to_string(),
        rarity: "rare".to_string(),
        ..RawCard::default()
    }
}

/// A card source with pre-loaded search results and a fuzzy-name table.
///
/// Each `search` call pops the next scripted result (defaults to an empty
/// result set when exhausted) and records the query string. Named lookups
/// hit the table; missing names answer like a 404 from the live API.
pub struct ScriptedCardSource {
    search_results: Mutex<VecDeque<Result<Vec<RawCard>>>>,
    named_cards: Mutex<HashMap<String, RawCard>>,
    queries: Mutex<Vec<String>>,
    search_delay: Option<std::time::Duration>,
    search_count: Arc<AtomicU32>,
    named_count: Arc<AtomicU32>,
}

impl ScriptedCardSource {
    pub fn new() -> Self {
        Self {
            search_results: Mutex::new(VecDeque::new()),
            named_cards: Mutex::new(HashMap::new()),
            queries: Mutex::new(Vec::new()),
            search_delay: None,
            search_count: Arc::new(AtomicU32::new(0)),
            named_count: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Delay every search answer, for tests that interleave other work
    /// with an in-flight request (paused-clock friendly).
    pub fn with_search_delay(mut self, delay: std::time::Duration) -> Self {
        self.search_delay = Some(delay);
        self
    }

    pub fn with_search_results(self, results: Vec<Result<Vec<RawCard>>>) -> Self {
        *self.search_results.lock() = results.into();
        self
    }

    pub fn with_named(self, card: RawCard) -> Self {
        self.named_cards.lock().insert(card.name.clone(), card);
        self
    }

    /// Queue another search result after construction.
    pub fn push_search_result(&self, result: Result<Vec<RawCard>>) {
        self.search_results.lock().push_back(result);
    }

    /// Every query string `search` has been called with, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }

    pub fn search_count(&self) -> u32 {
        self.search_count.load(Ordering::SeqCst)
    }

    pub fn named_count(&self) -> u32 {
        self.named_count.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedCardSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CardSource for ScriptedCardSource {
    async fn search(&self, query: &str, _order: SearchOrder) -> Result<Vec<RawCard>> {
        if let Some(delay) = self.search_delay {
            tokio::time::sleep(delay).await;
        }
        self.search_count.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().push(query.to_string());
        self.search_results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn named(&self, fuzzy_name: &str) -> Result<RawCard> {
        self.named_count.fetch_add(1, Ordering::SeqCst);
        self.named_cards
            .lock()
            .get(fuzzy_name)
            .cloned()
            .ok_or_else(|| Error::Status {
                status: StatusCode::NOT_FOUND,
                url: format!("scripted:/cards/named?fuzzy={fuzzy_name}"),
            })
    }
}
