//! Trait seams for the external collaborators.
//!
//! The prefetch pipeline and the suggestion service only ever see these
//! traits; the production adapters live in [`crate::scryfall`] and
//! [`crate::suggest`], and scripted doubles in [`crate::testkit`].

use async_trait::async_trait;

use crate::domain::SuggestionGroup;
use crate::error::Result;
use crate::scryfall::RawCard;

/// Result ordering requested from the card-search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrder {
    /// Upstream "random" order. Not guaranteed unbiased; callers shuffle.
    Random,
    /// Popularity order, used for synthesized suggestions.
    Edhrec,
}

impl SearchOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            SearchOrder::Random => "random",
            SearchOrder::Edhrec => "edhrec",
        }
    }
}

/// A source of raw cards: full-text search plus fuzzy single-card lookup.
#[async_trait]
pub trait CardSource: Send + Sync {
    /// Run a card search. An empty vec means the query matched nothing.
    async fn search(&self, query: &str, order: SearchOrder) -> Result<Vec<RawCard>>;

    /// Fetch a single card by fuzzy name match.
    async fn named(&self, fuzzy_name: &str) -> Result<RawCard>;
}

/// Best-effort deck-suggestion lookup by commander name.
///
/// `Ok(None)` and errors both mean "nothing usable"; callers must fall back
/// to synthesized suggestions.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn fetch(&self, commander_name: &str) -> Result<Option<Vec<SuggestionGroup>>>;
}
