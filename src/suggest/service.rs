//! The suggestion fallback chain: scrape, synthesize, staples.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{Color, Commander, SuggestionGroup};
use crate::ports::{CardSource, SearchOrder, SuggestionSource};
use crate::scryfall::query;

/// The floor when both the scrape and every synthesized query come up empty.
const STAPLES: &[(&str, &[&str])] = &[
    (
        "Staples",
        &[
            "Sol Ring",
            "Command Tower",
            "Arcane Signet",
            "Lightning Greaves",
        ],
    ),
    (
        "Ramp",
        &[
            "Cultivate",
            "Kodama's Reach",
            "Rampant Growth",
            "Farseek",
        ],
    ),
];

/// Produces deck suggestions for an accepted commander. Never fails: every
/// failure path ends in a degraded-but-valid suggestion set.
pub struct SuggestionService {
    scraper: Arc<dyn SuggestionSource>,
    cards: Arc<dyn CardSource>,
}

impl SuggestionService {
    pub fn new(scraper: Arc<dyn SuggestionSource>, cards: Arc<dyn CardSource>) -> Self {
        Self { scraper, cards }
    }

    pub async fn for_commander(&self, commander: &Commander) -> Vec<SuggestionGroup> {
        match self.scraper.fetch(&commander.name).await {
            Ok(Some(groups)) if !groups.is_empty() => return groups,
            Ok(_) => debug!(commander = %commander.name, "scrape yielded nothing"),
            Err(error) => {
                warn!(commander = %commander.name, %error, "scrape failed, synthesizing")
            }
        }

        let groups = self.synthesize(&commander.colors).await;
        if groups.is_empty() {
            info!(commander = %commander.name, "no synthesized suggestions, using staples");
            staples()
        } else {
            groups
        }
    }

    /// One popularity-ordered search per category in the commander's
    /// identity. Individual query failures drop that category only.
    async fn synthesize(&self, colors: &[Color]) -> Vec<SuggestionGroup> {
        let mut groups = Vec::new();
        for (category, search, limit) in query::suggestion_queries(colors) {
            match self.cards.search(&search, SearchOrder::Edhrec).await {
                Ok(cards) if !cards.is_empty() => {
                    let names = cards.into_iter().take(limit).map(|c| c.name).collect();
                    groups.push(SuggestionGroup::new(category, names));
                }
                Ok(_) => {}
                Err(error) => warn!(category, %error, "suggestion query failed"),
            }
        }
        groups
    }
}

fn staples() -> Vec<SuggestionGroup> {
    STAPLES
        .iter()
        .map(|(category, cards)| {
            SuggestionGroup::new(
                *category,
                cards.iter().map(|name| name.to_string()).collect(),
            )
        })
        .collect()
}
