//! Partner detection and pairing.
//!
//! Detection precedence matters: a "Partner with <Name>" clause must never
//! fall through to the generic random-partner path, or the wrong second card
//! gets picked. Pairing failures are never fatal; the drawn card is served
//! solo instead.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::Commander;
use crate::ports::{CardSource, SearchOrder};
use crate::scryfall::{query, RawCard};

use super::normalize::normalize;

const NAMED_MARKER: &str = "Partner with ";

/// How a drawn card pairs, in detection-priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartnerKind {
    /// No pairing; the commander is served solo.
    Solo,
    /// Mandatory specific partner, fetched by fuzzy name.
    Named(String),
    /// Generic partnering; any other open-partner commander will do.
    Open,
}

/// Classify a card's pairing behavior from its oracle text and keywords.
pub fn detect(card: &RawCard) -> PartnerKind {
    if let Some(name) = named_partner(&card.oracle_text) {
        return PartnerKind::Named(name);
    }
    let generic_keyword = card
        .keywords
        .iter()
        .any(|keyword| keyword.eq_ignore_ascii_case("partner"));
    if generic_keyword || card.oracle_text.to_lowercase().contains("partner") {
        return PartnerKind::Open;
    }
    PartnerKind::Solo
}

/// Extract the name from a "Partner with <Name>" clause. The name runs to
/// the end of the line or to the reminder-text parenthesis.
fn named_partner(oracle_text: &str) -> Option<String> {
    let start = oracle_text.find(NAMED_MARKER)? + NAMED_MARKER.len();
    let rest = &oracle_text[start..];
    let end = rest
        .find(|c| c == '\n' || c == '(')
        .unwrap_or(rest.len());
    let name = rest[..end].trim().trim_end_matches('.').trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Resolves a drawn card into a (possibly paired) commander.
pub struct PartnerResolver {
    source: Arc<dyn CardSource>,
}

impl PartnerResolver {
    pub fn new(source: Arc<dyn CardSource>) -> Self {
        Self { source }
    }

    /// Pair the card if it wants pairing; degrade to solo on any failure.
    pub async fn resolve(&self, card: &RawCard) -> Commander {
        match detect(card) {
            PartnerKind::Solo => normalize(card, None),
            PartnerKind::Named(name) => match self.source.named(&name).await {
                Ok(partner) => {
                    debug!(card = %card.name, partner = %partner.name, "named partner paired");
                    normalize(card, Some(&partner))
                }
                Err(error) => {
                    warn!(
                        card = %card.name,
                        partner = %name,
                        %error,
                        "named partner fetch failed, serving solo"
                    );
                    normalize(card, None)
                }
            },
            PartnerKind::Open => match self.find_open_partner(card).await {
                Ok(Some(partner)) => {
                    debug!(card = %card.name, partner = %partner.name, "open partner paired");
                    normalize(card, Some(&partner))
                }
                Ok(None) => {
                    debug!(card = %card.name, "no open partner candidate, serving solo");
                    normalize(card, None)
                }
                Err(error) => {
                    warn!(card = %card.name, %error, "open partner search failed, serving solo");
                    normalize(card, None)
                }
            },
        }
    }

    /// One random-order search for generic-partner commanders. The original
    /// card and named-partner cards are skipped client-side.
    async fn find_open_partner(&self, card: &RawCard) -> crate::error::Result<Option<RawCard>> {
        let candidates = self
            .source
            .search(&query::open_partner_search(), SearchOrder::Random)
            .await?;
        Ok(candidates
            .into_iter()
            .find(|candidate| candidate.id != card.id && detect(candidate) == PartnerKind::Open))
    }
}
