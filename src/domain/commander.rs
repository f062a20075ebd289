use serde::{Deserialize, Serialize};

use super::Color;

/// A normalized commander record, fully constructed before it is ever shown.
///
/// For a partner pairing, `name` is `"A & B"`, `colors` is the merged
/// identity, and `partner` carries the second card's display fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commander {
    pub name: String,
    /// Deduplicated identity in normalized (letter) order.
    pub colors: Vec<Color>,
    pub mana_value: f64,
    pub type_line: String,
    pub image_url: String,
    pub source_id: String,
    pub oracle_text: String,
    pub explanation: String,
    /// Attached once, when the commander is accepted.
    pub deck_suggestions: Option<Vec<SuggestionGroup>>,
    pub partner: Option<PartnerCard>,
}

impl Commander {
    pub fn is_paired(&self) -> bool {
        self.partner.is_some()
    }
}

/// Display fields for the second card of a partner pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerCard {
    pub name: String,
    pub image_url: String,
    pub type_line: String,
    pub oracle_text: String,
}

/// One named category of deck suggestions, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionGroup {
    pub category: String,
    pub cards: Vec<String>,
}

impl SuggestionGroup {
    pub fn new(category: impl Into<String>, cards: Vec<String>) -> Self {
        Self {
            category: category.into(),
            cards,
        }
    }
}
