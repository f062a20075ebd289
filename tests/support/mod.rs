#![allow(dead_code)]

//! Shared builders for the integration tests.

use std::sync::Arc;

use helmsman::app::PickerSession;
use helmsman::config::Config;
use helmsman::domain::{Color, Filter};
use helmsman::ports::{CardSource, SuggestionSource};
use helmsman::scryfall::RawCard;
use helmsman::testkit::cards::{raw_card, ScriptedCardSource};
use helmsman::testkit::suggestions::ScriptedSuggestions;

/// Solo Simic commander used by scenario tests.
pub fn kinnan() -> RawCard {
    let mut card = raw_card("Kinnan, Bonder Prodigy");
    card.color_identity = vec!["U".to_string(), "G".to_string()];
    card.cmc = 2.0;
    card.type_line = "Legendary Creature — Human Druid".to_string();
    card.oracle_text =
        "Whenever you tap a nonland permanent for mana, add one mana of any type.".to_string();
    card
}

/// The named-partner target for pairing tests.
pub fn tana() -> RawCard {
    let mut card = raw_card("Tana, the Bloodsower");
    card.color_identity = vec!["R".to_string()];
    card.cmc = 4.0;
    card.oracle_text =
        "Trample\nWhenever Tana, the Bloodsower deals combat damage to a player, create that many 1/1 green Saproling creature tokens.\nPartner".to_string();
    card
}

/// A black-green commander that must pair with Tana by name.
pub fn ikra() -> RawCard {
    let mut card = raw_card("Ikra Shidiqi, the Usurper");
    card.color_identity = vec!["B".to_string(), "G".to_string()];
    card.cmc = 5.0;
    card.oracle_text =
        "Menace\nPartner with Tana, the Bloodsower (When this creature enters, target player may put Tana into their hand.)".to_string();
    card
}

/// A commander with the generic Partner keyword.
pub fn open_partner(name: &str) -> RawCard {
    let mut card = raw_card(name);
    card.keywords = vec!["Partner".to_string()];
    card.oracle_text = "Partner (You can have two commanders if both have partner.)".to_string();
    card
}

pub fn filter_ug() -> Filter {
    Filter::new([Color::Blue, Color::Green], 2, 4).expect("valid filter")
}

pub fn session(
    cards: &Arc<ScriptedCardSource>,
    scraper: &Arc<ScriptedSuggestions>,
) -> PickerSession {
    PickerSession::new(
        Arc::clone(cards) as Arc<dyn CardSource>,
        Arc::clone(scraper) as Arc<dyn SuggestionSource>,
        &Config::default(),
    )
}

/// Let spawned background work (refills) run to completion.
pub async fn quiesce() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
