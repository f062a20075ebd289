//! Raw card → [`Commander`] normalization. Pure functions, no I/O.

use crate::domain::{Color, Commander, PartnerCard};
use crate::scryfall::RawCard;

/// Normalize one card, or merge a card and its partner, into a commander.
///
/// The identity of a pairing is the deduplicated union of both cards'
/// identities in normalized order; the display name becomes `"A & B"`.
pub fn normalize(card: &RawCard, partner: Option<&RawCard>) -> Commander {
    let colors = match partner {
        Some(other) => merged_identity(&card.color_identity, &other.color_identity),
        None => merged_identity(&card.color_identity, &[]),
    };

    let name = match partner {
        Some(other) => format!("{} & {}", card.name, other.name),
        None => card.name.clone(),
    };

    Commander {
        explanation: explanation(card, partner, &colors),
        name,
        colors,
        mana_value: card.cmc,
        type_line: card.type_line.clone(),
        image_url: card.image_url(),
        source_id: card.id.clone(),
        oracle_text: card.oracle_text.clone(),
        deck_suggestions: None,
        partner: partner.map(|other| PartnerCard {
            name: other.name.clone(),
            image_url: other.image_url(),
            type_line: other.type_line.clone(),
            oracle_text: other.oracle_text.clone(),
        }),
    }
}

/// Union of two identities, parsed, deduplicated, and letter-sorted.
/// Unknown codes from the API are skipped; an empty result means colorless.
fn merged_identity(a: &[String], b: &[String]) -> Vec<Color> {
    let mut colors: Vec<Color> = a
        .iter()
        .chain(b.iter())
        .filter_map(|code| code.chars().next())
        .filter_map(|letter| Color::from_letter(letter).ok())
        .collect();
    colors.sort();
    colors.dedup();
    colors
}

/// Short descriptive text derived from the card's attributes.
///
/// Cosmetic only: nothing downstream depends on the exact wording.
fn explanation(card: &RawCard, partner: Option<&RawCard>, colors: &[Color]) -> String {
    if let Some(other) = partner {
        return format!(
            "{} and {} lead together, stretching a {} identity across two command-zone cards.",
            card.name,
            other.name,
            color_phrase(colors.len()),
        );
    }

    let mut sentences = vec![format!(
        "{} anchors {}.",
        card.name,
        color_phrase(colors.len())
    )];

    let themes = themes(&card.oracle_text.to_lowercase());
    if !themes.is_empty() {
        sentences.push(format!("The text box {}.", themes.join(" and ")));
    }

    if card.cmc <= 3.0 {
        sentences.push("Cheap enough to land early and rebuild often.".to_string());
    } else if card.cmc >= 6.0 {
        sentences.push("A top-end play worth ramping into.".to_string());
    }

    if card.rarity == "mythic" {
        sentences.push("A mythic centerpiece for the table to answer.".to_string());
    }

    sentences.join(" ")
}

fn color_phrase(count: usize) -> &'static str {
    match count {
        0 => "a colorless shell that any mana base can support",
        1 => "a focused mono-color game plan",
        2 => "a two-color pairing with room to flex",
        _ => "an ambitious three-plus-color identity",
    }
}

/// Up to two theme phrases matched out of the oracle text.
fn themes(oracle: &str) -> Vec<&'static str> {
    const PATTERNS: &[(&[&str], &str)] = &[
        (&["draw"], "keeps the hand stocked with card draw"),
        (&["token"], "goes wide with token production"),
        (&["counter"], "piles up counters"),
        (&["graveyard", "dies"], "grinds value out of the graveyard"),
        (&["sacrifice"], "turns sacrifice into advantage"),
        (&["attack", "combat"], "pushes damage through combat"),
        (
            &["instant", "sorcery", "spell"],
            "rewards a spell-heavy build",
        ),
        (&["artifact"], "leans on artifact synergies"),
        (&["enchantment"], "builds around enchantments"),
        (&["tribal", "typal"], "supports a creature-type theme"),
    ];

    PATTERNS
        .iter()
        .filter(|(needles, _)| needles.iter().any(|needle| oracle.contains(needle)))
        .map(|(_, phrase)| *phrase)
        .take(2)
        .collect()
}
