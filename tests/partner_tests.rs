//! Partner resolution: named-fetch precedence, open partnering, and the
//! non-fatal degradation to a solo commander.

mod support;

use std::sync::Arc;

use helmsman::core::PartnerResolver;
use helmsman::domain::Color;
use helmsman::ports::CardSource;
use helmsman::testkit::cards::{raw_card, ScriptedCardSource};

use support::{ikra, open_partner, tana};

fn resolver(source: &Arc<ScriptedCardSource>) -> PartnerResolver {
    PartnerResolver::new(Arc::clone(source) as Arc<dyn CardSource>)
}

#[tokio::test]
async fn named_partner_resolves_through_fuzzy_fetch() {
    let source = Arc::new(ScriptedCardSource::new().with_named(tana()));
    let resolver = resolver(&source);

    let commander = resolver.resolve(&ikra()).await;

    assert_eq!(
        commander.name,
        "Ikra Shidiqi, the Usurper & Tana, the Bloodsower"
    );
    assert_eq!(
        commander.colors,
        vec![Color::Black, Color::Green, Color::Red]
    );
    assert!(commander.is_paired());
    // The named path must never hit the random-search path, even though
    // the oracle text also contains the substring "partner".
    assert_eq!(source.named_count(), 1);
    assert_eq!(source.search_count(), 0);
}

#[tokio::test]
async fn named_partner_fetch_failure_degrades_to_solo() {
    // No scripted named card: the lookup answers like a 404.
    let source = Arc::new(ScriptedCardSource::new());
    let resolver = resolver(&source);

    let commander = resolver.resolve(&ikra()).await;

    assert_eq!(commander.name, "Ikra Shidiqi, the Usurper");
    assert!(commander.partner.is_none());
}

#[tokio::test]
async fn open_partner_pairs_with_random_candidate() {
    let drawn = open_partner("Krark, the Thumbless");
    let candidate = open_partner("Sakashima of a Thousand Faces");
    let source = Arc::new(
        ScriptedCardSource::new().with_search_results(vec![Ok(vec![candidate.clone()])]),
    );
    let resolver = resolver(&source);

    let commander = resolver.resolve(&drawn).await;

    assert_eq!(
        commander.name,
        "Krark, the Thumbless & Sakashima of a Thousand Faces"
    );
    assert_eq!(source.search_count(), 1);
    assert_eq!(source.named_count(), 0);
}

#[tokio::test]
async fn open_partner_excludes_the_drawn_card_itself() {
    let drawn = open_partner("Krark, the Thumbless");
    let other = open_partner("Sakashima of a Thousand Faces");
    // The drawn card comes back first in its own search results.
    let source = Arc::new(ScriptedCardSource::new().with_search_results(vec![Ok(vec![
        drawn.clone(),
        other.clone(),
    ])]));

    let commander = resolver(&source).resolve(&drawn).await;

    assert_eq!(
        commander.name,
        "Krark, the Thumbless & Sakashima of a Thousand Faces"
    );
}

#[tokio::test]
async fn open_partner_skips_named_partner_candidates() {
    let drawn = open_partner("Krark, the Thumbless");
    // The only candidate has a specific partner and is not a valid pick.
    let source =
        Arc::new(ScriptedCardSource::new().with_search_results(vec![Ok(vec![ikra()])]));

    let commander = resolver(&source).resolve(&drawn).await;

    assert_eq!(commander.name, "Krark, the Thumbless");
    assert!(commander.partner.is_none());
}

#[tokio::test]
async fn open_partner_search_failure_degrades_to_solo() {
    let drawn = open_partner("Krark, the Thumbless");
    let source = Arc::new(ScriptedCardSource::new().with_search_results(vec![Err(
        helmsman::Error::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
            url: "scripted:/cards/search".to_string(),
        },
    )]));

    let commander = resolver(&source).resolve(&drawn).await;

    assert_eq!(commander.name, "Krark, the Thumbless");
    assert!(commander.partner.is_none());
}

#[tokio::test]
async fn plain_commander_stays_solo_without_lookups() {
    let source = Arc::new(ScriptedCardSource::new());
    let commander = resolver(&source).resolve(&raw_card("Talrand, Sky Summoner")).await;

    assert!(commander.partner.is_none());
    assert_eq!(source.search_count(), 0);
    assert_eq!(source.named_count(), 0);
}
