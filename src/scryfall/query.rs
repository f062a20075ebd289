//! Search-query strings for the card API's query grammar.

use crate::domain::{Color, Filter};

/// Fallback when a filtered search matches nothing: any commander at all.
pub const COMMANDER_ONLY: &str = "is:commander";

/// Build the commander search for a filter.
///
/// Always commander-only, with `id:` present iff the filter names colors,
/// and both mana-value bounds copied verbatim.
pub fn commander_search(filter: &Filter) -> String {
    let mut query = String::from(COMMANDER_ONLY);
    if !filter.colors().is_empty() {
        query.push_str(&format!(" id:{}", filter.color_letters()));
    }
    query.push_str(&format!(
        " mv>={} mv<={}",
        filter.mana_min(),
        filter.mana_max()
    ));
    query
}

/// Search for open-partner candidates; callers still have to exclude the
/// original card and named-partner cards from the results.
pub fn open_partner_search() -> String {
    format!("{COMMANDER_ONLY} o:\"partner\"")
}

/// Synthesized-suggestion queries for a color identity:
/// `(category, query, result cap)` triples, in display order.
pub fn suggestion_queries(colors: &[Color]) -> Vec<(&'static str, String, usize)> {
    let id = if colors.is_empty() {
        String::new()
    } else {
        let letters: String = colors.iter().map(|c| c.letter()).collect();
        format!("id:{letters} ")
    };

    vec![
        (
            "Ramp & Fixing",
            format!("{id}(o:\"search your library for\" OR o:\"add mana\") (type:instant OR type:sorcery)"),
            6,
        ),
        (
            "Removal",
            format!("{id}(o:\"destroy\" OR o:\"exile\") -type:creature"),
            6,
        ),
        (
            "Card Draw",
            format!("{id}o:\"draw\" (type:instant OR type:sorcery OR type:enchantment)"),
            6,
        ),
        ("Creatures", format!("{id}type:creature mv<=4"), 8),
    ]
}
