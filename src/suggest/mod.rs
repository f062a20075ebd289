//! Deck suggestions: best-effort recommendation-site scrape with a
//! synthesized card-search fallback and static staples as the floor.

mod edhrec;
mod service;

pub use edhrec::EdhrecScraper;
pub use service::SuggestionService;
