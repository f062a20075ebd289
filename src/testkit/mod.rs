//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`cards`] — [`ScriptedCardSource`](cards::ScriptedCardSource), a
//!   scripted [`CardSource`](crate::ports::CardSource) with recorded queries
//!   and call counters, plus a [`raw_card`](cards::raw_card) builder.
//! - [`suggestions`] — [`ScriptedSuggestions`](suggestions::ScriptedSuggestions),
//!   a scripted [`SuggestionSource`](crate::ports::SuggestionSource).

pub mod cards;
pub mod suggestions;
