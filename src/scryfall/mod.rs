//! Scryfall adapter: wire types, query building, and the rate-limited client.

mod client;
pub mod query;
mod types;

pub use client::{RateLimiter, ScryfallClient};
pub use types::{ImageUris, RawCard, SearchResponse};
