//! helmsman - commander picker core.
//!
//! Queries the Scryfall card-search API for random commanders matching a
//! color/mana filter, keeps a prefetch queue of ready-to-display picks
//! (partner pairings already resolved and merged), and fetches deck-building
//! suggestions for accepted commanders from EDHREC with a synthesized
//! Scryfall fallback.
//!
//! # Architecture
//!
//! - [`domain`] - pure types: [`domain::Filter`], [`domain::Commander`]
//! - [`ports`] - trait seams for the card API and the suggestion scrape
//! - [`scryfall`] - rate-limited API adapter and query builder
//! - [`core`] - result cache, normalizer, partner resolver, prefetch queue
//! - [`suggest`] - scrape/synthesize/staples suggestion chain
//! - [`app`] - the [`app::PickerSession`] facade a UI layer drives
//!
//! The whole crate is single-writer per piece of shared state: the prefetch
//! queue is owned by its manager and mutated under a mutex in atomic steps,
//! and background refills communicate only through that queue.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod error;
pub mod ports;
pub mod scryfall;
pub mod suggest;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub use error::{Error, Result};
