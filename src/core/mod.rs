//! The picker core: result cache, card normalization, partner resolution,
//! and the prefetch queue manager.

pub mod cache;
pub mod normalize;
pub mod partner;
pub mod queue;

pub use cache::CommanderCache;
pub use partner::{PartnerKind, PartnerResolver};
pub use queue::Prefetcher;
