//! Pure domain types: colors, filters, and the commander record served to
//! the UI layer. No I/O lives here.

mod color;
mod commander;
mod filter;

pub use color::Color;
pub use commander::{Commander, PartnerCard, SuggestionGroup};
pub use filter::Filter;
