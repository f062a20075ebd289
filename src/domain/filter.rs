use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Color;
use crate::error::DomainError;

/// The widest mana-value window the UI offers.
const MANA_MAX_DEFAULT: u32 = 15;

/// Active search filter: a color identity and an inclusive mana-value range.
///
/// Colors live in a `BTreeSet`, so two filters built from the same colors in
/// any insertion order compare equal and produce the same cache key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    colors: BTreeSet<Color>,
    mana_min: u32,
    mana_max: u32,
}

impl Filter {
    /// Build a validated filter. Fails when `mana_min > mana_max`.
    pub fn new(
        colors: impl IntoIterator<Item = Color>,
        mana_min: u32,
        mana_max: u32,
    ) -> Result<Self, DomainError> {
        if mana_min > mana_max {
            return Err(DomainError::InvertedManaRange {
                min: mana_min,
                max: mana_max,
            });
        }
        Ok(Self {
            colors: colors.into_iter().collect(),
            mana_min,
            mana_max,
        })
    }

    /// Any commander: no color restriction, full mana range.
    pub fn any() -> Self {
        Self {
            colors: BTreeSet::new(),
            mana_min: 0,
            mana_max: MANA_MAX_DEFAULT,
        }
    }

    pub fn colors(&self) -> &BTreeSet<Color> {
        &self.colors
    }

    pub fn mana_min(&self) -> u32 {
        self.mana_min
    }

    pub fn mana_max(&self) -> u32 {
        self.mana_max
    }

    /// Sorted color letters, e.g. `"BGU"`. Empty for colorless.
    pub fn color_letters(&self) -> String {
        self.colors.iter().map(|c| c.letter()).collect()
    }

    /// Deterministic cache key for this filter.
    ///
    /// Two logically identical filters always collide to the same key,
    /// regardless of the order the UI toggled colors in.
    pub fn cache_key(&self) -> String {
        let colors = if self.colors.is_empty() {
            "-".to_string()
        } else {
            self.color_letters()
        };
        format!("commander:{}:mv{}-{}", colors, self.mana_min, self.mana_max)
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::any()
    }
}
