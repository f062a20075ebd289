use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// One of the five mana colors.
///
/// Serialized as the single-letter code the card API uses. The ordering is
/// by letter code, not by the classic WUBRG wheel, so that a sorted identity
/// is stable regardless of where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "U")]
    Blue,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
}

impl Color {
    pub const fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    pub fn from_letter(letter: char) -> Result<Self, DomainError> {
        match letter.to_ascii_uppercase() {
            'W' => Ok(Color::White),
            'U' => Ok(Color::Blue),
            'B' => Ok(Color::Black),
            'R' => Ok(Color::Red),
            'G' => Ok(Color::Green),
            other => Err(DomainError::UnknownColor(other)),
        }
    }
}

impl Ord for Color {
    fn cmp(&self, other: &Self) -> Ordering {
        self.letter().cmp(&other.letter())
    }
}

impl PartialOrd for Color {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}
