//! Side identification and per-side data storage.
//!
//! ## Color
//!
//! The two opposing sides of a checkers game. Black always moves first.
//!
//! ## ColorMap
//!
//! Fixed two-entry storage indexed by `Color`, for per-side data such as
//! piece counts or player addresses.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Black,
    Red,
}

impl Color {
    /// Both colors, in turn order.
    pub const ALL: [Color; 2] = [Color::Black, Color::Red];

    /// The side that moves first in a new game.
    pub const FIRST: Color = Color::Black;

    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Color::Black => Color::Red,
            Color::Red => Color::Black,
        }
    }

    /// Row delta of a forward step for this side's simple pieces.
    #[must_use]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Black => 1,
            Color::Red => -1,
        }
    }

    /// Row on which this side's simple pieces are promoted.
    #[must_use]
    pub const fn promotion_row(self) -> i8 {
        match self {
            Color::Black => 7,
            Color::Red => 0,
        }
    }

    /// Single-character token used in storage and events (`b` / `r`).
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Color::Black => "b",
            Color::Red => "r",
        }
    }

    /// Parse a storage token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "b" => Some(Color::Black),
            "r" => Some(Color::Red),
            _ => None,
        }
    }

    /// Human-readable name used in messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
        }
    }

    const fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::Red => 1,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Token for an optional winner: the color token, or `*` for none.
#[must_use]
pub fn winner_token(winner: Option<Color>) -> &'static str {
    winner.map_or("*", Color::token)
}

/// Per-color data storage with O(1) access.
///
/// ```
/// use checkers_ledger::core::{Color, ColorMap};
///
/// let mut pieces: ColorMap<u8> = ColorMap::with_value(12);
/// pieces[Color::Red] -= 1;
/// assert_eq!(pieces[Color::Black], 12);
/// assert_eq!(pieces[Color::Red], 11);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMap<T> {
    data: [T; 2],
}

impl<T> ColorMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Color) -> T) -> Self {
        Self {
            data: [factory(Color::Black), factory(Color::Red)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    /// Iterate over (Color, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        Color::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Color> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        &self.data[color.index()]
    }
}

impl<T> IndexMut<Color> for ColorMap<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        &mut self.data[color.index()]
    }
}
