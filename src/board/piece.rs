//! Pieces and their board symbols.

use serde::{Deserialize, Serialize};

use crate::core::Color;

/// A piece on the board: its side and whether it has been promoted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub king: bool,
}

impl Piece {
    /// A simple (unpromoted) piece.
    #[must_use]
    pub const fn simple(color: Color) -> Self {
        Self { color, king: false }
    }

    /// A king.
    #[must_use]
    pub const fn king(color: Color) -> Self {
        Self { color, king: true }
    }

    /// The same piece, promoted.
    #[must_use]
    pub const fn crowned(self) -> Self {
        Self::king(self.color)
    }

    /// Row deltas this piece may move along.
    #[must_use]
    pub fn row_directions(self) -> &'static [i8] {
        match (self.king, self.color) {
            (true, _) => &[1, -1],
            (false, Color::Black) => &[1],
            (false, Color::Red) => &[-1],
        }
    }

    /// Board symbol: lowercase simple, uppercase king.
    #[must_use]
    pub const fn symbol(self) -> char {
        match (self.color, self.king) {
            (Color::Black, false) => 'b',
            (Color::Black, true) => 'B',
            (Color::Red, false) => 'r',
            (Color::Red, true) => 'R',
        }
    }

    /// Parse a board symbol. `None` for anything that is not a piece.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'b' => Some(Self::simple(Color::Black)),
            'B' => Some(Self::king(Color::Black)),
            'r' => Some(Self::simple(Color::Red)),
            'R' => Some(Self::king(Color::Red)),
            _ => None,
        }
    }
}
