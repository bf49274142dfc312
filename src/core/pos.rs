//! Board coordinates.
//!
//! `x` is the column and `y` the row, both in `0..8`. Only the 32 dark cells,
//! where `x + y` is odd, are ever occupied or addressed.

use serde::{Deserialize, Serialize};

/// Board side length.
pub const BOARD_SIZE: i8 = 8;

/// A cell on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub x: i8,
    pub y: i8,
}

impl Pos {
    /// Create a position. The result may lie off the board; see `is_on_board`.
    #[must_use]
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Convert request coordinates, rejecting anything outside the board.
    #[must_use]
    pub fn from_coords(x: u64, y: u64) -> Option<Self> {
        let size = BOARD_SIZE as u64;
        (x < size && y < size).then(|| Self::new(x as i8, y as i8))
    }

    /// Whether both coordinates are within `0..8`.
    #[must_use]
    pub const fn is_on_board(self) -> bool {
        self.x >= 0 && self.x < BOARD_SIZE && self.y >= 0 && self.y < BOARD_SIZE
    }

    /// Whether this is one of the 32 playable (dark) cells.
    #[must_use]
    pub const fn is_playable(self) -> bool {
        self.is_on_board() && (self.x + self.y) % 2 == 1
    }

    /// Offset by a delta.
    #[must_use]
    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The cell halfway between two cells two diagonal steps apart.
    #[must_use]
    pub const fn midpoint(self, other: Pos) -> Self {
        Self::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }

    /// Iterate over all playable cells, row by row.
    pub fn playable() -> impl Iterator<Item = Pos> {
        (0..BOARD_SIZE)
            .flat_map(|y| (0..BOARD_SIZE).map(move |x| Pos::new(x, y)))
            .filter(|p| p.is_playable())
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_coords() {
        assert_eq!(Pos::from_coords(1, 2), Some(Pos::new(1, 2)));
        assert_eq!(Pos::from_coords(7, 7), Some(Pos::new(7, 7)));
        assert_eq!(Pos::from_coords(8, 0), None);
        assert_eq!(Pos::from_coords(0, u64::MAX), None);
    }

    #[test]
    fn test_playable_parity() {
        assert!(Pos::new(1, 0).is_playable());
        assert!(Pos::new(0, 5).is_playable());
        assert!(!Pos::new(0, 0).is_playable());
        assert!(!Pos::new(-1, 0).is_playable());
        assert_eq!(Pos::playable().count(), 32);
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(Pos::new(1, 2).midpoint(Pos::new(3, 4)), Pos::new(2, 3));
        assert_eq!(Pos::new(4, 5).midpoint(Pos::new(2, 3)), Pos::new(3, 4));
    }

    #[test]
    fn test_display() {
        assert_eq!(Pos::new(2, 3).to_string(), "(2, 3)");
    }
}
