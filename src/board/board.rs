//! The 8x8 board.
//!
//! Cells are stored in a fixed array indexed `[y][x]`. The 32 light cells are
//! never written by the rules engine and the codec rejects boards that place a
//! piece on one, so they are always empty.

use serde::{Deserialize, Serialize};

use super::piece::Piece;
use crate::core::{Color, ColorMap, Pos, BOARD_SIZE};

const SIZE: usize = BOARD_SIZE as usize;

/// Rows each side fills at the start of a game.
const OPENING_ROWS: usize = 3;

/// Board state: one optional piece per cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; SIZE]; SIZE],
}

impl Board {
    /// An empty board.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard opening position: black on rows 0-2, red on rows 5-7.
    #[must_use]
    pub fn opening() -> Self {
        let mut board = Self::empty();
        for pos in Pos::playable() {
            let row = pos.y as usize;
            if row < OPENING_ROWS {
                board.set(pos, Some(Piece::simple(Color::Black)));
            } else if row >= SIZE - OPENING_ROWS {
                board.set(pos, Some(Piece::simple(Color::Red)));
            }
        }
        board
    }

    /// Piece at a position. Off-board positions are empty.
    #[must_use]
    pub fn get(&self, pos: Pos) -> Option<Piece> {
        if pos.is_on_board() {
            self.cells[pos.y as usize][pos.x as usize]
        } else {
            None
        }
    }

    /// Place or clear a piece.
    ///
    /// Panics if `pos` is off the board; callers validate positions first.
    pub fn set(&mut self, pos: Pos, piece: Option<Piece>) {
        assert!(pos.is_on_board(), "Position {} is off the board", pos);
        self.cells[pos.y as usize][pos.x as usize] = piece;
    }

    /// Remove and return the piece at a position.
    pub fn take(&mut self, pos: Pos) -> Option<Piece> {
        let piece = self.get(pos);
        if piece.is_some() {
            self.set(pos, None);
        }
        piece
    }

    /// Whether a position is on the board and unoccupied.
    #[must_use]
    pub fn is_empty_at(&self, pos: Pos) -> bool {
        pos.is_on_board() && self.get(pos).is_none()
    }

    /// Iterate over occupied cells, row by row.
    pub fn pieces(&self) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        Pos::playable().filter_map(move |pos| self.get(pos).map(|piece| (pos, piece)))
    }

    /// Iterate over the cells occupied by one side.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Piece count per side.
    #[must_use]
    pub fn counts(&self) -> ColorMap<usize> {
        let mut counts = ColorMap::with_value(0);
        for (_, piece) in self.pieces() {
            counts[piece.color] += 1;
        }
        counts
    }

    /// Raw row access for the codec.
    pub(crate) fn rows(&self) -> &[[Option<Piece>; SIZE]; SIZE] {
        &self.cells
    }

    /// Build from raw rows. The codec is responsible for validating them.
    pub(crate) fn from_rows(cells: [[Option<Piece>; SIZE]; SIZE]) -> Self {
        Self { cells }
    }
}
