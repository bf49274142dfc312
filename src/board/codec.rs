//! Textual board encoding.
//!
//! Eight rows of eight symbols joined by `|`, row `y` first at `y = 0`:
//!
//! ```text
//! *b*b*b*b|b*b*b*b*|*b*b*b*b|********|********|r*r*r*r*|*r*r*r*r|r*r*r*r*
//! ```
//!
//! `*` is an empty cell, `b`/`r` simple pieces and `B`/`R` kings.
//! `decode(encode(b)) == b` for every board the rules engine can produce.

use super::board::Board;
use super::piece::Piece;
use crate::core::{Pos, BOARD_SIZE};

const SIZE: usize = BOARD_SIZE as usize;

/// Row separator.
pub const ROW_SEPARATOR: char = '|';

/// Symbol for an empty cell.
pub const EMPTY_SYMBOL: char = '*';

/// Encoded opening board.
pub const OPENING_BOARD: &str =
    "*b*b*b*b|b*b*b*b*|*b*b*b*b|********|********|r*r*r*r*|*r*r*r*r|r*r*r*r*";

/// Board text that cannot be decoded.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("invalid board string: {0}")]
    InvalidBoard(String),

    #[error("invalid board symbol {symbol:?} at {pos}")]
    InvalidSymbol { symbol: char, pos: Pos },

    #[error("piece on unplayable cell {0}")]
    UnplayableCell(Pos),
}

/// Encode a board as text.
#[must_use]
pub fn encode(board: &Board) -> String {
    let mut out = String::with_capacity(SIZE * (SIZE + 1));
    for (y, row) in board.rows().iter().enumerate() {
        if y > 0 {
            out.push(ROW_SEPARATOR);
        }
        out.extend(row.iter().map(|cell| cell.map_or(EMPTY_SYMBOL, Piece::symbol)));
    }
    out
}

/// Decode board text.
pub fn decode(text: &str) -> Result<Board, CodecError> {
    let rows: Vec<&str> = text.split(ROW_SEPARATOR).collect();
    if rows.len() != SIZE || rows.iter().any(|row| row.chars().count() != SIZE) {
        return Err(CodecError::InvalidBoard(text.to_string()));
    }

    let mut cells = [[None; SIZE]; SIZE];
    for (y, row) in rows.iter().enumerate() {
        for (x, symbol) in row.chars().enumerate() {
            let pos = Pos::new(x as i8, y as i8);
            if symbol == EMPTY_SYMBOL {
                continue;
            }
            let piece = Piece::from_symbol(symbol).ok_or(CodecError::InvalidSymbol { symbol, pos })?;
            if !pos.is_playable() {
                return Err(CodecError::UnplayableCell(pos));
            }
            cells[y][x] = Some(piece);
        }
    }
    Ok(Board::from_rows(cells))
}
