//! Classic 8x8 checkers.
//!
//! - Simple pieces step and capture diagonally forward; kings in both directions
//! - Captures are mandatory; any single available capture may be chosen
//! - A capture sequence is played one jump per move while the same piece can
//!   keep capturing; crowning ends the sequence
//! - A side with no pieces or no legal move on its turn has lost

use tracing::trace;

use super::engine::{Move, MoveError, MoveList, MoveOutcome, RulesEngine};
use crate::board::{Board, Piece};
use crate::core::{Color, Pos};

const COLUMN_DIRECTIONS: [i8; 2] = [-1, 1];

/// The checkers rules engine. Stateless.
#[derive(Clone, Copy, Debug, Default)]
pub struct Checkers;

impl Checkers {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Append every step and jump available to one piece.
    fn piece_moves(board: &Board, from: Pos, piece: Piece, out: &mut MoveList) {
        for &dy in piece.row_directions() {
            for dx in COLUMN_DIRECTIONS {
                let adjacent = from.offset(dx, dy);
                if !adjacent.is_on_board() {
                    continue;
                }
                match board.get(adjacent) {
                    None => out.push(Move::step(from, adjacent)),
                    Some(other) if other.color != piece.color => {
                        let landing = adjacent.offset(dx, dy);
                        if board.is_empty_at(landing) {
                            out.push(Move::jump(from, landing, adjacent));
                        }
                    }
                    Some(_) => {}
                }
            }
        }
    }

    fn validate_cell(pos: Pos) -> Result<(), MoveError> {
        if pos.is_playable() {
            Ok(())
        } else {
            Err(MoveError::OutOfBounds(pos.to_string()))
        }
    }
}

impl RulesEngine for Checkers {
    fn legal_moves(&self, board: &Board, color: Color, chain: Option<Pos>) -> MoveList {
        let mut moves = MoveList::new();
        match chain {
            Some(pos) => {
                if let Some(piece) = board.get(pos).filter(|p| p.color == color) {
                    Self::piece_moves(board, pos, piece, &mut moves);
                }
                moves.retain(|m| m.is_capture());
            }
            None => {
                for (pos, piece) in board.pieces_of(color) {
                    Self::piece_moves(board, pos, piece, &mut moves);
                }
                if moves.iter().any(Move::is_capture) {
                    moves.retain(|m| m.is_capture());
                }
            }
        }
        moves
    }

    fn apply_move(
        &self,
        board: &Board,
        color: Color,
        from: Pos,
        to: Pos,
        chain: Option<Pos>,
    ) -> Result<MoveOutcome, MoveError> {
        Self::validate_cell(from)?;
        Self::validate_cell(to)?;

        let piece = board
            .get(from)
            .filter(|p| p.color == color)
            .ok_or(MoveError::WrongPiece { color, pos: from })?;

        if chain.is_some_and(|c| c != from) {
            return Err(MoveError::invalid(from, to, "capture must continue with the same piece"));
        }

        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let distance = dx.abs();
        if distance != dy.abs() || !(1..=2).contains(&distance) {
            return Err(MoveError::invalid(from, to, "not a diagonal step or jump"));
        }
        if !piece.row_directions().contains(&dy.signum()) {
            return Err(MoveError::invalid(from, to, "simple pieces only move forward"));
        }
        if board.get(to).is_some() {
            return Err(MoveError::invalid(from, to, "destination is occupied"));
        }

        let captured = if distance == 2 {
            let jumped = from.midpoint(to);
            match board.get(jumped) {
                Some(other) if other.color != color => Some(jumped),
                _ => return Err(MoveError::invalid(from, to, "jump must capture an opposing piece")),
            }
        } else if chain.is_some() || self.must_capture(board, color) {
            return Err(MoveError::invalid(from, to, "capture is mandatory"));
        } else {
            None
        };

        let mut next = *board;
        next.set(from, None);
        if let Some(jumped) = captured {
            next.set(jumped, None);
        }
        let promoted = !piece.king && to.y == color.promotion_row();
        next.set(to, Some(if promoted { piece.crowned() } else { piece }));

        let must_continue =
            captured.is_some() && !promoted && !self.legal_moves(&next, color, Some(to)).is_empty();
        let next_turn = if must_continue { color } else { color.opponent() };
        let winner = if must_continue {
            None
        } else {
            self.winner(&next, next_turn)
        };

        trace!(%color, %from, %to, ?captured, promoted, must_continue, "move applied");

        Ok(MoveOutcome {
            board: next,
            captured,
            promoted,
            must_continue,
            next_turn,
            winner,
        })
    }
}
