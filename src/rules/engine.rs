//! Rules engine trait.
//!
//! A rules engine defines:
//! - Which single-step moves are legal for a side
//! - How a move changes the board
//! - Whether a capture chain continues, the turn passes, or the game is won
//!
//! Engines are pure functions of `(board, move)`: they never touch storage,
//! escrow or time, so every replica reaches the same decision.

use smallvec::SmallVec;

use crate::board::Board;
use crate::core::{Color, Pos};

/// Why a proposed move was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("{0} is not a playable cell")]
    OutOfBounds(String),

    #[error("no {color} piece at {pos}")]
    WrongPiece { color: Color, pos: Pos },

    #[error("invalid move from {from} to {to}: {reason}")]
    InvalidMove {
        from: Pos,
        to: Pos,
        reason: &'static str,
    },
}

impl MoveError {
    /// Out-of-bounds error for raw request coordinates.
    pub fn out_of_bounds(x: impl std::fmt::Display, y: impl std::fmt::Display) -> Self {
        MoveError::OutOfBounds(format!("({}, {})", x, y))
    }

    pub(crate) fn invalid(from: Pos, to: Pos, reason: &'static str) -> Self {
        MoveError::InvalidMove { from, to, reason }
    }
}

/// One diagonal step or single jump.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Pos,
    pub to: Pos,
    /// The opposing piece jumped over, for captures.
    pub captured: Option<Pos>,
}

impl Move {
    #[must_use]
    pub const fn step(from: Pos, to: Pos) -> Self {
        Self { from, to, captured: None }
    }

    #[must_use]
    pub const fn jump(from: Pos, to: Pos, captured: Pos) -> Self {
        Self { from, to, captured: Some(captured) }
    }

    #[must_use]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Legal move list. Most positions have well under 16 options.
pub type MoveList = SmallVec<[Move; 16]>;

/// Result of applying one accepted move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Board after the move, captures removed and promotion applied.
    pub board: Board,
    /// Cell of the captured piece, if the move was a jump.
    pub captured: Option<Pos>,
    /// Whether the moving piece was crowned by this move.
    pub promoted: bool,
    /// The same piece can capture again; the turn does not pass.
    pub must_continue: bool,
    /// Side to move next.
    pub next_turn: Color,
    /// Set when the opponent is left with no pieces or no legal move.
    pub winner: Option<Color>,
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_moves` must honour mandatory capture: when any capture exists,
///   only captures are returned
/// - `chain` names the cell a capture sequence must continue from; when set,
///   only captures by that piece are legal
/// - `apply_move` must be deterministic and must not mutate its input
pub trait RulesEngine {
    /// Enumerate every legal move for `color`.
    fn legal_moves(&self, board: &Board, color: Color, chain: Option<Pos>) -> MoveList;

    /// Validate and apply a single step or jump.
    fn apply_move(
        &self,
        board: &Board,
        color: Color,
        from: Pos,
        to: Pos,
        chain: Option<Pos>,
    ) -> Result<MoveOutcome, MoveError>;

    // === Convenience Methods ===

    /// Whether `color` has any legal move at all.
    fn has_legal_move(&self, board: &Board, color: Color) -> bool {
        !self.legal_moves(board, color, None).is_empty()
    }

    /// Whether `color` is obliged to capture this turn.
    fn must_capture(&self, board: &Board, color: Color) -> bool {
        self.legal_moves(board, color, None)
            .first()
            .is_some_and(Move::is_capture)
    }

    /// Winner of a position where `to_move` is about to play, if any.
    fn winner(&self, board: &Board, to_move: Color) -> Option<Color> {
        (!self.has_legal_move(board, to_move)).then(|| to_move.opponent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_constructors() {
        let step = Move::step(Pos::new(1, 2), Pos::new(2, 3));
        assert!(!step.is_capture());

        let jump = Move::jump(Pos::new(1, 2), Pos::new(3, 4), Pos::new(2, 3));
        assert!(jump.is_capture());
        assert_eq!(jump.captured, Some(Pos::new(2, 3)));
    }

    #[test]
    fn test_move_error_messages() {
        assert_eq!(
            MoveError::out_of_bounds(9, 0).to_string(),
            "(9, 0) is not a playable cell"
        );
        assert_eq!(
            MoveError::WrongPiece { color: Color::Red, pos: Pos::new(1, 2) }.to_string(),
            "no red piece at (1, 2)"
        );
        assert_eq!(
            MoveError::invalid(Pos::new(1, 2), Pos::new(1, 3), "not diagonal").to_string(),
            "invalid move from (1, 2) to (1, 3): not diagonal"
        );
    }
}
