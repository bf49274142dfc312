//! The persisted game record.
//!
//! One `StoredGame` per game id. The board is kept in its encoded text form;
//! it is cleared when a game is forfeited, and decoded on demand when a move
//! is validated.

use serde::{Deserialize, Serialize};

use crate::board::{self, Board, CodecError};
use crate::core::{Address, Color, GameId, Pos, Timestamp};

/// Lifecycle state of a game, derived from the stored fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No move played yet.
    Created,
    /// At least one move played, no winner.
    InProgress,
    /// A move left the opponent without pieces or moves.
    Concluded,
    /// The deadline passed with two or more moves played.
    Forfeited,
}

impl GameStatus {
    /// Whether no further move can change the game.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Concluded | GameStatus::Forfeited)
    }
}

/// A game as persisted under `StoreKey::Game(index)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredGame {
    pub index: GameId,
    /// Encoded board; empty once a forfeited game is cleared.
    pub board: String,
    pub turn: Color,
    pub black: Address,
    pub red: Address,
    pub winner: Option<Color>,
    pub forfeited: bool,
    pub deadline: Timestamp,
    pub move_count: u64,
    /// Previous game in the expiry queue (closer to the head).
    pub before_index: Option<GameId>,
    /// Next game in the expiry queue (closer to the tail).
    pub after_index: Option<GameId>,
    pub wager: u64,
    pub denom: String,
    /// Cell a capture sequence must continue from.
    pub chain: Option<Pos>,
}

impl StoredGame {
    /// A fresh game on the opening board. Queue links are unset.
    pub fn new(
        index: GameId,
        black: Address,
        red: Address,
        wager: u64,
        denom: impl Into<String>,
        deadline: Timestamp,
    ) -> Self {
        Self {
            index,
            board: board::encode(&Board::opening()),
            turn: Color::FIRST,
            black,
            red,
            winner: None,
            forfeited: false,
            deadline,
            move_count: 0,
            before_index: None,
            after_index: None,
            wager,
            denom: denom.into(),
            chain: None,
        }
    }

    /// Decode the stored board.
    pub fn parse_board(&self) -> Result<Board, CodecError> {
        board::decode(&self.board)
    }

    /// Address playing a color.
    #[must_use]
    pub fn player(&self, color: Color) -> &Address {
        match color {
            Color::Black => &self.black,
            Color::Red => &self.red,
        }
    }

    /// Color an address acts as. An address holding both colors acts as the
    /// side whose turn it is.
    #[must_use]
    pub fn color_of(&self, address: &Address) -> Option<Color> {
        let black = &self.black == address;
        let red = &self.red == address;
        match (black, red) {
            (true, true) => Some(self.turn),
            (true, false) => Some(Color::Black),
            (false, true) => Some(Color::Red),
            (false, false) => None,
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        match (self.winner, self.forfeited, self.move_count) {
            (Some(_), true, _) => GameStatus::Forfeited,
            (Some(_), false, _) => GameStatus::Concluded,
            (None, _, 0) => GameStatus::Created,
            (None, _, _) => GameStatus::InProgress,
        }
    }

    /// Amount currently held in escrow for this game: one wager per side that
    /// has played its first move.
    #[must_use]
    pub fn pot(&self) -> u64 {
        self.wager.saturating_mul(self.move_count.min(2))
    }
}
