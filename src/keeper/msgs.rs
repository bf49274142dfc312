//! Requests and responses.

use serde::{Deserialize, Serialize};

use crate::core::{Address, CheckersError, Color, GameId, Pos};
use crate::events::NO_CAPTURE;
use crate::game::{StoredGame, SystemInfo};
use crate::rules::MoveError;

/// Request to start a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGame {
    pub creator: Address,
    pub black: Address,
    pub red: Address,
    pub wager: u64,
    /// Empty means the configured default denomination.
    pub denom: String,
}

impl CreateGame {
    pub fn new(creator: impl Into<Address>, black: impl Into<Address>, red: impl Into<Address>) -> Self {
        Self {
            creator: creator.into(),
            black: black.into(),
            red: red.into(),
            wager: 0,
            denom: String::new(),
        }
    }

    #[must_use]
    pub fn with_wager(mut self, wager: u64, denom: impl Into<String>) -> Self {
        self.wager = wager;
        self.denom = denom.into();
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGameResponse {
    pub game_index: GameId,
}

/// Request to move one piece. Coordinates are raw and checked on use.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayMove {
    pub creator: Address,
    pub game_index: GameId,
    pub from_x: u64,
    pub from_y: u64,
    pub to_x: u64,
    pub to_y: u64,
}

impl PlayMove {
    pub fn new(creator: impl Into<Address>, game_index: GameId, from: (u64, u64), to: (u64, u64)) -> Self {
        Self {
            creator: creator.into(),
            game_index,
            from_x: from.0,
            from_y: from.1,
            to_x: to.0,
            to_y: to.1,
        }
    }

    pub fn positions(&self) -> Result<(Pos, Pos), MoveError> {
        positions(self.from_x, self.from_y, self.to_x, self.to_y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayMoveResponse {
    pub captured: Option<Pos>,
    pub winner: Option<Color>,
}

impl PlayMoveResponse {
    /// Captured column, or -1.
    #[must_use]
    pub fn captured_x(&self) -> i64 {
        self.captured.map_or(NO_CAPTURE, |p| i64::from(p.x))
    }

    /// Captured row, or -1.
    #[must_use]
    pub fn captured_y(&self) -> i64 {
        self.captured.map_or(NO_CAPTURE, |p| i64::from(p.y))
    }
}

/// Read-only pre-flight check of a move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanPlayMove {
    pub game_index: GameId,
    pub player: Color,
    pub from_x: u64,
    pub from_y: u64,
    pub to_x: u64,
    pub to_y: u64,
}

impl CanPlayMove {
    pub fn new(game_index: GameId, player: Color, from: (u64, u64), to: (u64, u64)) -> Self {
        Self {
            game_index,
            player,
            from_x: from.0,
            from_y: from.1,
            to_x: to.0,
            to_y: to.1,
        }
    }

    pub fn positions(&self) -> Result<(Pos, Pos), MoveError> {
        positions(self.from_x, self.from_y, self.to_x, self.to_y)
    }
}

/// Reason reported for an acceptable move.
pub const REASON_OK: &str = "ok";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanPlayMoveResponse {
    pub possible: bool,
    pub reason: String,
}

impl CanPlayMoveResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            possible: true,
            reason: REASON_OK.to_string(),
        }
    }

    #[must_use]
    pub fn rejected(error: &CheckersError) -> Self {
        Self {
            possible: false,
            reason: error.to_string(),
        }
    }
}

/// Games created by the keeper, in id order, plus the counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    pub system_info: SystemInfo,
    pub games: Vec<StoredGame>,
}

/// Outcome of one expiry sweep, in processing order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Games with two or more moves, kept as terminal.
    pub forfeited: Vec<GameId>,
    /// Games with at most one move, deleted.
    pub abandoned: Vec<GameId>,
}

impl SweepReport {
    #[must_use]
    pub fn len(&self) -> usize {
        self.forfeited.len() + self.abandoned.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn positions(from_x: u64, from_y: u64, to_x: u64, to_y: u64) -> Result<(Pos, Pos), MoveError> {
    let from = Pos::from_coords(from_x, from_y).ok_or_else(|| MoveError::out_of_bounds(from_x, from_y))?;
    let to = Pos::from_coords(to_x, to_y).ok_or_else(|| MoveError::out_of_bounds(to_x, to_y))?;
    Ok((from, to))
}
