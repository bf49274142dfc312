//! Game notifications.
//!
//! Each event is a kind plus an ordered list of string attributes, matching
//! what the host's event bus carries. The attribute order is fixed per kind.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::core::{winner_token, Address, Color, GameId, Pos};

/// Attribute keys.
pub mod attr {
    pub const CREATOR: &str = "creator";
    pub const GAME_INDEX: &str = "game-index";
    pub const BLACK: &str = "black";
    pub const RED: &str = "red";
    pub const WAGER: &str = "wager";
    pub const DENOM: &str = "denom";
    pub const CAPTURED_X: &str = "captured-x";
    pub const CAPTURED_Y: &str = "captured-y";
    pub const WINNER: &str = "winner";
    pub const BOARD: &str = "board";
}

/// Coordinate reported when a move captured nothing.
pub const NO_CAPTURE: i64 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    NewGameCreated,
    MovePlayed,
    GameForfeited,
}

impl EventKind {
    /// Name on the event bus.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EventKind::NewGameCreated => "new-game-created",
            EventKind::MovePlayed => "move-played",
            EventKind::GameForfeited => "game-forfeited",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A notification with its attributes in emission order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub kind: EventKind,
    pub attributes: SmallVec<[(String, String); 6]>,
}

impl GameEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            attributes: SmallVec::new(),
        }
    }

    /// Append an attribute (builder pattern).
    #[must_use]
    pub fn with_attribute(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }

    /// First value recorded under `key`.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.attributes.iter().map(|(k, _)| k.as_str()).collect()
    }
}

/// Constructors for the three notifications.
impl GameEvent {
    pub fn game_created(
        creator: &Address,
        index: GameId,
        black: &Address,
        red: &Address,
        wager: u64,
        denom: &str,
    ) -> Self {
        Self::new(EventKind::NewGameCreated)
            .with_attribute(attr::CREATOR, creator)
            .with_attribute(attr::GAME_INDEX, index)
            .with_attribute(attr::BLACK, black)
            .with_attribute(attr::RED, red)
            .with_attribute(attr::WAGER, wager)
            .with_attribute(attr::DENOM, denom)
    }

    /// `board` is the board after the move.
    pub fn move_played(
        creator: &Address,
        index: GameId,
        captured: Option<Pos>,
        winner: Option<Color>,
        board: &str,
    ) -> Self {
        let (x, y) = captured.map_or((NO_CAPTURE, NO_CAPTURE), |p| {
            (i64::from(p.x), i64::from(p.y))
        });
        Self::new(EventKind::MovePlayed)
            .with_attribute(attr::CREATOR, creator)
            .with_attribute(attr::GAME_INDEX, index)
            .with_attribute(attr::CAPTURED_X, x)
            .with_attribute(attr::CAPTURED_Y, y)
            .with_attribute(attr::WINNER, winner_token(winner))
            .with_attribute(attr::BOARD, board)
    }

    /// `board` is the board before it is cleared.
    pub fn game_forfeited(index: GameId, winner: Option<Color>, board: &str) -> Self {
        Self::new(EventKind::GameForfeited)
            .with_attribute(attr::GAME_INDEX, index)
            .with_attribute(attr::WINNER, winner_token(winner))
            .with_attribute(attr::BOARD, board)
    }
}
