//! Game identification.
//!
//! Game ids are allocated from the `next_id` counter in `SystemInfo` and are
//! strictly increasing. They render as plain decimal strings, which is the
//! form used in events and requests.
//!
//! ```
//! use checkers_ledger::core::GameId;
//!
//! let id: GameId = "12".parse().unwrap();
//! assert_eq!(id, GameId::new(12));
//! assert_eq!(id.to_string(), "12");
//! assert_eq!(id.next(), GameId::new(13));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier of a stored game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl GameId {
    /// The first id handed out after genesis.
    pub const FIRST: GameId = GameId(1);

    /// Create a new game ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// The id following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u64> for GameId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error parsing a game id from text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid game index: {0:?}")]
pub struct ParseGameIdError(pub String);

impl std::str::FromStr for GameId {
    type Err = ParseGameIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(GameId)
            .map_err(|_| ParseGameIdError(s.to_string()))
    }
}
