//! Process-wide counters.

use serde::{Deserialize, Serialize};

use crate::core::GameId;

/// The singleton record under `StoreKey::SystemInfo`.
///
/// Holds the next id to allocate and both ends of the expiry queue. Mutated
/// only by game creation, move application and the expiry sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub next_id: GameId,
    pub fifo_head: Option<GameId>,
    pub fifo_tail: Option<GameId>,
}

impl SystemInfo {
    /// The state written at genesis.
    #[must_use]
    pub const fn genesis() -> Self {
        Self {
            next_id: GameId::FIRST,
            fifo_head: None,
            fifo_tail: None,
        }
    }

    /// Take the next game id and advance the counter.
    pub fn allocate_id(&mut self) -> GameId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self::genesis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_id() {
        let mut info = SystemInfo::genesis();
        assert_eq!(info.allocate_id(), GameId::new(1));
        assert_eq!(info.allocate_id(), GameId::new(2));
        assert_eq!(info.next_id, GameId::new(3));
        assert_eq!(info.fifo_head, None);
    }
}
