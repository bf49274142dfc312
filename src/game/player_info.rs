//! Per-address results.

use serde::{Deserialize, Serialize};

use crate::core::Address;

/// Finished-game counts for one address, stored under `StoreKey::Player`.
///
/// A concluded game counts a win for the winner and a loss for the other
/// player; a forfeit counts a win and a forfeit instead. Abandoned games are
/// not counted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub address: Address,
    pub won_count: u64,
    pub lost_count: u64,
    pub forfeited_count: u64,
}

impl PlayerInfo {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            won_count: 0,
            lost_count: 0,
            forfeited_count: 0,
        }
    }

    #[must_use]
    pub fn games_finished(&self) -> u64 {
        self.won_count + self.lost_count + self.forfeited_count
    }
}
