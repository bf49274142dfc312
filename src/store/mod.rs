//! Keyed byte storage for games and system info.
//!
//! `KvStore` is the raw interface a host provides. `Repository` layers typed
//! access on top of it with bincode records. `CacheStore` buffers writes over
//! a parent store so an operation's writes land all together or not at all.
//!
//! ## Keys
//!
//! | Key | Record |
//! |-----|--------|
//! | `StoreKey::SystemInfo` | `SystemInfo` |
//! | `StoreKey::Game(id)` | `StoredGame` |
//! | `StoreKey::Player(address)` | `PlayerInfo` |

pub mod cache;
pub mod memory;

pub use cache::CacheStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{Address, CheckersError, GameId, Result};
use crate::game::{PlayerInfo, StoredGame, SystemInfo};

/// Address of a record in the store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StoreKey {
    SystemInfo,
    Game(GameId),
    Player(Address),
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKey::SystemInfo => write!(f, "system-info"),
            StoreKey::Game(id) => write!(f, "game/{id}"),
            StoreKey::Player(address) => write!(f, "player/{address}"),
        }
    }
}

/// Raw key-value storage.
pub trait KvStore {
    fn get(&self, key: &StoreKey) -> Option<Vec<u8>>;

    fn set(&mut self, key: StoreKey, value: Vec<u8>);

    fn delete(&mut self, key: &StoreKey);

    fn contains(&self, key: &StoreKey) -> bool {
        self.get(key).is_some()
    }
}

impl<S: KvStore + ?Sized> KvStore for &mut S {
    fn get(&self, key: &StoreKey) -> Option<Vec<u8>> {
        (**self).get(key)
    }

    fn set(&mut self, key: StoreKey, value: Vec<u8>) {
        (**self).set(key, value);
    }

    fn delete(&mut self, key: &StoreKey) {
        (**self).delete(key);
    }
}

/// Typed record access over any `KvStore`.
pub trait Repository: KvStore {
    /// Load and decode a record. Undecodable bytes are an invariant failure.
    fn load<T: DeserializeOwned>(&self, key: &StoreKey) -> Result<Option<T>> {
        self.get(key)
            .map(|bytes| {
                bincode::deserialize(&bytes).map_err(|e| CheckersError::CorruptRecord {
                    key: key.clone(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    fn save<T: Serialize>(&mut self, key: StoreKey, value: &T) -> Result<()> {
        let bytes = bincode::serialize(value).map_err(|e| CheckersError::EncodeRecord {
            key: key.clone(),
            reason: e.to_string(),
        })?;
        self.set(key, bytes);
        Ok(())
    }

    fn get_game(&self, id: GameId) -> Result<Option<StoredGame>> {
        self.load(&StoreKey::Game(id))
    }

    fn set_game(&mut self, game: &StoredGame) -> Result<()> {
        self.save(StoreKey::Game(game.index), game)
    }

    fn remove_game(&mut self, id: GameId) {
        self.delete(&StoreKey::Game(id));
    }

    /// The singleton counters. Absent before genesis.
    fn get_system_info(&self) -> Result<SystemInfo> {
        self.load(&StoreKey::SystemInfo)?
            .ok_or(CheckersError::SystemInfoMissing)
    }

    fn set_system_info(&mut self, info: &SystemInfo) -> Result<()> {
        self.save(StoreKey::SystemInfo, info)
    }

    /// Statistics for an address; zeroed if it never finished a game.
    fn get_player_info(&self, address: &Address) -> Result<PlayerInfo> {
        Ok(self
            .load(&StoreKey::Player(address.clone()))?
            .unwrap_or_else(|| PlayerInfo::new(address.clone())))
    }

    fn set_player_info(&mut self, info: &PlayerInfo) -> Result<()> {
        self.save(StoreKey::Player(info.address.clone()), info)
    }
}

impl<S: KvStore + ?Sized> Repository for S {}
