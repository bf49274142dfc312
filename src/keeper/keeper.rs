//! The keeper: owner of the store, bank and event sink.

use tracing::{info, warn};

use super::msgs::GenesisState;
use crate::core::{Address, CheckersError, GameId, KeeperConfig, Result};
use crate::escrow::Bank;
use crate::events::{EventSink, GameEvent};
use crate::fifo::ExpiryQueue;
use crate::game::{PlayerInfo, StoredGame, SystemInfo};
use crate::rules::{Checkers, RulesEngine};
use crate::store::{CacheStore, KvStore, Repository};

/// Game state machine over host-provided collaborators.
///
/// Every mutating operation runs inside `transact`: store writes go to a
/// `CacheStore` overlay and events are buffered, and both are released only
/// when the operation succeeds.
pub struct Keeper<S, B, E, R = Checkers> {
    pub(super) store: S,
    pub(super) bank: B,
    pub(super) events: E,
    pub(super) config: KeeperConfig,
    pub(super) rules: R,
}

/// Working set of one operation.
pub(super) struct Tx<'a, S: KvStore, B, R> {
    pub(super) config: &'a KeeperConfig,
    pub(super) rules: &'a R,
    pub(super) store: CacheStore<'a, S>,
    pub(super) bank: &'a mut B,
    pub(super) events: Vec<GameEvent>,
}

impl<S: KvStore, B: Bank, E: EventSink> Keeper<S, B, E> {
    /// Keeper with the classic checkers rules.
    pub fn new(store: S, bank: B, events: E, config: KeeperConfig) -> Self {
        Self::with_rules(store, bank, events, config, Checkers::new())
    }
}

impl<S: KvStore, B: Bank, E: EventSink, R: RulesEngine> Keeper<S, B, E, R> {
    pub fn with_rules(store: S, bank: B, events: E, config: KeeperConfig, rules: R) -> Self {
        Self {
            store,
            bank,
            events,
            config,
            rules,
        }
    }

    // === Accessors ===

    pub fn config(&self) -> &KeeperConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut B {
        &mut self.bank
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    pub fn into_parts(self) -> (S, B, E) {
        (self.store, self.bank, self.events)
    }

    // === Queries ===

    /// Load a game, failing if it does not exist.
    pub fn get_game(&self, id: GameId) -> Result<StoredGame> {
        self.store
            .get_game(id)?
            .ok_or(CheckersError::GameNotFound(id))
    }

    pub fn system_info(&self) -> Result<SystemInfo> {
        self.store.get_system_info()
    }

    pub fn player_info(&self, address: &Address) -> Result<PlayerInfo> {
        self.store.get_player_info(address)
    }

    // === Genesis ===

    /// Write the initial counters and any imported games.
    ///
    /// Imported games must have ids below `next_id` and queue links that
    /// form one well-formed list from head to tail.
    pub fn init_genesis(&mut self, genesis: &GenesisState) -> Result<()> {
        let mut previous: Option<GameId> = None;
        for game in &genesis.games {
            if game.index >= genesis.system_info.next_id {
                return Err(CheckersError::InvalidGenesis(format!(
                    "game {} is not below next id {}",
                    game.index, genesis.system_info.next_id
                )));
            }
            if previous.is_some_and(|p| p >= game.index) {
                return Err(CheckersError::InvalidGenesis(format!(
                    "game {} is out of order",
                    game.index
                )));
            }
            previous = Some(game.index);
        }

        self.transact(|tx| {
            for game in &genesis.games {
                tx.store.set_game(game)?;
            }
            let mut info = genesis.system_info;
            ExpiryQueue::new(&mut tx.store, &mut info).ids()?;
            tx.store.set_system_info(&info)?;
            Ok(())
        })?;
        info!(games = genesis.games.len(), "genesis initialised");
        Ok(())
    }

    /// Current counters and every stored game in id order.
    pub fn export_genesis(&self) -> Result<GenesisState> {
        let system_info = self.system_info()?;
        let mut games = Vec::new();
        let mut id = GameId::FIRST;
        while id < system_info.next_id {
            if let Some(game) = self.store.get_game(id)? {
                games.push(game);
            }
            id = id.next();
        }
        Ok(GenesisState { system_info, games })
    }

    // === Transactions ===

    /// Run `op` against an overlay; commit its writes and events on success.
    pub(super) fn transact<T>(
        &mut self,
        op: impl FnOnce(&mut Tx<'_, S, B, R>) -> Result<T>,
    ) -> Result<T> {
        let mut tx = Tx {
            config: &self.config,
            rules: &self.rules,
            store: CacheStore::new(&mut self.store),
            bank: &mut self.bank,
            events: Vec::new(),
        };

        match op(&mut tx) {
            Ok(value) => {
                let Tx { store, events, .. } = tx;
                store.commit();
                for event in events {
                    self.events.emit(event);
                }
                Ok(value)
            }
            Err(e) => {
                if e.is_fatal() {
                    warn!(error = %e, kind = ?e.kind(), "operation aborted");
                } else {
                    warn!(error = %e, "request rejected");
                }
                Err(e)
            }
        }
    }
}

impl<S: KvStore, B, R> Tx<'_, S, B, R> {
    /// Count a finished game for both players.
    pub(super) fn record_result(&mut self, game: &StoredGame) -> Result<()> {
        let Some(winner) = game.winner else {
            return Ok(());
        };
        let loser = winner.opponent();

        let mut won = self.store.get_player_info(game.player(winner))?;
        won.won_count += 1;
        self.store.set_player_info(&won)?;

        let mut lost = self.store.get_player_info(game.player(loser))?;
        if game.forfeited {
            lost.forfeited_count += 1;
        } else {
            lost.lost_count += 1;
        }
        self.store.set_player_info(&lost)
    }
}
