//! Game creation.

use tracing::{info, instrument};

use super::keeper::Keeper;
use super::msgs::{CreateGame, CreateGameResponse};
use crate::core::{Address, CheckersError, Result, Timestamp};
use crate::escrow::Bank;
use crate::events::{EventSink, GameEvent};
use crate::fifo::ExpiryQueue;
use crate::game::StoredGame;
use crate::rules::RulesEngine;
use crate::store::{KvStore, Repository};

impl<S: KvStore, B: Bank, E: EventSink, R: RulesEngine> Keeper<S, B, E, R> {
    /// Start a game on the opening board with black to move.
    ///
    /// The game is appended to the expiry queue with a deadline one turn
    /// duration after `now`. No funds move until the first move.
    #[instrument(skip_all, fields(creator = %msg.creator))]
    pub fn create_game(&mut self, now: Timestamp, msg: CreateGame) -> Result<CreateGameResponse> {
        check_address("creator", &msg.creator)?;
        check_address("black", &msg.black)?;
        check_address("red", &msg.red)?;
        if msg.wager.checked_mul(2).is_none() {
            return Err(CheckersError::InvalidWager(msg.wager));
        }

        let denom = if msg.denom.is_empty() {
            self.config.default_denom.clone()
        } else {
            msg.denom
        };
        self.transact(|tx| {
            let deadline = now.saturating_add(tx.config.turn_duration());
            let mut system = tx.store.get_system_info()?;
            let index = system.allocate_id();
            let mut game = StoredGame::new(index, msg.black, msg.red, msg.wager, denom, deadline);

            ExpiryQueue::new(&mut tx.store, &mut system).append(&mut game)?;
            tx.store.set_game(&game)?;
            tx.store.set_system_info(&system)?;

            tx.events.push(GameEvent::game_created(
                &msg.creator,
                index,
                &game.black,
                &game.red,
                game.wager,
                &game.denom,
            ));
            info!(game = %index, black = %game.black, red = %game.red, wager = game.wager, "game created");
            Ok(CreateGameResponse { game_index: index })
        })
    }
}

fn check_address(role: &'static str, address: &Address) -> Result<()> {
    if address.is_valid() {
        Ok(())
    } else {
        Err(CheckersError::InvalidAddress {
            role,
            address: address.clone(),
        })
    }
}
