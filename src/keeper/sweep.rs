//! Per-block expiry sweep.

use tracing::{debug, info, instrument};

use super::keeper::Keeper;
use super::msgs::SweepReport;
use crate::core::{GameId, Result, Timestamp};
use crate::escrow::{self, Bank};
use crate::events::{EventSink, GameEvent};
use crate::fifo::ExpiryQueue;
use crate::rules::RulesEngine;
use crate::store::{KvStore, Repository};

/// What happened to one drained game.
enum Drained {
    Abandoned(GameId),
    Forfeited(GameId),
}

impl<S: KvStore, B: Bank, E: EventSink, R: RulesEngine> Keeper<S, B, E, R> {
    /// Drain every game whose deadline is at or before `now` from the head of
    /// the expiry queue.
    ///
    /// - At most one move played: the game is deleted and a single payer is
    ///   refunded
    /// - Two or more moves: the side not on turn wins, the pot is paid out,
    ///   and the game is kept with its board cleared
    ///
    /// One `game-forfeited` event is emitted per drained game, in queue order,
    /// carrying the board as it was before clearing. A second call with the
    /// same `now` finds nothing to do.
    ///
    /// Each game is drained in its own transaction, so its store writes and
    /// events commit together with its transfer. On error the games drained
    /// before the failing one stay drained and the failing game stays at the
    /// head of the queue for the next sweep.
    #[instrument(skip(self))]
    pub fn forfeit_expired_games(&mut self, now: Timestamp) -> Result<SweepReport> {
        let mut report = SweepReport::default();

        while let Some(drained) = self.drain_head(now)? {
            match drained {
                Drained::Abandoned(id) => report.abandoned.push(id),
                Drained::Forfeited(id) => report.forfeited.push(id),
            }
        }

        if !report.is_empty() {
            debug!(
                forfeited = report.forfeited.len(),
                abandoned = report.abandoned.len(),
                "expired games swept"
            );
        }
        Ok(report)
    }

    /// Settle the queue head if it has expired.
    fn drain_head(&mut self, now: Timestamp) -> Result<Option<Drained>> {
        self.transact(|tx| {
            let mut system = tx.store.get_system_info()?;
            let mut queue = ExpiryQueue::new(&mut tx.store, &mut system);
            let Some(mut game) = queue.head_game()? else {
                return Ok(None);
            };
            if game.deadline > now {
                return Ok(None);
            }
            queue.remove(&mut game)?;
            let last_board = std::mem::take(&mut game.board);

            let drained = if game.move_count <= 1 {
                tx.store.remove_game(game.index);
                tx.store.set_system_info(&system)?;
                escrow::refund_wager(&mut *tx.bank, &game)?;
                info!(game = %game.index, moves = game.move_count, "game abandoned");
                Drained::Abandoned(game.index)
            } else {
                let winner = game.turn.opponent();
                game.winner = Some(winner);
                game.forfeited = true;
                game.chain = None;
                tx.store.set_game(&game)?;
                tx.store.set_system_info(&system)?;
                tx.record_result(&game)?;
                escrow::pay_winner(&mut *tx.bank, &game)?;
                info!(game = %game.index, %winner, "game forfeited");
                Drained::Forfeited(game.index)
            };

            tx.events
                .push(GameEvent::game_forfeited(game.index, game.winner, &last_board));
            Ok(Some(drained))
        })
    }
}
