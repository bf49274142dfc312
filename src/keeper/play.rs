//! Move application.

use tracing::{debug, info, instrument};

use super::keeper::Keeper;
use super::msgs::{PlayMove, PlayMoveResponse};
use crate::board;
use crate::core::{CheckersError, Result, Timestamp};
use crate::escrow::{self, Bank};
use crate::events::{EventSink, GameEvent};
use crate::fifo::ExpiryQueue;
use crate::rules::RulesEngine;
use crate::store::{KvStore, Repository};

impl<S: KvStore, B: Bank, E: EventSink, R: RulesEngine> Keeper<S, B, E, R> {
    /// Validate and apply one move.
    ///
    /// ## Checks, in order
    ///
    /// 1. The game exists and has no winner
    /// 2. The stored board decodes
    /// 3. The creator plays black or red, and that color is on turn
    /// 4. The rules engine accepts the move
    ///
    /// On success the deadline is refreshed and the game moves to the queue
    /// tail, or leaves the queue if the move won it. Wager transfers are the
    /// last step, so a bank failure discards every write.
    #[instrument(skip_all, fields(game = %msg.game_index, creator = %msg.creator))]
    pub fn play_move(&mut self, now: Timestamp, msg: PlayMove) -> Result<PlayMoveResponse> {
        self.transact(|tx| {
            let mut game = tx
                .store
                .get_game(msg.game_index)?
                .ok_or(CheckersError::GameNotFound(msg.game_index))?;
            let mut system = tx.store.get_system_info()?;

            if game.winner.is_some() {
                return Err(CheckersError::GameFinished);
            }
            let board = game
                .parse_board()
                .map_err(|source| CheckersError::MalformedBoard {
                    game: game.index,
                    source,
                })?;

            let color = game
                .color_of(&msg.creator)
                .ok_or_else(|| CheckersError::NotAPlayer(msg.creator.clone()))?;
            if color != game.turn {
                return Err(CheckersError::WrongTurn(color));
            }
            let (from, to) = msg.positions()?;
            let outcome = tx.rules.apply_move(&board, color, from, to, game.chain)?;

            let before = game.clone();
            game.board = board::encode(&outcome.board);
            game.turn = outcome.next_turn;
            game.chain = outcome.must_continue.then_some(to);
            game.winner = outcome.winner;
            game.move_count += 1;
            game.deadline = now.saturating_add(tx.config.turn_duration());

            let mut queue = ExpiryQueue::new(&mut tx.store, &mut system);
            if game.winner.is_some() {
                queue.remove(&mut game)?;
            } else {
                queue.append(&mut game)?;
            }
            tx.store.set_game(&game)?;
            tx.store.set_system_info(&system)?;
            tx.record_result(&game)?;

            escrow::collect_wager(&mut *tx.bank, &before)?;
            if game.winner.is_some() {
                escrow::pay_winner(&mut *tx.bank, &game)?;
            }

            tx.events.push(GameEvent::move_played(
                &msg.creator,
                game.index,
                outcome.captured,
                game.winner,
                &game.board,
            ));
            match game.winner {
                Some(winner) => info!(%winner, moves = game.move_count, "game concluded"),
                None => debug!(%color, %from, %to, moves = game.move_count, "move played"),
            }

            Ok(PlayMoveResponse {
                captured: outcome.captured,
                winner: game.winner,
            })
        })
    }
}
