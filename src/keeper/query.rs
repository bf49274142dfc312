//! Read-only move check.

use super::keeper::Keeper;
use super::msgs::{CanPlayMove, CanPlayMoveResponse};
use crate::core::{CheckersError, Result};
use crate::escrow::Bank;
use crate::events::EventSink;
use crate::rules::RulesEngine;
use crate::store::KvStore;

impl<S: KvStore, B: Bank, E: EventSink, R: RulesEngine> Keeper<S, B, E, R> {
    /// Answer whether `query.player` could play the move now, without
    /// changing anything.
    ///
    /// Rejections a player could act on come back as `possible: false` with
    /// the same message `play_move` would fail with. A missing game or a
    /// corrupt stored board is an error.
    pub fn can_play_move(&self, query: &CanPlayMove) -> Result<CanPlayMoveResponse> {
        let game = self.get_game(query.game_index)?;

        if game.winner.is_some() {
            return Ok(CanPlayMoveResponse::rejected(&CheckersError::GameFinished));
        }
        if query.player != game.turn {
            return Ok(CanPlayMoveResponse::rejected(&CheckersError::WrongTurn(
                query.player,
            )));
        }

        let board = game
            .parse_board()
            .map_err(|source| CheckersError::MalformedBoard {
                game: game.index,
                source,
            })?;
        let checked = query.positions().and_then(|(from, to)| {
            self.rules
                .apply_move(&board, query.player, from, to, game.chain)
        });

        Ok(match checked {
            Ok(_) => CanPlayMoveResponse::ok(),
            Err(e) => CanPlayMoveResponse::rejected(&CheckersError::WrongMove(e)),
        })
    }
}
