//! The game state machine.
//!
//! `Keeper` ties the rules engine, expiry queue and escrow together over a
//! host's store, bank and event sink:
//!
//! - `create_game`: allocate an id, store the opening board, queue the game
//! - `play_move`: validate and apply a move, collect or pay wagers
//! - `forfeit_expired_games`: the once-per-block sweep
//! - `can_play_move`: read-only pre-flight check
//!
//! The host supplies `now` to every mutating call; the keeper never reads a
//! clock.

mod create;
#[allow(clippy::module_inception)]
mod keeper;
pub mod msgs;
mod play;
mod query;
mod sweep;

pub use keeper::Keeper;
pub use msgs::{
    CanPlayMove, CanPlayMoveResponse, CreateGame, CreateGameResponse, GenesisState, PlayMove,
    PlayMoveResponse, SweepReport, REASON_OK,
};
