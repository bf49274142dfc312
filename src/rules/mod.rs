//! Move validation and application.
//!
//! `RulesEngine` is the seam the keeper calls through; `Checkers` is the
//! classic 8x8 implementation. The keeper never interprets board geometry
//! directly.

pub mod checkers;
pub mod engine;

pub use checkers::Checkers;
pub use engine::{Move, MoveError, MoveList, MoveOutcome, RulesEngine};
