//! Board representation and its persisted text form.
//!
//! - `Piece`: side plus king flag
//! - `Board`: fixed 8x8 grid
//! - `codec`: exact text encoding used in storage and events

#[allow(clippy::module_inception)]
pub mod board;
pub mod codec;
pub mod piece;

pub use board::Board;
pub use codec::{decode, encode, CodecError, OPENING_BOARD};
pub use piece::Piece;
