//! Core engine types: colors, coordinates, ids, time, addresses, configuration
//! and errors.
//!
//! These are the vocabulary shared by the board, rules, queue, escrow and
//! keeper modules.

pub mod address;
pub mod color;
pub mod config;
pub mod error;
pub mod game_id;
pub mod pos;
pub mod time;

pub use address::Address;
pub use color::{winner_token, Color, ColorMap};
pub use config::KeeperConfig;
pub use error::{CheckersError, ErrorKind, Result};
pub use game_id::{GameId, ParseGameIdError};
pub use pos::{Pos, BOARD_SIZE};
pub use time::Timestamp;
