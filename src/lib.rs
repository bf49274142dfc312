//! # checkers-ledger
//!
//! A deterministic checkers engine for replicated ledgers: rules, per-game
//! state machine, wager escrow and a once-per-block expiry sweep.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: No clocks, no randomness, no hash-order iteration in
//!    any state transition. The host supplies `now`; every replica computes
//!    the same result.
//!
//! 2. **Host Collaborators**: Storage (`KvStore`), token transfers (`Bank`)
//!    and notifications (`EventSink`) are traits. In-memory implementations
//!    ship with the crate.
//!
//! 3. **All or Nothing**: Each operation writes through a `CacheStore`
//!    overlay and buffers its events; a failure leaves no trace.
//!
//! ## Architecture
//!
//! - **Expiry Queue**: A doubly-linked list threaded through the stored games,
//!   ordered by deadline. The sweep only inspects the head, so its cost is
//!   proportional to the number of expired games.
//!
//! - **Persistent Data Structures**: `im` maps back the in-memory store, so
//!   snapshots for tests and replays are O(1).
//!
//! ## Modules
//!
//! - `core`: Colors, coordinates, ids, time, addresses, configuration, errors
//! - `board`: Board representation and its text encoding
//! - `rules`: `RulesEngine` trait and the classic checkers rules
//! - `game`: Persisted records
//! - `store`: Key-value storage, typed repository, write overlay
//! - `fifo`: The expiry queue
//! - `escrow`: Bank interface and wager transfer decisions
//! - `events`: Notifications and sinks
//! - `keeper`: The game state machine and expiry sweep

pub mod core;
pub mod board;
pub mod rules;
pub mod game;
pub mod store;
pub mod fifo;
pub mod escrow;
pub mod events;
pub mod keeper;

// Re-export commonly used types
pub use crate::core::{
    Address, Color, ColorMap, GameId, Pos, Timestamp,
    KeeperConfig, CheckersError, ErrorKind, Result,
};

pub use crate::board::{Board, Piece, CodecError, OPENING_BOARD};

pub use crate::rules::{RulesEngine, Checkers, Move, MoveError, MoveOutcome};

pub use crate::game::{GameStatus, PlayerInfo, StoredGame, SystemInfo};

pub use crate::store::{KvStore, Repository, StoreKey, MemoryStore, CacheStore};

pub use crate::fifo::ExpiryQueue;

pub use crate::escrow::{Bank, BankError, Coin, MemoryBank};

pub use crate::events::{EventKind, EventLog, EventSink, GameEvent};

pub use crate::keeper::{
    Keeper,
    CreateGame, CreateGameResponse,
    PlayMove, PlayMoveResponse,
    CanPlayMove, CanPlayMoveResponse,
    GenesisState, SweepReport,
};
