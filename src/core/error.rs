//! Crate-level errors.
//!
//! Every failure falls into one of three kinds:
//! - **User**: bad move, wrong turn, unknown game, malformed request. Nothing
//!   was mutated and the caller may simply retry with a different request.
//! - **Invariant**: stored state is corrupt (unparsable board, missing system
//!   info, dangling queue link). The operation aborts with all writes discarded.
//! - **Collaborator**: the account subsystem refused a transfer. Also aborts
//!   the operation; expected to be transient and operator-actionable.

use crate::board::CodecError;
use crate::core::{Address, Color, GameId};
use crate::escrow::BankError;
use crate::rules::MoveError;
use crate::store::StoreKey;

/// Classification of a `CheckersError`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    User,
    Invariant,
    Collaborator,
}

/// Errors returned by keeper operations.
#[derive(Debug, thiserror::Error)]
pub enum CheckersError {
    #[error("{0}: game by id not found")]
    GameNotFound(GameId),

    #[error("message creator is not a player: {0}")]
    NotAPlayer(Address),

    #[error("player tried to play out of turn: {0}")]
    WrongTurn(Color),

    #[error("game is already finished")]
    GameFinished,

    #[error("wrong move: {0}")]
    WrongMove(#[from] MoveError),

    #[error("{role} address is invalid: {address:?}")]
    InvalidAddress { role: &'static str, address: Address },

    #[error("wager {0} is too large")]
    InvalidWager(u64),

    #[error("game cannot be parsed: {source}")]
    MalformedBoard {
        game: GameId,
        #[source]
        source: CodecError,
    },

    #[error("system info not found")]
    SystemInfoMissing,

    #[error("invalid genesis state: {0}")]
    InvalidGenesis(String),

    #[error("expiry queue references missing game {0}")]
    FifoCorrupted(GameId),

    #[error("stored record {key} cannot be decoded: {reason}")]
    CorruptRecord { key: StoreKey, reason: String },

    #[error("record {key} cannot be encoded: {reason}")]
    EncodeRecord { key: StoreKey, reason: String },

    #[error("game {0} has nothing in escrow to pay out")]
    NothingInEscrow(GameId),

    #[error("game {0} has no winner to pay")]
    NoWinner(GameId),

    #[error("game {0} cannot be refunded once both players have paid")]
    RefundNotAllowed(GameId),

    #[error("{color} cannot pay the wager: {source}")]
    EscrowCollectFailed {
        color: Color,
        #[source]
        source: BankError,
    },

    #[error("cannot pay winnings to winner: {source}")]
    EscrowPayFailed {
        #[source]
        source: BankError,
    },

    #[error("cannot refund wager: {source}")]
    EscrowRefundFailed {
        #[source]
        source: BankError,
    },
}

impl CheckersError {
    /// Which of the three failure kinds this is.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            CheckersError::GameNotFound(_)
            | CheckersError::NotAPlayer(_)
            | CheckersError::WrongTurn(_)
            | CheckersError::GameFinished
            | CheckersError::WrongMove(_)
            | CheckersError::InvalidAddress { .. }
            | CheckersError::InvalidWager(_) => ErrorKind::User,

            CheckersError::MalformedBoard { .. }
            | CheckersError::SystemInfoMissing
            | CheckersError::InvalidGenesis(_)
            | CheckersError::FifoCorrupted(_)
            | CheckersError::CorruptRecord { .. }
            | CheckersError::EncodeRecord { .. }
            | CheckersError::NothingInEscrow(_)
            | CheckersError::NoWinner(_)
            | CheckersError::RefundNotAllowed(_) => ErrorKind::Invariant,

            CheckersError::EscrowCollectFailed { .. }
            | CheckersError::EscrowPayFailed { .. }
            | CheckersError::EscrowRefundFailed { .. } => ErrorKind::Collaborator,
        }
    }

    /// Whether the failure indicates something other than a bad request.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.kind() != ErrorKind::User
    }
}

/// Result alias for keeper operations.
pub type Result<T, E = CheckersError> = std::result::Result<T, E>;
