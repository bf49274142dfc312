//! Notifications emitted on game creation, moves and forfeiture.

pub mod event;
pub mod sink;

pub use event::{attr, EventKind, GameEvent, NO_CAPTURE};
pub use sink::{EventLog, EventSink};
