//! Persisted records: per-game state, per-player results and the system
//! counters.

pub mod player_info;
pub mod stored;
pub mod system_info;

pub use player_info::PlayerInfo;
pub use stored::{GameStatus, StoredGame};
pub use system_info::SystemInfo;
