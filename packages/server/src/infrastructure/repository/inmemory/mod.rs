//! インメモリ実装

pub mod presence;
pub mod room;

pub use presence::InMemoryPresenceRegistry;
pub use room::{DEFAULT_HISTORY_LIMIT, InMemoryRoomRepository};
