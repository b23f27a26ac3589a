//! Domain layer for the room chat server.
//!
//! This module contains the room/membership model and the interfaces
//! (`RoomRepository`, `PresenceRegistry`, `MessagePusher`) that the
//! infrastructure layer implements.

pub mod entity;
pub mod error;
pub mod membership;
pub mod message_log;
pub mod notification;
pub mod presence;
pub mod pusher;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, ConnectionSession, Room};
pub use error::{MessagePushError, RoomError, ValueObjectError};
pub use membership::{JoinOutcome, MemberState, MembershipAction};
pub use message_log::MessageLog;
pub use notification::{Notification, SYSTEM_SENDER, Sender};
pub use presence::PresenceRegistry;
pub use pusher::{MessagePusher, PusherChannel};
pub use repository::RoomRepository;
pub use value_object::{ConnectionId, MessageBody, RoomId, Timestamp, Username};

#[cfg(test)]
pub use presence::MockPresenceRegistry;
#[cfg(test)]
pub use pusher::MockMessagePusher;
