//! UseCase 層
//!
//! プロトコルの操作ごとに 1 つのユースケースを置く。Room を変更する操作は
//! `RoomLocks` で Room 単位に直列化し、通知は `RoomBroadcaster` 経由で送る。

mod approve_user;
mod authorization;
mod broadcast;
mod check_admin;
mod close_room;
mod connect;
mod disconnect;
mod error;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod reject_user;
mod room_lock;
mod send_message;
#[cfg(test)]
mod test_support;

pub use approve_user::ApproveUserUseCase;
pub use broadcast::RoomBroadcaster;
pub use check_admin::CheckAdminUseCase;
pub use close_room::CloseRoomUseCase;
pub use connect::ConnectUseCase;
pub use disconnect::{DisconnectOutcome, DisconnectUseCase};
pub use error::{AdmissionError, GetRoomDetailError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use reject_user::RejectUserUseCase;
pub use room_lock::{RoomGuard, RoomLocks};
pub use send_message::SendMessageUseCase;
