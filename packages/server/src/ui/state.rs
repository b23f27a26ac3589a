//! Shared application state.

use std::sync::Arc;

use crate::{
    domain::{MessagePusher, PresenceRegistry, RoomRepository},
    usecase::{
        ApproveUserUseCase, CheckAdminUseCase, CloseRoomUseCase, ConnectUseCase,
        DisconnectUseCase, GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase,
        RejectUserUseCase, RoomBroadcaster, RoomLocks, SendMessageUseCase,
    },
};

/// Shared application state
///
/// Holds one instance of every use case. All room-mutating use cases share the
/// same `RoomLocks` and `RoomBroadcaster`.
pub struct AppState {
    /// ConnectUseCase（接続の確立）
    pub connect_usecase: ConnectUseCase,
    /// JoinRoomUseCase（入室）
    pub join_room_usecase: JoinRoomUseCase,
    /// ApproveUserUseCase（入室承認）
    pub approve_user_usecase: ApproveUserUseCase,
    /// RejectUserUseCase（入室拒否）
    pub reject_user_usecase: RejectUserUseCase,
    /// SendMessageUseCase（メッセージ送信）
    pub send_message_usecase: SendMessageUseCase,
    /// CloseRoomUseCase（Room の破棄）
    pub close_room_usecase: CloseRoomUseCase,
    /// DisconnectUseCase（切断）
    pub disconnect_usecase: DisconnectUseCase,
    /// CheckAdminUseCase（admin 判定）
    pub check_admin_usecase: CheckAdminUseCase,
    /// GetRoomsUseCase（Room 一覧取得）
    pub get_rooms_usecase: GetRoomsUseCase,
    /// GetRoomDetailUseCase（Room 詳細取得）
    pub get_room_detail_usecase: GetRoomDetailUseCase,
}

impl AppState {
    /// Wire every use case on top of the given infrastructure.
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        presence: Arc<dyn PresenceRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        let broadcaster = Arc::new(RoomBroadcaster::new(presence.clone(), message_pusher));
        let locks = RoomLocks::new();

        Self {
            connect_usecase: ConnectUseCase::new(broadcaster.clone()),
            join_room_usecase: JoinRoomUseCase::new(
                repository.clone(),
                presence.clone(),
                broadcaster.clone(),
                locks.clone(),
            ),
            approve_user_usecase: ApproveUserUseCase::new(
                repository.clone(),
                broadcaster.clone(),
                locks.clone(),
            ),
            reject_user_usecase: RejectUserUseCase::new(
                repository.clone(),
                broadcaster.clone(),
                locks.clone(),
            ),
            send_message_usecase: SendMessageUseCase::new(
                repository.clone(),
                broadcaster.clone(),
                locks.clone(),
            ),
            close_room_usecase: CloseRoomUseCase::new(
                repository.clone(),
                broadcaster.clone(),
                locks.clone(),
            ),
            disconnect_usecase: DisconnectUseCase::new(
                repository.clone(),
                presence,
                broadcaster,
                locks,
            ),
            check_admin_usecase: CheckAdminUseCase::new(repository.clone()),
            get_rooms_usecase: GetRoomsUseCase::new(repository.clone()),
            get_room_detail_usecase: GetRoomDetailUseCase::new(repository),
        }
    }
}
