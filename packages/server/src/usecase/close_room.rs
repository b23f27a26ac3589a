//! UseCase: Room の破棄（close-room）
//!
//! admin の明示的な close-room と、admin の切断の両方で同じ破棄処理を使う。

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionSession, Notification, RoomId, RoomRepository};

use super::{
    authorization::ensure_admin, broadcast::RoomBroadcaster, error::AdmissionError,
    room_lock::RoomLocks,
};

/// Room 破棄のユースケース
pub struct CloseRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    broadcaster: Arc<RoomBroadcaster>,
    locks: RoomLocks,
}

impl CloseRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        broadcaster: Arc<RoomBroadcaster>,
        locks: RoomLocks,
    ) -> Self {
        Self {
            repository,
            broadcaster,
            locks,
        }
    }

    /// Room を破棄し、配送グループに残っていた接続数を返す
    pub async fn execute(
        &self,
        session: &mut ConnectionSession,
        room_id: RoomId,
    ) -> Result<usize, AdmissionError> {
        let caller = session
            .username()
            .cloned()
            .ok_or(AdmissionError::NotJoined)?;

        let members = {
            let _guard = self.locks.acquire(&room_id).await;
            ensure_admin(self.repository.as_ref(), &room_id, &caller).await?;
            close_room(self.repository.as_ref(), &self.broadcaster, &room_id).await
        };

        if session.room_id() == Some(&room_id) {
            session.leave_room();
        }
        Ok(members.len())
    }
}

/// 破棄の通知を流し、Room と配送グループを消す
///
/// 呼び出し側が Room のロックを保持していること。
pub(super) async fn close_room(
    repository: &dyn RoomRepository,
    broadcaster: &RoomBroadcaster,
    room_id: &RoomId,
) -> Vec<ConnectionId> {
    broadcaster
        .broadcast(room_id, Notification::closed(room_id))
        .await;
    broadcaster
        .broadcast(room_id, Notification::RoomClosed)
        .await;
    repository.destroy(room_id).await;
    let members = broadcaster.dissolve(room_id).await;
    tracing::info!(
        "Room '{}' closed, {} connection(s) released",
        room_id,
        members.len()
    );
    members
}
