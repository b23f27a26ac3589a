//! UseCase: 入室拒否（reject-user）

use std::sync::Arc;

use crate::domain::{ConnectionSession, Notification, RoomId, RoomRepository, Username};

use super::{
    authorization::ensure_admin, broadcast::RoomBroadcaster, error::AdmissionError,
    room_lock::RoomLocks,
};

/// 入室拒否のユースケース
///
/// 拒否は恒久的ではない。拒否されたユーザーは再び join-room を送れば承認待ちに戻る。
pub struct RejectUserUseCase {
    repository: Arc<dyn RoomRepository>,
    broadcaster: Arc<RoomBroadcaster>,
    locks: RoomLocks,
}

impl RejectUserUseCase {
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

    /// 拒否を実行。`rejected` がユーザーに届いたかどうかを返す
    pub async fn execute(
        &self,
        session: &ConnectionSession,
        room_id: RoomId,
        username: Username,
    ) -> Result<bool, AdmissionError> {
        let caller = session.username().ok_or(AdmissionError::NotJoined)?;

        let _guard = self.locks.acquire(&room_id).await;
        ensure_admin(self.repository.as_ref(), &room_id, caller).await?;
        self.repository.reject(&room_id, &username).await?;
        tracing::info!("'{}' rejected '{}' in room '{}'", caller, username, room_id);

        Ok(self
            .broadcaster
            .notify(&username, Notification::Rejected)
            .await)
    }
}
