//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectUseCase::execute() メソッド
//! - admin の切断による Room の破棄、一般メンバーの退室通知、古い接続の切断
//!
//! ### なぜこのテストが必要か
//! - admin の切断が close-room と同じ結果になることを保証
//! - 一般メンバーの承認は切断後も残ることを保証
//! - 再接続したユーザーの Presence を古い接続の切断が消さないことを保証
//! - 別の Room に居る同じユーザーの接続が、この Room の後始末を妨げないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：admin の切断、一般メンバーの切断
//! - エッジケース：再接続済みユーザーの古い接続の切断、入室前の切断、
//!   同じ id で作り直された Room に対する古いセッションの切断

use std::sync::Arc;

use crate::domain::{
    ConnectionSession, Notification, PresenceRegistry, RoomId, RoomRepository, Username,
};

use super::{broadcast::RoomBroadcaster, close_room::close_room, room_lock::RoomLocks};

/// 切断処理の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectOutcome {
    /// 一般メンバーが退室し、Room に通知した
    Left,
    /// admin が切断したため Room を破棄した
    ClosedRoom,
    /// Room に影響しない切断（入室前・古い接続など）
    Detached,
}

/// 切断のユースケース
pub struct DisconnectUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    presence: Arc<dyn PresenceRegistry>,
    broadcaster: Arc<RoomBroadcaster>,
    locks: RoomLocks,
}

impl DisconnectUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        presence: Arc<dyn PresenceRegistry>,
        broadcaster: Arc<RoomBroadcaster>,
        locks: RoomLocks,
    ) -> Self {
        Self {
            repository,
            presence,
            broadcaster,
            locks,
        }
    }

    /// 切断を実行
    ///
    /// Room のメンバーシップ（承認済み・承認待ち）は変更しない。
    pub async fn execute(&self, session: ConnectionSession) -> DisconnectOutcome {
        let connection_id = session.id();

        // 1. Presence から外す（現在の接続の場合のみ）
        if let Some(username) = session.username() {
            self.presence.unregister(username, connection_id).await;
        }

        // 2. Room への影響
        let outcome = match session.context() {
            Some((username, room_id)) => {
                let _guard = self.locks.acquire(room_id).await;
                let was_in_group = self.broadcaster.leave_group(room_id, connection_id).await;

                if !was_in_group || self.is_superseded(username, room_id).await {
                    DisconnectOutcome::Detached
                } else if self.repository.is_admin(room_id, username).await {
                    close_room(self.repository.as_ref(), &self.broadcaster, room_id).await;
                    DisconnectOutcome::ClosedRoom
                } else {
                    self.broadcaster
                        .broadcast(room_id, Notification::left(username))
                        .await;
                    tracing::info!("'{}' left room '{}'", username, room_id);
                    DisconnectOutcome::Left
                }
            }
            None => DisconnectOutcome::Detached,
        };

        // 3. 送信チャンネルを破棄
        self.broadcaster.unregister_connection(connection_id).await;
        outcome
    }

    /// ユーザーの現在の接続が同じ Room にまだ居る場合は true
    async fn is_superseded(&self, username: &Username, room_id: &RoomId) -> bool {
        match self.presence.lookup(username).await {
            Some(current) => self.broadcaster.in_group(room_id, current).await,
            None => false,
        }
    }
}
