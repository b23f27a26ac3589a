//! UseCase: 入室処理（join-room）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - Room の作成、承認済みユーザーの入室（履歴の再送・入室通知）、承認待ちへの遷移
//!
//! ### なぜこのテストが必要か
//! - 最初に入室したユーザーが admin になることを保証
//! - 履歴の再送が入室通知より先に、投稿順に届くことを保証
//! - join-request が admin だけに届き、Room には流れないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：Room 作成、承認待ち、承認済みユーザーの再入室
//! - エッジケース：admin がオフラインの間の入室リクエスト、別の Room への移動、
//!   同時に作成を試みる 2 人

use std::sync::Arc;

use crate::domain::{
    ChatMessage, ConnectionSession, JoinOutcome, MemberState, Notification, PresenceRegistry,
    RoomId, RoomRepository, Username,
};

use super::{broadcast::RoomBroadcaster, room_lock::RoomLocks};

/// 入室のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// Presence Registry（ユーザー名 → 接続）
    presence: Arc<dyn PresenceRegistry>,
    broadcaster: Arc<RoomBroadcaster>,
    locks: RoomLocks,
}

impl JoinRoomUseCase {
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

    /// 入室を実行
    ///
    /// # Returns
    ///
    /// * `MemberState::Approved` - Room を作成した、または承認済みとして入室した
    /// * `MemberState::Pending` - admin の承認待ち
    pub async fn execute(
        &self,
        session: &mut ConnectionSession,
        room_id: RoomId,
        username: Username,
    ) -> MemberState {
        let connection_id = session.id();

        // 1. 別のユーザー名で使われていた接続なら、以前のコンテキストを静かに外す
        if let Some(previous) = session.username().filter(|name| **name != username).cloned() {
            if let Some(previous_room) = session.leave_room() {
                self.broadcaster
                    .leave_group(&previous_room, connection_id)
                    .await;
            }
            self.presence.unregister(&previous, connection_id).await;
        }

        // 2. Presence を更新（後勝ち）
        self.presence.register(username.clone(), connection_id).await;
        session.identify(username.clone());

        // 3. Room 単位で直列化して入室
        let _guard = self.locks.acquire(&room_id).await;
        match self.repository.join(&room_id, &username).await {
            JoinOutcome::Created => {
                self.enter(session, &room_id).await;
                self.broadcaster
                    .broadcast(&room_id, Notification::joined(&username))
                    .await;
                MemberState::Approved
            }
            JoinOutcome::Approved {
                history,
                is_admin,
                pending,
            } => {
                self.enter(session, &room_id).await;
                self.replay(session, history).await;
                self.broadcaster
                    .broadcast(&room_id, Notification::joined(&username))
                    .await;
                if is_admin {
                    // admin が不在の間に溜まった入室リクエストを届け直す
                    for requester in pending {
                        self.broadcaster
                            .push_to(
                                connection_id,
                                Notification::JoinRequest {
                                    room_id: room_id.clone(),
                                    username: requester,
                                },
                            )
                            .await;
                    }
                }
                tracing::info!("'{}' entered room '{}'", username, room_id);
                MemberState::Approved
            }
            JoinOutcome::Pending { admin } => {
                let request = Notification::JoinRequest {
                    room_id: room_id.clone(),
                    username: username.clone(),
                };
                if self.broadcaster.notify(&admin, request).await {
                    tracing::info!("'{}' requested to join room '{}'", username, room_id);
                } else {
                    tracing::info!(
                        "'{}' requested to join room '{}', queued until admin '{}' returns",
                        username,
                        room_id,
                        admin
                    );
                }
                MemberState::Pending
            }
        }
    }

    /// セッションの Room を切り替え、配送グループに加える
    async fn enter(&self, session: &mut ConnectionSession, room_id: &RoomId) {
        let connection_id = session.id();
        if let Some(previous) = session.enter_room(room_id.clone())
            && previous != *room_id
        {
            self.broadcaster.leave_group(&previous, connection_id).await;
        }
        self.broadcaster.join_group(room_id, connection_id).await;
    }

    /// 履歴を投稿順に入室者だけへ再送
    async fn replay(&self, session: &ConnectionSession, history: Vec<ChatMessage>) {
        let count = history.len();
        for message in history {
            self.broadcaster
                .push_to(session.id(), Notification::from(message))
                .await;
        }
        tracing::debug!("Replayed {} message(s) to connection {}", count, session.id());
    }
}
