//! UseCase: 入室承認（approve-user）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ApproveUserUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 承認の通知が承認されたユーザーにだけ届き、Room には流れないことを保証
//! - admin 以外による承認を拒否することを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：admin による承認
//! - 異常系：admin 以外による承認、承認待ちでないユーザーの承認、存在しない Room

use std::sync::Arc;

use crate::domain::{ConnectionSession, Notification, RoomId, RoomRepository, Username};

use super::{
    authorization::ensure_admin, broadcast::RoomBroadcaster, error::AdmissionError,
    room_lock::RoomLocks,
};

/// 入室承認のユースケース
pub struct ApproveUserUseCase {
    repository: Arc<dyn RoomRepository>,
    broadcaster: Arc<RoomBroadcaster>,
    locks: RoomLocks,
}

impl ApproveUserUseCase {
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

    /// 承認を実行
    ///
    /// # Returns
    ///
    /// * `Ok(bool)` - 承認した。`approved` がユーザーに届いたかどうか
    /// * `Err(AdmissionError)` - 呼び出し元が admin ではない、または承認待ちではない
    pub async fn execute(
        &self,
        session: &ConnectionSession,
        room_id: RoomId,
        username: Username,
    ) -> Result<bool, AdmissionError> {
        let caller = session.username().ok_or(AdmissionError::NotJoined)?;

        let _guard = self.locks.acquire(&room_id).await;
        ensure_admin(self.repository.as_ref(), &room_id, caller).await?;
        self.repository.approve(&room_id, &username).await?;
        tracing::info!("'{}' approved '{}' in room '{}'", caller, username, room_id);

        let delivered = self
            .broadcaster
            .notify(&username, Notification::Approved { room_id })
            .await;
        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionId, MemberState, MockMessagePusher, MockPresenceRegistry},
        infrastructure::repository::InMemoryRoomRepository,
        usecase::test_support::{Harness, TEST_HISTORY_LIMIT, room_id, username},
    };
    use genkan_shared::time::FixedClock;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_approve_notifies_only_target() {
        // テスト項目: approved は承認されたユーザーの接続にだけ送られ、ブロードキャストされない
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new(
            Arc::new(FixedClock::new(0)),
            TEST_HISTORY_LIMIT,
        ));
        repository.join(&room_id("R"), &username("alice")).await;
        repository.join(&room_id("R"), &username("bob")).await;

        let bob_connection = ConnectionId::generate();
        let mut presence = MockPresenceRegistry::new();
        presence
            .expect_lookup()
            .with(eq(username("bob")))
            .times(1)
            .returning(move |_| Some(bob_connection));
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .withf(move |id, notification| {
                *id == bob_connection
                    && *notification
                        == Notification::Approved {
                            room_id: room_id("R"),
                        }
            })
            .times(1)
            .returning(|_, _| Ok(()));
        pusher.expect_broadcast().never();

        let broadcaster = Arc::new(RoomBroadcaster::new(Arc::new(presence), Arc::new(pusher)));
        let usecase = ApproveUserUseCase::new(repository.clone(), broadcaster, RoomLocks::new());
        let mut alice = ConnectionSession::new(ConnectionId::generate());
        alice.identify(username("alice"));

        // when (操作):
        let result = usecase
            .execute(&alice, room_id("R"), username("bob"))
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(true));
        let room = repository.find(&room_id("R")).await.unwrap();
        assert_eq!(room.state_of(&username("bob")), MemberState::Approved);
        assert!(room.pending_users().is_empty());
    }

    #[tokio::test]
    async fn test_non_admin_cannot_approve() {
        // テスト項目: admin 以外の承認は Unauthorized で、状態は変わらない
        // given (前提条件):
        let harness = Harness::new();
        let _alice = harness.join("R", "alice").await;
        let mut bob = harness.join("R", "bob").await;
        let mallory = harness.join("R", "mallory").await;

        // when (操作):
        let result = harness
            .approve
            .execute(&mallory.session, room_id("R"), username("bob"))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(AdmissionError::Unauthorized {
                room_id: "R".to_string(),
                caller: "mallory".to_string(),
            })
        );
        let room = harness.repository.find(&room_id("R")).await.unwrap();
        assert_eq!(room.state_of(&username("bob")), MemberState::Pending);
        assert!(bob.drain().is_empty());
    }

    #[tokio::test]
    async fn test_approve_requires_pending_request() {
        // テスト項目: 承認待ちではないユーザーの承認は NotPending
        // given (前提条件):
        let harness = Harness::new();
        let alice = harness.join("R", "alice").await;

        // when (操作):
        let result = harness
            .approve
            .execute(&alice.session, room_id("R"), username("nobody"))
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(AdmissionError::NotPending("nobody".to_string())));
    }

    #[tokio::test]
    async fn test_approve_in_unknown_room() {
        // テスト項目: 存在しない Room への承認は UnknownRoom
        // given (前提条件):
        let harness = Harness::new();
        let alice = harness.join("R", "alice").await;

        // when (操作):
        let result = harness
            .approve
            .execute(&alice.session, room_id("missing"), username("bob"))
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(AdmissionError::UnknownRoom("missing".to_string())));
    }

    #[tokio::test]
    async fn test_approve_without_join() {
        // テスト項目: join-room 前の接続からの承認は NotJoined
        // given (前提条件):
        let harness = Harness::new();
        let peer = harness.connect().await;

        // when (操作):
        let result = harness
            .approve
            .execute(&peer.session, room_id("R"), username("bob"))
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(AdmissionError::NotJoined));
    }
}
