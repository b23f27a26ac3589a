//! UseCase: メッセージ送信処理（chat-message）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - Message Log への追加と、Room の配送グループへのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 承認済みメンバーのメッセージが送信者自身を含む全員に届くことを保証
//! - 承認待ちや未入室の接続からのメッセージが記録も配送もされないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：承認済みメンバーの送信
//! - 異常系：未入室、承認待ち、破棄された Room への送信
//! - エッジケース：履歴の保持件数を超えた場合

use std::sync::Arc;

use crate::domain::{ChatMessage, ConnectionSession, MessageBody, Notification, RoomRepository};

use super::{broadcast::RoomBroadcaster, error::AdmissionError, room_lock::RoomLocks};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    broadcaster: Arc<RoomBroadcaster>,
    locks: RoomLocks,
}

impl SendMessageUseCase {
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

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - メッセージが届いた接続数
    /// * `Err(AdmissionError)` - 入室していない、または承認済みメンバーではない
    pub async fn execute(
        &self,
        session: &ConnectionSession,
        body: MessageBody,
    ) -> Result<usize, AdmissionError> {
        let (username, room_id) = session.context().ok_or(AdmissionError::NotJoined)?;
        let message = ChatMessage::new(username.clone(), body);

        let _guard = self.locks.acquire(room_id).await;
        self.repository
            .append_message(room_id, message.clone())
            .await?;

        let delivered = self
            .broadcaster
            .broadcast(room_id, Notification::from(message))
            .await;
        tracing::debug!(
            "Message from '{}' delivered to {} connection(s) in '{}'",
            username,
            delivered,
            room_id
        );
        Ok(delivered)
    }
}
