//! UseCase: 接続の確立

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionSession, PusherChannel};

use super::broadcast::RoomBroadcaster;

/// 新しい接続を受け付けるユースケース
pub struct ConnectUseCase {
    broadcaster: Arc<RoomBroadcaster>,
}

impl ConnectUseCase {
    pub fn new(broadcaster: Arc<RoomBroadcaster>) -> Self {
        Self { broadcaster }
    }

    /// 接続トークンを発行し、送信チャンネルを登録する
    ///
    /// 返したセッションは、まだどのユーザー・Room にも紐づいていない。
    pub async fn execute(&self, channel: PusherChannel) -> ConnectionSession {
        let connection_id = ConnectionId::generate();
        self.broadcaster
            .register_connection(connection_id, channel)
            .await;
        ConnectionSession::new(connection_id)
    }
}
