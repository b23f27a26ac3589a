//! Broadcast Fan-out
//!
//! Presence Registry と MessagePusher をまとめ、ユーザー名または Room を宛先にした
//! 配送を提供する。配送は fire-and-forget だが、結果（届いたかどうか・届いた数）は
//! 呼び出し側に返す。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, Notification, PresenceRegistry, PusherChannel, RoomId, Username,
};

pub struct RoomBroadcaster {
    presence: Arc<dyn PresenceRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RoomBroadcaster {
    pub fn new(
        presence: Arc<dyn PresenceRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            presence,
            message_pusher,
        }
    }

    /// ユーザーの現在の接続に送信する。オンラインでなければ false
    pub async fn notify(&self, username: &Username, notification: Notification) -> bool {
        match self.presence.lookup(username).await {
            Some(connection_id) => self.push_to(connection_id, notification).await,
            None => {
                tracing::debug!("'{}' is offline, notification not delivered", username);
                false
            }
        }
    }

    /// 特定の接続に送信する
    pub async fn push_to(&self, connection_id: ConnectionId, notification: Notification) -> bool {
        match self.message_pusher.push_to(connection_id, notification).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to push to connection {}: {}", connection_id, e);
                false
            }
        }
    }

    /// Room の配送グループ全体に送信し、届いた接続数を返す
    pub async fn broadcast(&self, room_id: &RoomId, notification: Notification) -> usize {
        self.message_pusher.broadcast(room_id, notification).await
    }

    pub async fn register_connection(&self, connection_id: ConnectionId, channel: PusherChannel) {
        self.message_pusher
            .register_connection(connection_id, channel)
            .await;
    }

    pub async fn unregister_connection(&self, connection_id: ConnectionId) {
        self.message_pusher.unregister_connection(connection_id).await;
    }

    pub async fn join_group(&self, room_id: &RoomId, connection_id: ConnectionId) {
        self.message_pusher.subscribe(room_id, connection_id).await;
    }

    /// 配送グループから外す。所属していた場合は true
    pub async fn leave_group(&self, room_id: &RoomId, connection_id: ConnectionId) -> bool {
        self.message_pusher.unsubscribe(room_id, connection_id).await
    }

    pub async fn in_group(&self, room_id: &RoomId, connection_id: ConnectionId) -> bool {
        self.message_pusher.is_subscribed(room_id, connection_id).await
    }

    pub async fn dissolve(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        self.message_pusher.dissolve(room_id).await
    }
}
