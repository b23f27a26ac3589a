//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `PusherChannel`（`UnboundedSender`）を管理
//! - Room ごとの配送グループ（Room → 接続 / 接続 → Room の双方向マップ）を管理
//! - 特定の接続への送信（push_to）とグループ全体への送信（broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された sender を受け取り、送信だけを担当します。
//! 送信はチャンネルへの enqueue のみでブロックしないため、Mutex を保持したまま
//! 送信しても遅い接続が他の接続への配送を止めることはありません。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, MessagePushError, MessagePusher, Notification, PusherChannel, RoomId,
};

#[derive(Default)]
struct PusherState {
    /// 接続 → 送信チャンネル
    channels: HashMap<ConnectionId, PusherChannel>,
    /// Room → 配送グループ
    groups: HashMap<RoomId, HashSet<ConnectionId>>,
    /// 接続 → 所属 Room（切断時の掃除用）
    memberships: HashMap<ConnectionId, HashSet<RoomId>>,
}

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    state: Mutex<PusherState>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Room の配送グループに属する接続数
    pub async fn group_size(&self, room_id: &RoomId) -> usize {
        let state = self.state.lock().await;
        state.groups.get(room_id).map_or(0, HashSet::len)
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_connection(&self, connection_id: ConnectionId, channel: PusherChannel) {
        let mut state = self.state.lock().await;
        state.channels.insert(connection_id, channel);
        tracing::debug!("Connection {} registered to MessagePusher", connection_id);
    }

    async fn unregister_connection(&self, connection_id: ConnectionId) {
        let mut state = self.state.lock().await;
        state.channels.remove(&connection_id);
        let rooms = state.memberships.remove(&connection_id).unwrap_or_default();
        for room_id in rooms {
            if let Some(group) = state.groups.get_mut(&room_id) {
                group.remove(&connection_id);
                if group.is_empty() {
                    state.groups.remove(&room_id);
                }
            }
        }
        tracing::debug!("Connection {} unregistered from MessagePusher", connection_id);
    }

    async fn subscribe(&self, room_id: &RoomId, connection_id: ConnectionId) {
        let mut state = self.state.lock().await;
        state
            .groups
            .entry(room_id.clone())
            .or_default()
            .insert(connection_id);
        state
            .memberships
            .entry(connection_id)
            .or_default()
            .insert(room_id.clone());
    }

    async fn unsubscribe(&self, room_id: &RoomId, connection_id: ConnectionId) -> bool {
        let mut state = self.state.lock().await;
        if let Some(rooms) = state.memberships.get_mut(&connection_id) {
            rooms.remove(room_id);
        }
        let Some(group) = state.groups.get_mut(room_id) else {
            return false;
        };
        let removed = group.remove(&connection_id);
        if group.is_empty() {
            state.groups.remove(room_id);
        }
        removed
    }

    async fn is_subscribed(&self, room_id: &RoomId, connection_id: ConnectionId) -> bool {
        let state = self.state.lock().await;
        state
            .groups
            .get(room_id)
            .is_some_and(|group| group.contains(&connection_id))
    }

    async fn dissolve(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        let mut state = self.state.lock().await;
        let members: Vec<ConnectionId> = state
            .groups
            .remove(room_id)
            .map(|group| group.into_iter().collect())
            .unwrap_or_default();
        for connection_id in &members {
            if let Some(rooms) = state.memberships.get_mut(connection_id) {
                rooms.remove(room_id);
            }
        }
        members
    }

    async fn push_to(
        &self,
        connection_id: ConnectionId,
        notification: Notification,
    ) -> Result<(), MessagePushError> {
        let state = self.state.lock().await;
        let channel = state
            .channels
            .get(&connection_id)
            .ok_or_else(|| MessagePushError::ConnectionNotFound(connection_id.to_string()))?;
        channel
            .send(notification)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed notification to connection {}", connection_id);
        Ok(())
    }

    async fn broadcast(&self, room_id: &RoomId, notification: Notification) -> usize {
        let state = self.state.lock().await;
        let Some(group) = state.groups.get(room_id) else {
            return 0;
        };

        let mut delivered = 0;
        for connection_id in group {
            match state.channels.get(connection_id) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(channel) => match channel.send(notification.clone()) {
                    Ok(()) => delivered += 1,
                    Err(e) => tracing::warn!(
                        "Failed to push to connection {} in room '{}': {}",
                        connection_id,
                        room_id,
                        e
                    ),
                },
                None => tracing::warn!(
                    "Connection {} not found during broadcast to '{}', skipping",
                    connection_id,
                    room_id
                ),
            }
        }
        tracing::debug!("Broadcasted to {} connection(s) in '{}'", delivered, room_id);
        delivered
    }
}
