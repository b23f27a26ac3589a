//! MessagePusher trait 定義
//!
//! 接続へのメッセージ送信と、Room ごとの配送グループ（delivery group）を抽象化する。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    MessagePushError, Notification,
    value_object::{ConnectionId, RoomId},
};

/// 接続ごとの送信チャンネル
///
/// 送信はブロックしない。遅い、あるいは切れた接続が他の配送を止めることはない。
pub type PusherChannel = mpsc::UnboundedSender<Notification>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_connection(&self, connection_id: ConnectionId, channel: PusherChannel);

    /// 接続を登録解除し、所属していた全ての配送グループからも外す
    async fn unregister_connection(&self, connection_id: ConnectionId);

    /// 接続を Room の配送グループに加える
    async fn subscribe(&self, room_id: &RoomId, connection_id: ConnectionId);

    /// 接続を Room の配送グループから外す。所属していた場合は true
    async fn unsubscribe(&self, room_id: &RoomId, connection_id: ConnectionId) -> bool;

    /// 接続が Room の配送グループに属しているか
    async fn is_subscribed(&self, room_id: &RoomId, connection_id: ConnectionId) -> bool;

    /// Room の配送グループを解散し、所属していた接続を返す
    async fn dissolve(&self, room_id: &RoomId) -> Vec<ConnectionId>;

    /// 特定の接続に送信
    async fn push_to(
        &self,
        connection_id: ConnectionId,
        notification: Notification,
    ) -> Result<(), MessagePushError>;

    /// 配送グループ全体に送信し、届けられた接続数を返す（部分失敗は許容）
    async fn broadcast(&self, room_id: &RoomId, notification: Notification) -> usize;
}
