//! クライアントへ push する通知（Broadcast Fan-out の配送単位）

use super::{entity::ChatMessage, value_object::{RoomId, Username}};

/// システム通知の送信者名
pub const SYSTEM_SENDER: &str = "System";

/// `message` イベントの送信者
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sender {
    User(Username),
    System,
}

impl Sender {
    pub fn as_str(&self) -> &str {
        match self {
            Sender::User(username) => username.as_str(),
            Sender::System => SYSTEM_SENDER,
        }
    }
}

/// サーバーからクライアントへの通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// チャットメッセージまたはシステム通知
    Message { user: Sender, text: String },
    /// admin だけに送る入室リクエスト
    JoinRequest { room_id: RoomId, username: Username },
    /// 承認されたユーザーだけに送る
    Approved { room_id: RoomId },
    /// 拒否されたユーザーだけに送る
    Rejected,
    /// Room が破棄された（クライアント側 UI のリセット用）
    RoomClosed,
}

impl Notification {
    pub fn system(text: String) -> Self {
        Notification::Message {
            user: Sender::System,
            text,
        }
    }

    pub fn joined(username: &Username) -> Self {
        Self::system(format!("{} joined the room", username))
    }

    pub fn left(username: &Username) -> Self {
        Self::system(format!("{} left the room", username))
    }

    pub fn closed(room_id: &RoomId) -> Self {
        Self::system(format!("Room \"{}\" has been closed", room_id))
    }
}

impl From<ChatMessage> for Notification {
    fn from(message: ChatMessage) -> Self {
        Notification::Message {
            user: Sender::User(message.author),
            text: message.body.into_string(),
        }
    }
}
