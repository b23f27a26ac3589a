//! WebSocket event DTOs.
//!
//! Every frame is a JSON text frame of the form `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};

/// Client → Server events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    JoinRoom(RoomMemberPayload),
    ApproveUser(RoomMemberPayload),
    RejectUser(RoomMemberPayload),
    /// リッチテキスト用の `chat message` も同じイベントとして扱う
    #[serde(alias = "chat message")]
    ChatMessage(ChatMessagePayload),
    CloseRoom(CloseRoomPayload),
}

/// Server → Client events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    Message(ChatLine),
    JoinRequest(RoomMemberPayload),
    Approved(ApprovedPayload),
    Rejected(EmptyPayload),
    RoomClosed(EmptyPayload),
}

/// `{roomId, username}` (join-room / approve-user / reject-user / join-request)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMemberPayload {
    pub room_id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessagePayload {
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseRoomPayload {
    pub room_id: String,
}

/// A chat line or a system notice (`user = "System"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLine {
    pub user: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedPayload {
    pub room_id: String,
}

/// Serialized as `{}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyPayload {}
