//! Conversion logic between DTOs and domain models.

use genkan_shared::time::to_rfc3339;

use crate::domain::{MessageBody, Notification, Room, RoomId, Username, ValueObjectError};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// DTO → Domain Model
// ========================================

impl dto::RoomMemberPayload {
    /// `{roomId, username}` を検証済みの値オブジェクトに変換
    pub fn into_domain(self) -> Result<(RoomId, Username), ValueObjectError> {
        Ok((RoomId::new(self.room_id)?, Username::new(self.username)?))
    }
}

impl dto::ChatMessagePayload {
    pub fn into_domain(self) -> Result<MessageBody, ValueObjectError> {
        MessageBody::new(self.body)
    }
}

impl dto::CloseRoomPayload {
    pub fn into_domain(self) -> Result<RoomId, ValueObjectError> {
        RoomId::new(self.room_id)
    }
}

// ========================================
// Domain Model → DTO
// ========================================

impl From<Notification> for dto::ServerMessage {
    fn from(notification: Notification) -> Self {
        match notification {
            Notification::Message { user, text } => dto::ServerMessage::Message(dto::ChatLine {
                user: user.as_str().to_string(),
                text,
            }),
            Notification::JoinRequest { room_id, username } => {
                dto::ServerMessage::JoinRequest(dto::RoomMemberPayload {
                    room_id: room_id.into_string(),
                    username: username.into_string(),
                })
            }
            Notification::Approved { room_id } => {
                dto::ServerMessage::Approved(dto::ApprovedPayload {
                    room_id: room_id.into_string(),
                })
            }
            Notification::Rejected => dto::ServerMessage::Rejected(dto::EmptyPayload::default()),
            Notification::RoomClosed => {
                dto::ServerMessage::RoomClosed(dto::EmptyPayload::default())
            }
        }
    }
}

fn names(users: Vec<Username>) -> Vec<String> {
    users.into_iter().map(Username::into_string).collect()
}

impl From<&Room> for http::RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            admin: room.admin().as_str().to_string(),
            approved_users: names(room.approved_users()),
            pending_users: names(room.pending_users()),
            created_at: to_rfc3339(room.created_at.value()),
        }
    }
}

impl From<&Room> for http::RoomDetailDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            admin: room.admin().as_str().to_string(),
            approved_users: names(room.approved_users()),
            pending_users: names(room.pending_users()),
            message_count: room.history().len(),
            created_at: to_rfc3339(room.created_at.value()),
        }
    }
}
