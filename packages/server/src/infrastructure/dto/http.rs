//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// `GET /api/rooms/{room_id}/admin` のクエリ
#[derive(Debug, Deserialize)]
pub struct AdminQuery {
    pub username: String,
}

/// Admin check response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCheckDto {
    pub room_id: String,
    pub username: String,
    pub is_admin: bool,
}

/// Room summary for the room list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub admin: String,
    pub approved_users: Vec<String>,
    pub pending_users: Vec<String>,
    pub created_at: String,
}

/// Room detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub id: String,
    pub admin: String,
    pub approved_users: Vec<String>,
    pub pending_users: Vec<String>,
    pub message_count: usize,
    pub created_at: String,
}
