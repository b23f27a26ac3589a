//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    domain::{RoomId, Username},
    infrastructure::dto::http::{AdminCheckDto, AdminQuery, RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
    usecase::GetRoomDetailError,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Whether `username` is the admin of the room. Never creates the room.
pub async fn check_admin(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Query(query): Query<AdminQuery>,
) -> Result<Json<AdminCheckDto>, StatusCode> {
    let (Ok(room_id), Ok(username)) = (RoomId::new(room_id), Username::new(query.username)) else {
        return Err(StatusCode::BAD_REQUEST);
    };

    let is_admin = state.check_admin_usecase.execute(&room_id, &username).await;
    Ok(Json(AdminCheckDto {
        room_id: room_id.into_string(),
        username: username.into_string(),
        is_admin,
    }))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(rooms.iter().map(RoomSummaryDto::from).collect())
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room_id = RoomId::new(room_id).map_err(|_| StatusCode::BAD_REQUEST)?;

    match state.get_room_detail_usecase.execute(&room_id).await {
        Ok(room) => Ok(Json(RoomDetailDto::from(&room))),
        Err(GetRoomDetailError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
    }
}
