//! UseCase: Room 詳細取得

use std::sync::Arc;

use crate::domain::{Room, RoomId, RoomRepository};

use super::error::GetRoomDetailError;

/// Room 詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, room_id: &RoomId) -> Result<Room, GetRoomDetailError> {
        self.repository
            .find(room_id)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)
    }
}
