//! admin 権限の確認

use crate::domain::{RoomId, RoomRepository, Username};

use super::error::AdmissionError;

/// `caller` が Room の admin であることを確認する
pub(super) async fn ensure_admin(
    repository: &dyn RoomRepository,
    room_id: &RoomId,
    caller: &Username,
) -> Result<(), AdmissionError> {
    match repository.admin_of(room_id).await {
        Some(admin) if admin == *caller => Ok(()),
        Some(_) => Err(AdmissionError::Unauthorized {
            room_id: room_id.as_str().to_string(),
            caller: caller.as_str().to_string(),
        }),
        None => Err(AdmissionError::UnknownRoom(room_id.as_str().to_string())),
    }
}
