//! UseCase 層のエラー定義
//!
//! どのエラーもクライアントには返さない（fail-silent）。ログとテストのために使う。

use thiserror::Error;

use crate::domain::{MemberState, MembershipAction, RoomError};

/// 入室管理・チャット・Room 操作の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    /// `join-room` をまだ送っていない接続からの操作
    #[error("connection has not joined any room")]
    NotJoined,

    /// admin 以外による approve / reject / close
    #[error("user '{caller}' is not the admin of room '{room_id}'")]
    Unauthorized { room_id: String, caller: String },

    #[error("room '{0}' does not exist")]
    UnknownRoom(String),

    #[error("user '{0}' is not an approved member")]
    NotMember(String),

    #[error("user '{0}' has no pending join request")]
    NotPending(String),

    #[error("cannot apply {action:?} to a member in state {from:?}")]
    InvalidTransition {
        from: MemberState,
        action: MembershipAction,
    },
}

impl From<RoomError> for AdmissionError {
    fn from(error: RoomError) -> Self {
        match error {
            RoomError::UnknownRoom(room_id) => AdmissionError::UnknownRoom(room_id),
            RoomError::NotMember(username) => AdmissionError::NotMember(username),
            RoomError::NotPending(username) => AdmissionError::NotPending(username),
            RoomError::InvalidTransition { from, action } => {
                AdmissionError::InvalidTransition { from, action }
            }
        }
    }
}

/// Room 詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room not found")]
    RoomNotFound,
}
