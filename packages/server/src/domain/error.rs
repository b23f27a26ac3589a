//! ドメイン層のエラー定義

use thiserror::Error;

use super::membership::{MemberState, MembershipAction};

/// 値オブジェクト生成時の検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be at most {max} bytes (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Room エンティティに対する操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// Room Store に存在しない room id
    #[error("room '{0}' does not exist")]
    UnknownRoom(String),

    /// 承認済みメンバーではないユーザーの操作
    #[error("user '{0}' is not an approved member")]
    NotMember(String),

    /// 承認待ちではないユーザーへの approve / reject
    #[error("user '{0}' has no pending join request")]
    NotPending(String),

    /// 状態遷移表に存在しない遷移
    #[error("cannot apply {action:?} to a member in state {from:?}")]
    InvalidTransition {
        from: MemberState,
        action: MembershipAction,
    },
}

/// MessagePusher の送信エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}
