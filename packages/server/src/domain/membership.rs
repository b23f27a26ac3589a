//! (room, user) ごとのメンバーシップ状態機械
//!
//! 遷移表:
//!
//! ```text
//! Unjoined --Create-->  Approved   (Room 作成者 = admin)
//! Unjoined --Request--> Pending
//! Pending  --Request--> Pending    (再リクエストは冪等)
//! Approved --Request--> Approved   (承認済みユーザーの再入室)
//! Pending  --Approve--> Approved
//! Pending  --Reject-->  Unjoined   (拒否は恒久ではない。再度 Request 可能)
//! ```
//!
//! 切断は Presence だけを消し、メンバーシップは変えない。Room の破棄は
//! 全メンバーの状態ごと Room を消すので、ここでは扱わない。

use super::{error::RoomError, value_object::Username, ChatMessage};

/// メンバーシップ状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberState {
    #[default]
    Unjoined,
    Pending,
    Approved,
}

/// 状態遷移を引き起こす操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipAction {
    Create,
    Request,
    Approve,
    Reject,
}

impl MemberState {
    /// 遷移表に従って次の状態を返す（純粋関数）
    pub fn apply(self, action: MembershipAction) -> Result<MemberState, RoomError> {
        use MemberState::{Approved, Pending, Unjoined};
        use MembershipAction::{Approve, Create, Reject, Request};

        match (self, action) {
            (Unjoined, Create) => Ok(Approved),
            (Unjoined | Pending, Request) => Ok(Pending),
            (Approved, Request) => Ok(Approved),
            (Pending, Approve) => Ok(Approved),
            (Pending, Reject) => Ok(Unjoined),
            (from, action) => Err(RoomError::InvalidTransition { from, action }),
        }
    }
}

/// `join-room` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// 未知の room id だったため、参加者を admin として Room を作成した
    Created,
    /// 承認済みとして入室した
    Approved {
        /// 到着順のメッセージ履歴（リプレイ用）
        history: Vec<ChatMessage>,
        /// 入室者が admin かどうか
        is_admin: bool,
        /// 現在の承認待ちユーザー（ユーザー名順）
        pending: Vec<Username>,
    },
    /// 承認待ちになった
    Pending {
        /// 通知先の admin
        admin: Username,
    },
}
