//! エンティティ
//!
//! - `Room`: admin・メンバーシップ・Message Log をまとめた集約
//! - `ChatMessage`: Message Log に積まれる不変のメッセージ
//! - `ConnectionSession`: 接続ごとのセッションコンテキスト

use std::collections::HashMap;

use super::{
    error::RoomError,
    membership::{MemberState, MembershipAction},
    message_log::MessageLog,
    value_object::{ConnectionId, MessageBody, RoomId, Timestamp, Username},
};

/// チャットメッセージ（追加後は不変）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub author: Username,
    pub body: MessageBody,
}

impl ChatMessage {
    pub fn new(author: Username, body: MessageBody) -> Self {
        Self { author, body }
    }
}

/// Room 集約
///
/// ## 不変条件
///
/// - `admin` は生成時に決まり、Room が存在する間は変わらない
/// - `admin` は常に Approved
/// - 各ユーザーの状態は `members` の 1 エントリだけで表すため、
///   Approved と Pending が同時に成り立つことはない
/// - Unjoined のユーザーは `members` に入れない
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    admin: Username,
    members: HashMap<Username, MemberState>,
    messages: MessageLog,
    pub created_at: Timestamp,
}

impl Room {
    /// `creator` を admin として Room を作成する
    pub fn create(
        id: RoomId,
        creator: Username,
        created_at: Timestamp,
        history_limit: usize,
    ) -> Self {
        let mut members = HashMap::new();
        members.insert(creator.clone(), MemberState::Approved);
        Self {
            id,
            admin: creator,
            members,
            messages: MessageLog::with_limit(history_limit),
            created_at,
        }
    }

    pub fn admin(&self) -> &Username {
        &self.admin
    }

    pub fn is_admin(&self, username: &Username) -> bool {
        &self.admin == username
    }

    pub fn state_of(&self, username: &Username) -> MemberState {
        self.members.get(username).copied().unwrap_or_default()
    }

    pub fn is_approved(&self, username: &Username) -> bool {
        self.state_of(username) == MemberState::Approved
    }

    /// 承認済みユーザー（ユーザー名順）
    pub fn approved_users(&self) -> Vec<Username> {
        self.users_in(MemberState::Approved)
    }

    /// 承認待ちユーザー（ユーザー名順）
    pub fn pending_users(&self) -> Vec<Username> {
        self.users_in(MemberState::Pending)
    }

    fn users_in(&self, state: MemberState) -> Vec<Username> {
        let mut users: Vec<Username> = self
            .members
            .iter()
            .filter(|(_, s)| **s == state)
            .map(|(u, _)| u.clone())
            .collect();
        users.sort();
        users
    }

    /// 入室リクエスト。遷移後の状態（Approved または Pending）を返す
    pub fn request_join(&mut self, username: &Username) -> MemberState {
        let current = self.state_of(username);
        match current.apply(MembershipAction::Request) {
            Ok(next) => {
                self.set_state(username, next);
                next
            }
            Err(_) => current,
        }
    }

    pub fn approve(&mut self, username: &Username) -> Result<(), RoomError> {
        self.transition(username, MembershipAction::Approve)
    }

    pub fn reject(&mut self, username: &Username) -> Result<(), RoomError> {
        self.transition(username, MembershipAction::Reject)
    }

    fn transition(
        &mut self,
        username: &Username,
        action: MembershipAction,
    ) -> Result<(), RoomError> {
        let next = self
            .state_of(username)
            .apply(action)
            .map_err(|_| RoomError::NotPending(username.as_str().to_string()))?;
        self.set_state(username, next);
        Ok(())
    }

    fn set_state(&mut self, username: &Username, state: MemberState) {
        if state == MemberState::Unjoined {
            self.members.remove(username);
        } else {
            self.members.insert(username.clone(), state);
        }
    }

    /// 承認済みメンバーのメッセージを Message Log に追加する
    pub fn post(&mut self, message: ChatMessage) -> Result<(), RoomError> {
        if !self.is_approved(&message.author) {
            return Err(RoomError::NotMember(message.author.into_string()));
        }
        self.messages.append(message);
        Ok(())
    }

    pub fn history(&self) -> &MessageLog {
        &self.messages
    }
}

/// 接続ごとのセッションコンテキスト
///
/// `username` は直近の `join-room` で名乗ったユーザー（承認待ちでも設定される）。
/// `room_id` は承認済みとして入室できた Room だけを指す。
#[derive(Debug, Clone)]
pub struct ConnectionSession {
    id: ConnectionId,
    username: Option<Username>,
    room_id: Option<RoomId>,
}

impl ConnectionSession {
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            username: None,
            room_id: None,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn username(&self) -> Option<&Username> {
        self.username.as_ref()
    }

    pub fn room_id(&self) -> Option<&RoomId> {
        self.room_id.as_ref()
    }

    /// メッセージ送信などに必要な (username, room_id) の組
    pub fn context(&self) -> Option<(&Username, &RoomId)> {
        self.username.as_ref().zip(self.room_id.as_ref())
    }

    pub fn identify(&mut self, username: Username) {
        self.username = Some(username);
    }

    /// 入室先を切り替え、直前の Room を返す
    pub fn enter_room(&mut self, room_id: RoomId) -> Option<RoomId> {
        self.room_id.replace(room_id)
    }

    pub fn leave_room(&mut self) -> Option<RoomId> {
        self.room_id.take()
    }
}
