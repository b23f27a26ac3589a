//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。プロセスを再起動すると全ての
//! Room と履歴は失われます。

use std::{
    collections::{HashMap, hash_map::Entry},
    sync::Arc,
};

use async_trait::async_trait;
use genkan_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, JoinOutcome, MemberState, Room, RoomError, RoomId, RoomRepository, Timestamp,
    Username,
};

/// 1 Room あたりの履歴保持件数のデフォルト
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// room id → Room
    rooms: Mutex<HashMap<RoomId, Room>>,
    /// Room 作成時刻の取得元
    clock: Arc<dyn Clock>,
    /// 新しく作る Room の履歴保持件数
    history_limit: usize,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(clock: Arc<dyn Clock>, history_limit: usize) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            clock,
            history_limit,
        }
    }

    /// 現在の Room 数
    pub async fn count_rooms(&self) -> usize {
        self.rooms.lock().await.len()
    }
}

fn unknown(room_id: &RoomId) -> RoomError {
    RoomError::UnknownRoom(room_id.as_str().to_string())
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn join(&self, room_id: &RoomId, username: &Username) -> JoinOutcome {
        let mut rooms = self.rooms.lock().await;

        match rooms.entry(room_id.clone()) {
            Entry::Vacant(entry) => {
                let created_at = Timestamp::new(self.clock.now_millis());
                entry.insert(Room::create(
                    room_id.clone(),
                    username.clone(),
                    created_at,
                    self.history_limit,
                ));
                tracing::info!("Room '{}' created with admin '{}'", room_id, username);
                JoinOutcome::Created
            }
            Entry::Occupied(mut entry) => {
                let room = entry.get_mut();
                match room.request_join(username) {
                    MemberState::Approved => JoinOutcome::Approved {
                        history: room.history().snapshot(),
                        is_admin: room.is_admin(username),
                        pending: room.pending_users(),
                    },
                    MemberState::Pending | MemberState::Unjoined => JoinOutcome::Pending {
                        admin: room.admin().clone(),
                    },
                }
            }
        }
    }

    async fn approve(&self, room_id: &RoomId, username: &Username) -> Result<(), RoomError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.get_mut(room_id).ok_or_else(|| unknown(room_id))?;
        room.approve(username)
    }

    async fn reject(&self, room_id: &RoomId, username: &Username) -> Result<(), RoomError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.get_mut(room_id).ok_or_else(|| unknown(room_id))?;
        room.reject(username)
    }

    async fn append_message(
        &self,
        room_id: &RoomId,
        message: ChatMessage,
    ) -> Result<(), RoomError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.get_mut(room_id).ok_or_else(|| unknown(room_id))?;
        room.post(message)
    }

    async fn admin_of(&self, room_id: &RoomId) -> Option<Username> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).map(|room| room.admin().clone())
    }

    async fn find(&self, room_id: &RoomId) -> Option<Room> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).cloned()
    }

    async fn list(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        let mut list: Vec<Room> = rooms.values().cloned().collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        list
    }

    async fn destroy(&self, room_id: &RoomId) -> bool {
        let mut rooms = self.rooms.lock().await;
        let removed = rooms.remove(room_id).is_some();
        if removed {
            tracing::info!("Room '{}' destroyed", room_id);
        }
        removed
    }
}
