//! Room 単位の直列化
//!
//! 外側の HashMap は std の Mutex で保護し、await をまたいで保持しない。
//! 各 Room のロックは tokio の Mutex で、読み取り → 更新 → 通知 の一連の処理の間保持する。
//! これにより同じ Room への操作は到着順に 1 つずつ処理され、別の Room の操作は止まらない。

use std::{
    collections::HashMap,
    sync::{Arc, Mutex as StdMutex, PoisonError},
};

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::RoomId;

type LockTable = Arc<StdMutex<HashMap<RoomId, Arc<Mutex<()>>>>>;

/// room id ごとの非同期ロック
#[derive(Clone, Default)]
pub struct RoomLocks {
    table: LockTable,
}

impl RoomLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Room のロックを取得する。ガードを drop すると解放される
    pub async fn acquire(&self, room_id: &RoomId) -> RoomGuard {
        let lock = {
            let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
            table.entry(room_id.clone()).or_default().clone()
        };
        let guard = lock.lock_owned().await;
        RoomGuard {
            room_id: room_id.clone(),
            table: self.table.clone(),
            guard: Some(guard),
        }
    }

    /// ロックのエントリが残っている Room 数
    pub fn active_rooms(&self) -> usize {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// 保持している間、その Room への他の操作を待たせるガード
pub struct RoomGuard {
    room_id: RoomId,
    table: LockTable,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for RoomGuard {
    fn drop(&mut self) {
        // 先にロックを解放し、参照カウントがテーブルと待機者だけを数えるようにする
        drop(self.guard.take());

        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        let idle = table
            .get(&self.room_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1);
        if idle {
            table.remove(&self.room_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_same_room_is_serialized() {
        // テスト項目: 同じ Room のロックは同時に 1 つしか取得できない
        // given (前提条件):
        let locks = RoomLocks::new();
        let guard = locks.acquire(&room("R")).await;

        // when (操作):
        let second =
            tokio::time::timeout(Duration::from_millis(50), locks.acquire(&room("R"))).await;

        // then (期待する結果):
        assert!(second.is_err());
        drop(guard);
        let third = tokio::time::timeout(Duration::from_secs(1), locks.acquire(&room("R"))).await;
        assert!(third.is_ok());
    }

    #[tokio::test]
    async fn test_different_rooms_are_independent() {
        // テスト項目: 別の Room のロックは互いに待たない
        // given (前提条件):
        let locks = RoomLocks::new();
        let _a = locks.acquire(&room("a")).await;

        // when (操作):
        let b = tokio::time::timeout(Duration::from_secs(1), locks.acquire(&room("b"))).await;

        // then (期待する結果):
        assert!(b.is_ok());
        assert_eq!(locks.active_rooms(), 2);
    }

    #[tokio::test]
    async fn test_entry_removed_after_release() {
        // テスト項目: 保持者も待機者もいなくなったエントリは削除される
        // given (前提条件):
        let locks = RoomLocks::new();

        // when (操作):
        {
            let _guard = locks.acquire(&room("R")).await;
            assert_eq!(locks.active_rooms(), 1);
        }

        // then (期待する結果):
        assert_eq!(locks.active_rooms(), 0);
    }

    #[tokio::test]
    async fn test_waiter_keeps_entry_alive() {
        // テスト項目: 待機者がいる間はエントリが残り、待機者がロックを引き継ぐ
        // given (前提条件):
        let locks = RoomLocks::new();
        let guard = locks.acquire(&room("R")).await;
        let waiter_locks = locks.clone();
        let waiter = tokio::spawn(async move {
            let _guard = waiter_locks.acquire(&room("R")).await;
        });
        tokio::time::sleep(Duration::from_millis(20)).await;

        // when (操作):
        drop(guard);

        // then (期待する結果):
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(locks.active_rooms(), 0);
    }
}
