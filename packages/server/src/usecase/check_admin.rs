//! UseCase: admin 判定（HTTP の admin チェック）

use std::sync::Arc;

use crate::domain::{RoomId, RoomRepository, Username};

/// admin 判定のユースケース
pub struct CheckAdminUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl CheckAdminUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// `username` が Room の admin かどうか。存在しない Room では false（作成はしない）
    pub async fn execute(&self, room_id: &RoomId, username: &Username) -> bool {
        self.repository.is_admin(room_id, username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{Harness, room_id, username};

    #[tokio::test]
    async fn test_check_admin() {
        // テスト項目: admin だけが true になり、存在しない Room は作成されない
        // given (前提条件):
        let harness = Harness::new();
        let _alice = harness.join("R", "alice").await;
        let usecase = CheckAdminUseCase::new(harness.repository.clone());

        // when (操作):
        let alice = usecase.execute(&room_id("R"), &username("alice")).await;
        let bob = usecase.execute(&room_id("R"), &username("bob")).await;
        let missing = usecase.execute(&room_id("S"), &username("alice")).await;

        // then (期待する結果):
        assert!(alice);
        assert!(!bob);
        assert!(!missing);
        assert_eq!(harness.repository.count_rooms().await, 1);
    }
}
