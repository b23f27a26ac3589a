//! InMemory Presence Registry 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, PresenceRegistry, Username};

/// インメモリ Presence Registry 実装
///
/// 1 つの Mutex の中で比較と削除を行うため、切断による削除と同じユーザーの
/// 新規登録が競合しても、新しいエントリが消されることはない。
#[derive(Default)]
pub struct InMemoryPresenceRegistry {
    /// username → 現在の接続
    entries: Mutex<HashMap<Username, ConnectionId>>,
}

impl InMemoryPresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PresenceRegistry for InMemoryPresenceRegistry {
    async fn register(
        &self,
        username: Username,
        connection_id: ConnectionId,
    ) -> Option<ConnectionId> {
        let mut entries = self.entries.lock().await;
        let previous = entries.insert(username.clone(), connection_id);
        match previous {
            Some(previous) if previous != connection_id => {
                tracing::info!(
                    "Presence of '{}' moved from connection {} to {}",
                    username,
                    previous,
                    connection_id
                );
            }
            _ => {
                tracing::debug!("Presence of '{}' registered to {}", username, connection_id);
            }
        }
        previous
    }

    async fn lookup(&self, username: &Username) -> Option<ConnectionId> {
        let entries = self.entries.lock().await;
        entries.get(username).copied()
    }

    async fn unregister(&self, username: &Username, connection_id: ConnectionId) -> bool {
        let mut entries = self.entries.lock().await;
        if entries.get(username) != Some(&connection_id) {
            tracing::debug!(
                "Presence of '{}' not removed: connection {} is no longer current",
                username,
                connection_id
            );
            return false;
        }
        entries.remove(username);
        true
    }
}
