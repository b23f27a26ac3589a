//! Presence Registry trait 定義

use async_trait::async_trait;

use super::value_object::{ConnectionId, Username};

/// ユーザー名 → 現在の接続 のマッピング
///
/// 1 ユーザーにつき有効なエントリは 1 つ（後勝ち）。古い接続は閉じない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresenceRegistry: Send + Sync {
    /// 登録し、上書きされた以前の接続を返す
    async fn register(&self, username: Username, connection_id: ConnectionId)
    -> Option<ConnectionId>;

    async fn lookup(&self, username: &Username) -> Option<ConnectionId>;

    /// 現在の登録が `connection_id` と一致するときだけ削除する
    ///
    /// 削除した場合は true。後から接続し直したユーザーのエントリを、古い接続の
    /// 切断処理が消してしまうことはない。
    async fn unregister(&self, username: &Username, connection_id: ConnectionId) -> bool;
}
