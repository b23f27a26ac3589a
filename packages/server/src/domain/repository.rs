//! Repository trait 定義
//!
//! ドメイン層が必要とする Room Store / Message Log へのインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    ChatMessage, JoinOutcome, Room, RoomError,
    value_object::{RoomId, Username},
};

/// Room Store（Room と Message Log の保管庫）
///
/// 各メソッドは 1 つの Room に対して不可分に実行される。複数の操作をまたぐ
/// 直列化は UseCase 層の `RoomLocks` が担う。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// `join-room` を適用する
    ///
    /// 未知の room id なら `username` を admin として Room を作成する。
    async fn join(&self, room_id: &RoomId, username: &Username) -> JoinOutcome;

    /// 承認待ちユーザーを承認する
    async fn approve(&self, room_id: &RoomId, username: &Username) -> Result<(), RoomError>;

    /// 承認待ちユーザーを拒否する
    async fn reject(&self, room_id: &RoomId, username: &Username) -> Result<(), RoomError>;

    /// Message Log にメッセージを追加する（投稿者は承認済みであること）
    async fn append_message(&self, room_id: &RoomId, message: ChatMessage)
    -> Result<(), RoomError>;

    /// Room の admin を取得
    async fn admin_of(&self, room_id: &RoomId) -> Option<Username>;

    /// `username` が Room の admin かどうか（Room がなければ false）
    async fn is_admin(&self, room_id: &RoomId, username: &Username) -> bool {
        self.admin_of(room_id)
            .await
            .is_some_and(|admin| &admin == username)
    }

    /// Room のスナップショットを取得
    async fn find(&self, room_id: &RoomId) -> Option<Room>;

    /// 全 Room のスナップショットを取得（room id 順）
    async fn list(&self) -> Vec<Room>;

    /// Room と Message Log をまとめて削除する。存在した場合は true
    async fn destroy(&self, room_id: &RoomId) -> bool;
}
