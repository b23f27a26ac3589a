//! UseCase テスト用のハーネス
//!
//! 実際のインメモリ実装を組み合わせ、接続ごとの受信チャンネルを覗けるようにする。

use std::sync::Arc;

use genkan_shared::time::FixedClock;
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionSession, Notification, RoomId, Username},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryPresenceRegistry, InMemoryRoomRepository},
    },
};

use super::{
    ApproveUserUseCase, CloseRoomUseCase, ConnectUseCase, DisconnectUseCase, JoinRoomUseCase,
    RejectUserUseCase, RoomBroadcaster, RoomLocks, SendMessageUseCase,
};

pub const TEST_HISTORY_LIMIT: usize = 100;

pub struct Harness {
    pub repository: Arc<InMemoryRoomRepository>,
    pub presence: Arc<InMemoryPresenceRegistry>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub connect: ConnectUseCase,
    pub join: JoinRoomUseCase,
    pub approve: ApproveUserUseCase,
    pub reject: RejectUserUseCase,
    pub send: SendMessageUseCase,
    pub close: CloseRoomUseCase,
    pub disconnect: DisconnectUseCase,
}

/// テスト用の接続（セッションと受信側）
pub struct Peer {
    pub session: ConnectionSession,
    pub rx: mpsc::UnboundedReceiver<Notification>,
}

impl Peer {
    /// 受信済みの通知を全て取り出す
    pub fn drain(&mut self) -> Vec<Notification> {
        let mut received = Vec::new();
        while let Ok(notification) = self.rx.try_recv() {
            received.push(notification);
        }
        received
    }
}

impl Harness {
    pub fn new() -> Self {
        Self::with_history_limit(TEST_HISTORY_LIMIT)
    }

    pub fn with_history_limit(history_limit: usize) -> Self {
        let repository = Arc::new(InMemoryRoomRepository::new(
            Arc::new(FixedClock::new(1_700_000_000_000)),
            history_limit,
        ));
        let presence = Arc::new(InMemoryPresenceRegistry::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let broadcaster = Arc::new(RoomBroadcaster::new(presence.clone(), pusher.clone()));
        let locks = RoomLocks::new();

        Self {
            connect: ConnectUseCase::new(broadcaster.clone()),
            join: JoinRoomUseCase::new(
                repository.clone(),
                presence.clone(),
                broadcaster.clone(),
                locks.clone(),
            ),
            approve: ApproveUserUseCase::new(
                repository.clone(),
                broadcaster.clone(),
                locks.clone(),
            ),
            reject: RejectUserUseCase::new(repository.clone(), broadcaster.clone(), locks.clone()),
            send: SendMessageUseCase::new(repository.clone(), broadcaster.clone(), locks.clone()),
            close: CloseRoomUseCase::new(repository.clone(), broadcaster.clone(), locks.clone()),
            disconnect: DisconnectUseCase::new(
                repository.clone(),
                presence.clone(),
                broadcaster,
                locks,
            ),
            repository,
            presence,
            pusher,
        }
    }

    pub async fn connect(&self) -> Peer {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = self.connect.execute(tx).await;
        Peer { session, rx }
    }

    /// 接続して join-room を送り、受信済みの通知を捨てる
    pub async fn join(&self, room: &str, name: &str) -> Peer {
        let mut peer = self.connect().await;
        self.join
            .execute(&mut peer.session, room_id(room), username(name))
            .await;
        peer.drain();
        peer
    }
    /// `admin` が作成し、`member` が承認済みで入室している Room を用意する
    pub async fn room_with_member(&self, room: &str, admin: &str, member: &str) -> (Peer, Peer) {
        let mut admin_peer = self.join(room, admin).await;
        let mut member_peer = self.join(room, member).await;
        self.approve
            .execute(&admin_peer.session, room_id(room), username(member))
            .await
            .unwrap();
        self.join
            .execute(&mut member_peer.session, room_id(room), username(member))
            .await;
        admin_peer.drain();
        member_peer.drain();
        (admin_peer, member_peer)
    }
}

pub fn room_id(id: &str) -> RoomId {
    RoomId::new(id.to_string()).unwrap()
}

pub fn username(name: &str) -> Username {
    Username::new(name.to_string()).unwrap()
}
