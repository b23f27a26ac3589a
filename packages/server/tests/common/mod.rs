//! Shared helpers for the integration tests.
//!
//! The server runs in-process on an ephemeral port; clients talk to it over
//! real WebSocket and HTTP connections.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use genkan_server::{
    infrastructure::{
        dto::websocket::{ApprovedPayload, ChatLine, RoomMemberPayload, ServerMessage},
        message_pusher::WebSocketMessagePusher,
        repository::{DEFAULT_HISTORY_LIMIT, InMemoryPresenceRegistry, InMemoryRoomRepository},
    },
    ui::{AppState, Server},
};
use genkan_shared::time::SystemClock;
use serde_json::{Value, json};
use tokio::{net::TcpListener, task::JoinHandle};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message,
};

/// How long to wait for an expected frame
const RECV_TIMEOUT: Duration = Duration::from_secs(2);
/// How long to listen when asserting that nothing arrives
const SILENCE_WINDOW: Duration = Duration::from_millis(300);

/// Helper struct to manage the in-process server lifecycle
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with_history_limit(DEFAULT_HISTORY_LIMIT).await
    }

    pub async fn start_with_history_limit(history_limit: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        let repository = Arc::new(InMemoryRoomRepository::new(
            Arc::new(SystemClock),
            history_limit,
        ));
        let presence = Arc::new(InMemoryPresenceRegistry::new());
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let server = Server::new(AppState::new(repository, presence, message_pusher));

        let handle = tokio::spawn(async move {
            let _ = server.serve(listener).await;
        });

        TestServer { addr, handle }
    }

    /// Get the WebSocket URL for this server
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Helper struct wrapping one WebSocket connection
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
}

impl TestClient {
    pub async fn connect(server: &TestServer) -> Self {
        let (stream, _) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect");
        TestClient { stream }
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn send(&mut self, event: &str, data: Value) {
        let frame = json!({ "event": event, "data": data }).to_string();
        self.send_raw(&frame).await;
    }

    pub async fn join(&mut self, room_id: &str, username: &str) {
        self.send("join-room", json!({ "roomId": room_id, "username": username }))
            .await;
    }

    pub async fn approve(&mut self, room_id: &str, username: &str) {
        self.send("approve-user", json!({ "roomId": room_id, "username": username }))
            .await;
    }

    pub async fn reject(&mut self, room_id: &str, username: &str) {
        self.send("reject-user", json!({ "roomId": room_id, "username": username }))
            .await;
    }

    pub async fn chat(&mut self, body: &str) {
        self.send("chat-message", json!({ "body": body })).await;
    }

    pub async fn close_room(&mut self, room_id: &str) {
        self.send("close-room", json!({ "roomId": room_id })).await;
    }

    /// Close the WebSocket connection
    pub async fn disconnect(mut self) {
        let _ = self.stream.close(None).await;
    }

    /// Receive the next event, panicking after `RECV_TIMEOUT`
    pub async fn recv(&mut self) -> ServerMessage {
        tokio::time::timeout(RECV_TIMEOUT, self.next_event())
            .await
            .expect("Timed out waiting for an event")
            .expect("Connection closed while waiting for an event")
    }

    /// Assert that no event arrives within `SILENCE_WINDOW`
    pub async fn expect_silence(&mut self) {
        if let Ok(Some(event)) = tokio::time::timeout(SILENCE_WINDOW, self.next_event()).await {
            panic!("Expected no event, got {:?}", event);
        }
    }

    async fn next_event(&mut self) -> Option<ServerMessage> {
        while let Some(frame) = self.stream.next().await {
            match frame.ok()? {
                Message::Text(text) => {
                    return Some(
                        serde_json::from_str(text.as_str()).expect("Server sent malformed JSON"),
                    );
                }
                Message::Close(_) => return None,
                _ => continue,
            }
        }
        None
    }
}

pub fn system(text: &str) -> ServerMessage {
    chat_line("System", text)
}

pub fn chat_line(user: &str, text: &str) -> ServerMessage {
    ServerMessage::Message(ChatLine {
        user: user.to_string(),
        text: text.to_string(),
    })
}

pub fn join_request(room_id: &str, username: &str) -> ServerMessage {
    ServerMessage::JoinRequest(RoomMemberPayload {
        room_id: room_id.to_string(),
        username: username.to_string(),
    })
}

pub fn approved(room_id: &str) -> ServerMessage {
    ServerMessage::Approved(ApprovedPayload {
        room_id: room_id.to_string(),
    })
}

/// `admin` creates `room_id`, then waits for the join notice
pub async fn create_room(server: &TestServer, room_id: &str, admin: &str) -> TestClient {
    let mut client = TestClient::connect(server).await;
    client.join(room_id, admin).await;
    assert_eq!(client.recv().await, system(&format!("{} joined the room", admin)));
    client
}

/// `member` asks to join `room_id`; returns once the admin saw the request
pub async fn request_join(
    server: &TestServer,
    admin: &mut TestClient,
    room_id: &str,
    member: &str,
) -> TestClient {
    let mut client = TestClient::connect(server).await;
    client.join(room_id, member).await;
    assert_eq!(admin.recv().await, join_request(room_id, member));
    client
}

/// Room with `admin` and an approved, present `member`; all notices consumed
pub async fn room_with_member(
    server: &TestServer,
    room_id: &str,
    admin: &str,
    member: &str,
) -> (TestClient, TestClient) {
    let mut admin_client = create_room(server, room_id, admin).await;
    let mut member_client = request_join(server, &mut admin_client, room_id, member).await;

    admin_client.approve(room_id, member).await;
    assert_eq!(member_client.recv().await, approved(room_id));

    member_client.join(room_id, member).await;
    let joined = system(&format!("{} joined the room", member));
    assert_eq!(member_client.recv().await, joined);
    assert_eq!(admin_client.recv().await, joined);

    (admin_client, member_client)
}
