//! WebSocket connection handlers.
//!
//! Each connection owns its `ConnectionSession`. Inbound frames are handled one
//! at a time in arrival order; outbound notifications are forwarded from the
//! connection's channel by a separate pusher task.

use std::{fmt::Debug, sync::Arc};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ConnectionSession, Notification, ValueObjectError},
    infrastructure::dto::websocket::{ClientMessage, ServerMessage},
    ui::state::AppState,
    usecase::AdmissionError,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that forwards notifications from `rx` to the WebSocket sender.
///
/// The task ends when the channel closes or a send to the peer fails.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<Notification>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(notification) = rx.recv().await {
            let json = match serde_json::to_string(&ServerMessage::from(notification)) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize outbound event: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    let mut session = state.connect_usecase.execute(tx).await;
    tracing::info!("Connection {} opened", session.id());

    let mut send_task = pusher_loop(rx, sender);

    loop {
        tokio::select! {
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    handle_text(&state, &mut session, text.as_str()).await;
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::debug!("Connection {} requested close", session.id());
                    break;
                }
                // Ping/pong is handled by the WebSocket protocol
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("WebSocket error on connection {}: {}", session.id(), e);
                    break;
                }
            },
            _ = &mut send_task => break,
        }
    }
    send_task.abort();

    let connection_id = session.id();
    let outcome = state.disconnect_usecase.execute(session).await;
    tracing::info!("Connection {} closed ({:?})", connection_id, outcome);
}

/// Dispatch one inbound frame. Failures are logged and never sent back to the peer.
async fn handle_text(state: &AppState, session: &mut ConnectionSession, text: &str) {
    let event = match serde_json::from_str::<ClientMessage>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Dropping malformed frame from {}: {}", session.id(), e);
            return;
        }
    };

    match event {
        ClientMessage::JoinRoom(payload) => {
            let Some((room_id, username)) = validated(session, "join-room", payload.into_domain())
            else {
                return;
            };
            let member_state = state
                .join_room_usecase
                .execute(session, room_id, username)
                .await;
            tracing::debug!("join-room on {} -> {:?}", session.id(), member_state);
        }
        ClientMessage::ApproveUser(payload) => {
            let Some((room_id, username)) =
                validated(session, "approve-user", payload.into_domain())
            else {
                return;
            };
            let result = state
                .approve_user_usecase
                .execute(session, room_id, username)
                .await;
            report(session, "approve-user", result);
        }
        ClientMessage::RejectUser(payload) => {
            let Some((room_id, username)) = validated(session, "reject-user", payload.into_domain())
            else {
                return;
            };
            let result = state
                .reject_user_usecase
                .execute(session, room_id, username)
                .await;
            report(session, "reject-user", result);
        }
        ClientMessage::ChatMessage(payload) => {
            let Some(body) = validated(session, "chat-message", payload.into_domain()) else {
                return;
            };
            let result = state.send_message_usecase.execute(session, body).await;
            report(session, "chat-message", result);
        }
        ClientMessage::CloseRoom(payload) => {
            let Some(room_id) = validated(session, "close-room", payload.into_domain()) else {
                return;
            };
            let result = state.close_room_usecase.execute(session, room_id).await;
            report(session, "close-room", result);
        }
    }
}

fn validated<T>(
    session: &ConnectionSession,
    event: &str,
    result: Result<T, ValueObjectError>,
) -> Option<T> {
    result
        .inspect_err(|e| {
            tracing::warn!("Dropping {} from {}: {}", event, session.id(), e);
        })
        .ok()
}

fn report<T: Debug>(session: &ConnectionSession, event: &str, result: Result<T, AdmissionError>) {
    match result {
        Ok(value) => tracing::debug!("{} on {} -> {:?}", event, session.id(), value),
        Err(e @ AdmissionError::Unauthorized { .. }) => {
            tracing::warn!("Rejected {} from {}: {}", event, session.id(), e);
        }
        Err(e) => tracing::debug!("Ignored {} from {}: {}", event, session.id(), e),
    }
}
