//! Realtime comment push.
//!
//! One process-wide broadcast channel carries every new comment; each
//! WebSocket connection is tagged with its caller's tenant at upgrade
//! time and forwards only events for that tenant, so a comment never
//! reaches a viewer from another client organization.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

use crate::auth::TenantContext;
use crate::shared::models::CommentWithUser;
use crate::shared::state::AppState;

/// Frames exchanged over `/ws`. Clients send liveness probes; the
/// server answers them and pushes comment notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    Ping,
    Pong,
    NewComment { data: CommentWithUser },
}

/// A comment event tagged with the tenant it belongs to.
#[derive(Debug, Clone)]
pub struct CommentEvent {
    pub client_id: String,
    pub message: WsMessage,
}

#[derive(Clone)]
pub struct CommentHub {
    tx: broadcast::Sender<CommentEvent>,
}

impl CommentHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1000);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CommentEvent> {
        self.tx.subscribe()
    }

    /// Fan a freshly created comment out to connected viewers. A send
    /// with no open connections is not an error.
    pub fn broadcast_comment(&self, comment: CommentWithUser) {
        let event = CommentEvent {
            client_id: comment.comment.client_id.clone(),
            message: WsMessage::NewComment { data: comment },
        };
        let _ = self.tx.send(event);
    }
}

impl Default for CommentHub {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CommentHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentHub")
            .field("receivers", &self.tx.receiver_count())
            .finish()
    }
}

/// GET /ws — upgrade to the realtime channel. The tenant resolved here
/// decides which comment events this connection will see.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, ctx))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, ctx: TenantContext) {
    tracing::info!("WebSocket client connected for tenant {}", ctx.client_id);

    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.comment_hub.subscribe();
    let (reply_tx, mut reply_rx) = mpsc::channel::<WsMessage>(8);
    let client_id = ctx.client_id.clone();

    // Forward task: merges direct replies (pong) with tenant-filtered
    // broadcast events onto this connection's sink.
    let send_task = tokio::spawn(async move {
        loop {
            let msg = tokio::select! {
                reply = reply_rx.recv() => match reply {
                    Some(msg) => msg,
                    None => break,
                },
                event = rx.recv() => match event {
                    Ok(event) if event.client_id == client_id => event.message,
                    Ok(_) => continue,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!("WebSocket receiver lagged, skipped {skipped} events");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            };
            if let Ok(json) = serde_json::to_string(&msg) {
                if sender.send(Message::Text(json)).await.is_err() {
                    break;
                }
            }
        }
    });

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<WsMessage>(&text) {
                Ok(WsMessage::Ping) => {
                    let _ = reply_tx.send(WsMessage::Pong).await;
                }
                Ok(_) => {}
                Err(e) => {
                    // Malformed frames are logged, never fatal.
                    tracing::warn!("WebSocket message error: {e}");
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("WebSocket receive error: {e}");
                break;
            }
        }
    }

    send_task.abort();
    tracing::info!("WebSocket client disconnected for tenant {}", ctx.client_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{Comment, User};
    use chrono::Utc;

    fn sample_comment(client_id: &str) -> CommentWithUser {
        let now = Utc::now();
        CommentWithUser {
            comment: Comment {
                id: 1,
                client_id: client_id.to_string(),
                user_id: "u1".to_string(),
                content: "hello".to_string(),
                created_at: now,
            },
            user: User {
                id: "u1".to_string(),
                email: Some("ana@acme.test".to_string()),
                first_name: Some("Ana".to_string()),
                last_name: None,
                profile_image_url: None,
                role: "client".to_string(),
                client_id: Some(client_id.to_string()),
                created_at: now,
                updated_at: now,
            },
        }
    }

    #[test]
    fn ping_and_pong_frames() {
        let ping: WsMessage = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert!(matches!(ping, WsMessage::Ping));
        assert_eq!(
            serde_json::to_string(&WsMessage::Pong).unwrap(),
            r#"{"type":"pong"}"#
        );
    }

    #[test]
    fn new_comment_frame_carries_comment_and_author() {
        let msg = WsMessage::NewComment {
            data: sample_comment("acme"),
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "new_comment");
        assert_eq!(value["data"]["content"], "hello");
        assert_eq!(value["data"]["user"]["firstName"], "Ana");
    }

    #[tokio::test]
    async fn every_subscriber_receives_each_comment_once() {
        let hub = CommentHub::new();
        let mut a = hub.subscribe();
        let mut b = hub.subscribe();

        hub.broadcast_comment(sample_comment("acme"));

        let got_a = a.recv().await.unwrap();
        let got_b = b.recv().await.unwrap();
        assert_eq!(got_a.client_id, "acme");
        assert_eq!(got_b.client_id, "acme");
        assert!(a.try_recv().is_err());
        assert!(b.try_recv().is_err());
    }

    #[tokio::test]
    async fn events_carry_the_comment_tenant() {
        let hub = CommentHub::new();
        let mut rx = hub.subscribe();

        hub.broadcast_comment(sample_comment("acme"));
        hub.broadcast_comment(sample_comment("globex"));

        assert_eq!(rx.recv().await.unwrap().client_id, "acme");
        assert_eq!(rx.recv().await.unwrap().client_id, "globex");
    }
}
