//! Realtime viewer WebSocket
//!
//! Dashboards connect to `/ws` and receive every [`shared::RealtimeMessage`]
//! the hub publishes. Traffic is one-way; anything a viewer sends besides
//! close frames is ignored.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use crate::core::ServerState;
use shared::util::new_id;

pub fn router() -> Router<ServerState> {
    Router::new().route("/ws", get(upgrade))
}

async fn upgrade(ws: WebSocketUpgrade, State(state): State<ServerState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_viewer(socket, state))
}

async fn handle_viewer(socket: WebSocket, state: ServerState) {
    let viewer_id = new_id();
    state.hub.register_viewer(&viewer_id);

    let (mut sink, mut stream) = socket.split();
    let mut rx = state.hub.subscribe();

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(text) => {
                    if sink.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Slow viewer: drop what it missed, keep the stream alive
                    tracing::warn!(skipped, "Viewer lagging behind broadcast");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = stream.next().await {
            if matches!(msg, Message::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.hub.unregister_viewer(&viewer_id);
}
