//! WebSocket handler for search-as-you-type
//!
//! Each connection owns one debounced search session. Keystrokes arrive as
//! `input` messages and every session state change is pushed back.

use axum::{
    extract::{
        ws::{Message as WsMessage, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::server::AppState;
use crate::search::{SearchSession, SearchTab, SessionState};

/// WebSocket message from client
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ClientMessage {
    /// Full text of the search box after a keystroke
    #[serde(rename = "input")]
    Input { query: String },

    #[serde(rename = "tab")]
    Tab { tab: SearchTab },
}

/// WebSocket message to client
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum ServerMessage {
    #[serde(rename = "state")]
    State { state: SessionState },

    #[serde(rename = "error")]
    Error { message: String },
}

/// WebSocket upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn send<S>(sender: &mut S, msg: &ServerMessage) -> bool
where
    S: SinkExt<WsMessage> + Unpin,
{
    match serde_json::to_string(msg) {
        Ok(json) => sender.send(WsMessage::Text(json)).await.is_ok(),
        Err(e) => {
            warn!("Failed to serialize message: {}", e);
            true
        }
    }
}

/// Handle WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    info!("New search WebSocket connection");

    let (mut sender, mut receiver) = socket.split();
    let session = SearchSession::new(Arc::clone(&state.search), state.debounce);
    let mut updates = session.subscribe();

    loop {
        tokio::select! {
            msg = receiver.next() => {
                let text = match msg {
                    Some(Ok(WsMessage::Text(text))) => text,
                    Some(Ok(WsMessage::Close(_))) | None => break,
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        warn!("WebSocket receive error: {}", e);
                        break;
                    }
                };

                debug!("Received message: {}", text);

                match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::Input { query }) => session.input(&query),
                    Ok(ClientMessage::Tab { tab }) => session.switch_tab(tab),
                    Err(e) => {
                        let error_msg = ServerMessage::Error {
                            message: format!("Invalid message format: {}", e),
                        };
                        if !send(&mut sender, &error_msg).await {
                            break;
                        }
                    }
                }
            }

            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = updates.borrow_and_update().clone();
                if !send(&mut sender, &ServerMessage::State { state: current }).await {
                    break;
                }
            }
        }
    }

    info!("Search WebSocket connection closed");
}
