use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::{broadcast::error::RecvError, mpsc};

use crate::application::ports::PatchRepository;
use crate::application::{SewError, SewPatchCommand, SewPatchUseCase};
use crate::domain::ClientId;
use crate::infrastructure::{BroadcastEventPublisher, ConnectionRegistry};

use super::message::{ClientMessage, ServerMessage};

/// Per-connection outbound queue depth
const OUTBOUND_BUFFER: usize = 64;

type SewPatch = SewPatchUseCase<dyn PatchRepository, BroadcastEventPublisher>;

/// WebSocket connection state
///
/// One `SewPatchUseCase` is shared by every connection so that patches are
/// broadcast in the order they were stored.
pub struct WsState {
    pub sew_patch: SewPatch,
    pub event_publisher: Arc<BroadcastEventPublisher>,
    pub connections: Arc<ConnectionRegistry>,
}

impl WsState {
    pub fn new(
        patch_repo: Arc<dyn PatchRepository>,
        event_publisher: Arc<BroadcastEventPublisher>,
        connections: Arc<ConnectionRegistry>,
    ) -> Self {
        WsState {
            sew_patch: SewPatchUseCase::new(patch_repo, Arc::clone(&event_publisher)),
            event_publisher,
            connections,
        }
    }
}

/// Handle WebSocket upgrade
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<WsState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<WsState>) {
    // Subscribe before registering: a counted client always receives updates
    let mut events = state.event_publisher.subscribe();

    let client_id = state.connections.register();
    tracing::info!(
        %client_id,
        clients = state.connections.len(),
        "Client connected"
    );

    let (mut sender, mut receiver) = socket.split();

    // Channel for outgoing messages
    let (tx, mut rx) = mpsc::channel::<String>(OUTBOUND_BUFFER);

    // Spawn task to forward messages to WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Spawn task to forward broadcast events
    let event_tx = tx.clone();
    let forward_task = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    let Some(json) = encode(&ServerMessage::from_event(&event)) else {
                        continue;
                    };
                    if event_tx.send(json).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(%client_id, skipped, "Client lagging, updates dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Handle incoming messages
    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => {
                let reply = handle_text(&state.sew_patch, client_id, text.as_str()).await;
                if let Some(json) = reply.as_ref().and_then(encode) {
                    let _ = tx.send(json).await;
                }
            }
            Message::Close(_) => break,
            // Binary, ping and pong carry nothing for us
            _ => {}
        }
    }

    // Cleanup
    let session_secs = state
        .connections
        .unregister(client_id)
        .map(|info| info.session_length().num_seconds())
        .unwrap_or_default();
    tracing::info!(
        %client_id,
        session_secs,
        clients = state.connections.len(),
        "Client disconnected"
    );

    forward_task.abort();
    drop(tx);
    let _ = send_task.await;
}

/// Process one text frame; returns a reply meant for this client only
async fn handle_text(
    use_case: &SewPatch,
    client_id: ClientId,
    text: &str,
) -> Option<ServerMessage> {
    let request = match serde_json::from_str::<ClientMessage>(text) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(%client_id, error = %e, "Rejected malformed frame");
            return Some(ServerMessage::error(format!("Invalid message: {}", e)));
        }
    };

    match request {
        ClientMessage::NewPatch(payload) => {
            let command = SewPatchCommand {
                color: payload.color,
                message: payload.message,
                ai_line: payload.ai_line,
            };

            // Success is acknowledged by the broadcast itself
            match use_case.execute(command).await {
                Ok(_) => None,
                Err(SewError::Invalid(e)) => {
                    tracing::warn!(%client_id, error = %e, "Rejected patch");
                    Some(ServerMessage::error(e.to_string()))
                }
                Err(SewError::Storage(_)) => {
                    Some(ServerMessage::error("Patch could not be saved"))
                }
            }
        }
    }
}

fn encode(message: &ServerMessage) -> Option<String> {
    serde_json::to_string(message)
        .map_err(|e| tracing::error!(error = %e, "Failed to encode message"))
        .ok()
}
