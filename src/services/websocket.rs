use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::dto::draft_dto::DraftTurn;
use crate::dto::event_dto::{Event, LobbyRole};
use crate::dto::lobby_dto::{Lobby, UserSession};
use crate::services::timer;

/// Serializes the current snapshot and pushes it to every participant of
/// the lobby. A participant whose channel has closed is deregistered;
/// delivery to the rest continues.
pub async fn broadcast_state(lobby: &Lobby) {
    let Some(snapshot) = snapshot_json(lobby).await else {
        return;
    };

    let mut sessions = lobby.sessions.lock().await;
    let mut dropped = Vec::new();
    for (id, user) in sessions.users.iter() {
        if user.tx.send(snapshot.clone()).is_err() {
            dropped.push(*id);
        }
    }
    for id in dropped {
        warn!(lobby = %lobby.id, user = %id, "dropping unreachable participant");
        sessions.remove(id);
    }
}

async fn snapshot_json(lobby: &Lobby) -> Option<String> {
    let draft = lobby.draft.lock().await;
    match serde_json::to_string(&draft.state) {
        Ok(json) => Some(json),
        Err(e) => {
            error!(lobby = %lobby.id, error = %e, "failed to serialize draft state");
            None
        }
    }
}

/// Runs one participant's connection: registers it, sends the current
/// snapshot, then feeds inbound events to the state machine until the
/// socket closes.
pub async fn handle_socket(socket: WebSocket, lobby: Arc<Lobby>, role: LobbyRole) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    // Writer task: drains this session's channel into the socket.
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    let user_id = Uuid::new_v4();
    {
        let mut sessions = lobby.sessions.lock().await;
        sessions.add(UserSession {
            id: user_id,
            role,
            tx: tx.clone(),
        });
    }
    info!(lobby = %lobby.id, user = %user_id, ?role, "participant joined");

    if let Some(snapshot) = snapshot_json(&lobby).await {
        let _ = tx.send(snapshot);
    }

    while let Some(Ok(message)) = receiver.next().await {
        match message {
            Message::Text(text) => process_message(&lobby, role, text.as_str()).await,
            Message::Close(_) => break,
            _ => {}
        }
    }

    lobby.sessions.lock().await.remove(user_id);
    info!(lobby = %lobby.id, user = %user_id, "participant left");
    send_task.abort();
}

async fn process_message(lobby: &Arc<Lobby>, role: LobbyRole, raw: &str) {
    let event: Event = match serde_json::from_str(raw) {
        Ok(event) => event,
        Err(e) => {
            warn!(lobby = %lobby.id, error = %e, "discarding malformed event");
            return;
        }
    };

    // A team connection may only submit events as its own side.
    let impersonating = match role {
        LobbyRole::Blue => event.user != DraftTurn::Blue,
        LobbyRole::Red => event.user != DraftTurn::Red,
        LobbyRole::Spectator => false,
    };
    if impersonating {
        warn!(lobby = %lobby.id, ?role, user = ?event.user, "event does not match connection side");
        return;
    }

    let outcome = {
        let mut draft = lobby.draft.lock().await;
        draft.apply(&event, &lobby.timer)
    };
    match outcome {
        Ok(outcome) => {
            if outcome.broadcast {
                broadcast_state(lobby).await;
            }
            if outcome.arm_timer {
                timer::arm(lobby).await;
            }
        }
        // Unknown event kinds are logged and the read loop carries on.
        Err(e) => error!(lobby = %lobby.id, error = %e, "failed to process draft event"),
    }
}
