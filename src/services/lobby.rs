use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time;
use tracing::info;

use crate::dto::draft_dto::{DraftChampion, DraftOptions};
use crate::dto::lobby_dto::Lobby;

const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyCreateResponse {
    pub lobby_id: String,
    pub blue_team_url: String,
    pub red_team_url: String,
    pub spectator_url: String,
}

/// Owns every live lobby. Lookups take the shared lock; creation and the
/// periodic sweep take the exclusive lock.
pub struct LobbyService {
    lobbies: RwLock<HashMap<String, Arc<Lobby>>>,
    lobby_timeout: chrono::Duration,
}

impl LobbyService {
    pub fn new() -> Arc<Self> {
        let service = Arc::new(Self {
            lobbies: RwLock::new(HashMap::new()),
            lobby_timeout: chrono::Duration::minutes(5),
        });
        tokio::spawn(run_sweeper(Arc::clone(&service)));
        service
    }

    pub async fn create_lobby(
        &self,
        options: DraftOptions,
        blue_team_name: String,
        red_team_name: String,
        champions: Vec<DraftChampion>,
        disabled_champion_ids: Vec<String>,
    ) -> LobbyCreateResponse {
        let lobby = Arc::new(Lobby::new(
            options,
            blue_team_name,
            red_team_name,
            champions,
            disabled_champion_ids,
        ));
        let id = lobby.id.clone();

        let mut lobbies = self.lobbies.write().await;
        lobbies.insert(id.clone(), lobby);
        info!(lobby = %id, total = lobbies.len(), "created lobby");

        LobbyCreateResponse {
            lobby_id: id.clone(),
            blue_team_url: format!("/draft/{id}/blue"),
            red_team_url: format!("/draft/{id}/red"),
            spectator_url: format!("/draft/{id}/spectator"),
        }
    }

    pub async fn get_lobby(&self, lobby_id: &str) -> Option<Arc<Lobby>> {
        self.lobbies.read().await.get(lobby_id).cloned()
    }

    /// One garbage-collection pass: drops lobbies with no participants that
    /// have been idle past the timeout. Mid-draft state in an abandoned
    /// lobby is discarded with it; nothing persists.
    pub async fn sweep(&self) {
        let mut lobbies = self.lobbies.write().await;
        let mut expired = Vec::new();
        for (id, lobby) in lobbies.iter() {
            let sessions = lobby.sessions.lock().await;
            if sessions.users.is_empty()
                && Utc::now() - sessions.last_activity > self.lobby_timeout
            {
                expired.push(id.clone());
            }
        }
        for id in expired {
            lobbies.remove(&id);
            info!(lobby = %id, "removed inactive lobby");
        }
    }
}

async fn run_sweeper(service: Arc<LobbyService>) {
    let mut ticker = time::interval(SWEEP_INTERVAL);
    // the first tick completes immediately; skip it
    ticker.tick().await;
    loop {
        ticker.tick().await;
        service.sweep().await;
    }
}
