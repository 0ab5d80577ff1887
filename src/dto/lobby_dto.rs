use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::dto::draft_dto::{DraftChampion, DraftOptions, DraftState};
use crate::dto::event_dto::LobbyRole;
use crate::services::draft::DraftService;
use crate::services::timer::TimerHandle;

/// One connected participant: its seat and the channel its writer task
/// drains into the socket.
pub struct UserSession {
    pub id: Uuid,
    pub role: LobbyRole,
    pub tx: UnboundedSender<String>,
}

/// The connection roster for one lobby, guarded by the lobby's session lock.
pub struct SessionSet {
    pub users: HashMap<Uuid, UserSession>,
    pub last_activity: DateTime<Utc>,
}

impl SessionSet {
    fn new() -> Self {
        Self {
            users: HashMap::new(),
            last_activity: Utc::now(),
        }
    }

    pub fn add(&mut self, user: UserSession) {
        self.users.insert(user.id, user);
        self.last_activity = Utc::now();
    }

    pub fn remove(&mut self, id: Uuid) {
        if self.users.remove(&id).is_some() {
            self.last_activity = Utc::now();
        }
    }
}

/// One draft session. The draft lock guards the state machine (snapshot +
/// turn counter); the session lock guards the roster; the timer handle has
/// its own lock and is only ever taken as a leaf.
pub struct Lobby {
    pub id: String,
    pub has_timer: bool,
    pub champions: Vec<DraftChampion>,
    pub sessions: Mutex<SessionSet>,
    pub draft: Mutex<DraftService>,
    pub timer: TimerHandle,
}

impl Lobby {
    pub fn new(
        options: DraftOptions,
        blue_team_name: String,
        red_team_name: String,
        champions: Vec<DraftChampion>,
        disabled_champion_ids: Vec<String>,
    ) -> Self {
        let state = DraftState::new(options, blue_team_name, red_team_name, disabled_champion_ids);
        Self {
            id: Uuid::new_v4().to_string(),
            has_timer: options.has_timer,
            champions,
            sessions: Mutex::new(SessionSet::new()),
            draft: Mutex::new(DraftService::new(state)),
            timer: TimerHandle::new(),
        }
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.users.is_empty()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLobbyRequest {
    pub blue_team_name: String,
    pub red_team_name: String,
    #[serde(default)]
    pub options: DraftOptions,
    #[serde(default)]
    pub champions: Vec<DraftChampion>,
    #[serde(default)]
    pub disabled_champion_ids: Vec<String>,
}
