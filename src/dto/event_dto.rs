use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dto::draft_dto::{ChampionStatus, DraftTurn, Role};

/// Which seat a connection occupies inside a lobby.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LobbyRole {
    Blue,
    Red,
    Spectator,
}

impl FromStr for LobbyRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blue" => Ok(LobbyRole::Blue),
            "red" => Ok(LobbyRole::Red),
            "spectator" => Ok(LobbyRole::Spectator),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    #[serde(rename = "START")]
    Start,
    #[serde(rename = "HOVER")]
    Hover,
    #[serde(rename = "SELECT")]
    Select,
    #[serde(rename = "TIMEOUT")]
    Timeout,
    #[serde(rename = "MESSAGE")]
    Message,
    /* Anything else still deserializes, so the state machine can reject it
       with a real error instead of the read loop dropping the frame. */
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct EventPayload {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Vec<Role>,
    #[serde(default)]
    pub status: ChampionStatus,
}

/// One inbound frame from a participant. Consumed once by the state machine.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Event {
    pub user: DraftTurn,
    pub r#type: EventType,
    #[serde(default)]
    pub payload: EventPayload,
    #[serde(default)]
    pub flag: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_role_tokens() {
        assert_eq!("blue".parse(), Ok(LobbyRole::Blue));
        assert_eq!("red".parse(), Ok(LobbyRole::Red));
        assert_eq!("spectator".parse(), Ok(LobbyRole::Spectator));
        assert!("coach".parse::<LobbyRole>().is_err());
    }

    #[test]
    fn decodes_a_select_frame() {
        let raw = r#"{
            "user": "blue",
            "type": "SELECT",
            "payload": { "id": "266", "name": "Aatrox", "role": ["top"], "status": "none" },
            "flag": false
        }"#;
        let event: Event = serde_json::from_str(raw).unwrap();

        assert_eq!(event.user, DraftTurn::Blue);
        assert_eq!(event.r#type, EventType::Select);
        assert_eq!(event.payload.id, "266");
        assert_eq!(event.payload.role, vec![Role::Top]);
    }

    #[test]
    fn missing_payload_defaults_to_empty() {
        let event: Event =
            serde_json::from_str(r#"{ "user": "start", "type": "START", "flag": true }"#).unwrap();
        assert!(event.payload.id.is_empty());
        assert!(event.flag);
    }

    #[test]
    fn unknown_kind_still_decodes() {
        let event: Event =
            serde_json::from_str(r#"{ "user": "blue", "type": "DANCE" }"#).unwrap();
        assert_eq!(event.r#type, EventType::Unknown);
    }
}
