use serde::{Deserialize, Serialize};

pub const PICK_SLOTS: usize = 5;
pub const BAN_SLOTS: usize = 5;
pub const TURN_SECONDS: u32 = 30;
pub const MAX_GAMES: u32 = 5;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Bot,
    Support,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChampionStatus {
    #[default]
    None,
    Hover,
    Selected,
    Disabled,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DraftChampion {
    pub id: String,
    pub name: String,
    /* "role" is the wire name the frontend expects, even though it holds
       every lane the champion is eligible for. */
    pub role: Vec<Role>,
    pub status: ChampionStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TeamState {
    pub name: String,
    pub picks: Vec<Option<DraftChampion>>,
    pub bans: Vec<Option<String>>,
    pub previous_picks: Vec<String>,
    pub previous_bans: Vec<String>,
}

impl TeamState {
    pub fn new(name: String) -> Self {
        Self {
            name,
            picks: vec![None; PICK_SLOTS],
            bans: vec![None; BAN_SLOTS],
            previous_picks: vec![],
            previous_bans: vec![],
        }
    }

    /// Empties both slot arrays back to 5 entries each.
    pub fn clear_slots(&mut self) {
        self.picks = vec![None; PICK_SLOTS];
        self.bans = vec![None; BAN_SLOTS];
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DraftPhase {
    Ready,
    Ban,
    Pick,
    End,
    Restart,
    Over,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DraftTurn {
    Blue,
    Red,
    Start,
    End,
}

impl DraftTurn {
    /// blue <-> red; the sentinels map to themselves.
    pub fn opposite(self) -> Self {
        match self {
            DraftTurn::Blue => DraftTurn::Red,
            DraftTurn::Red => DraftTurn::Blue,
            other => other,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "camelCase")]
pub struct DraftOptions {
    #[serde(default)]
    pub is_fearless: bool,
    #[serde(default)]
    pub keep_ban: bool,
    #[serde(default)]
    pub tournament_ban: bool,
    #[serde(default)]
    pub has_timer: bool,
}

/// Full snapshot of one draft. Serialized as-is to every participant after
/// each accepted mutation.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DraftState {
    pub has_timer: bool,
    pub timer: u32,
    pub phase: DraftPhase,
    pub turn: DraftTurn,
    pub game: u32,
    pub chat: Vec<String>,
    pub blue_team: TeamState,
    pub red_team: TeamState,
    pub options: DraftOptions,
    pub disabled_champion_ids: Vec<String>,
}

impl DraftState {
    pub fn new(
        options: DraftOptions,
        blue_team_name: String,
        red_team_name: String,
        disabled_champion_ids: Vec<String>,
    ) -> Self {
        let timer = if options.has_timer { TURN_SECONDS } else { 0 };
        Self {
            has_timer: options.has_timer,
            timer,
            phase: DraftPhase::Ready,
            turn: DraftTurn::Start,
            game: 1,
            chat: vec![],
            blue_team: TeamState::new(blue_team_name),
            red_team: TeamState::new(red_team_name),
            options,
            disabled_champion_ids,
        }
    }
}
