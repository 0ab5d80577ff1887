use thiserror::Error;
use tracing::warn;

use crate::dto::draft_dto::{
    ChampionStatus, DraftChampion, DraftPhase, DraftState, DraftTurn, MAX_GAMES, TURN_SECONDS,
    TeamState,
};
use crate::dto::event_dto::{Event, EventType};
use crate::services::timer::TimerHandle;
use crate::services::turn_order;

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("unrecognized event kind")]
    UnrecognizedEventKind,
}

/// What the fan-out layer should do after an event was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub accepted: bool,
    pub broadcast: bool,
    pub arm_timer: bool,
}

impl ApplyOutcome {
    /// Wrong side, or an event that is illegal in the current phase.
    fn rejected() -> Self {
        Self {
            accepted: false,
            broadcast: false,
            arm_timer: false,
        }
    }

    /// Accepted without touching the state; nothing to push.
    fn quiet() -> Self {
        Self {
            accepted: true,
            broadcast: false,
            arm_timer: false,
        }
    }

    /// State changed; push a snapshot but leave the countdown alone.
    fn changed() -> Self {
        Self {
            accepted: true,
            broadcast: true,
            arm_timer: false,
        }
    }

    /// The turn advanced; push a snapshot and restart the countdown.
    fn advanced() -> Self {
        Self {
            accepted: true,
            broadcast: true,
            arm_timer: true,
        }
    }
}

/// The per-lobby state machine. Owns the draft snapshot and the turn
/// counter driving the turn-order tables; every mutation goes through
/// [`DraftService::apply`] under the lobby's draft lock.
pub struct DraftService {
    pub state: DraftState,
    turn_counter: u32,
}

impl DraftService {
    pub fn new(state: DraftState) -> Self {
        Self {
            state,
            turn_counter: 1,
        }
    }

    pub fn turn_counter(&self) -> u32 {
        self.turn_counter
    }

    /// Validates and applies one event. Only events from the side holding
    /// the turn are admitted, except under the `start`/`end` sentinels,
    /// which both sides use for mutual confirmation.
    pub fn apply(&mut self, event: &Event, timer: &TimerHandle) -> Result<ApplyOutcome, DraftError> {
        let turn = self.state.turn;
        if turn != event.user && turn != DraftTurn::Start && turn != DraftTurn::End {
            return Ok(ApplyOutcome::rejected());
        }

        match event.r#type {
            EventType::Start => Ok(self.handle_start(event)),
            EventType::Hover => {
                if self.state.phase == DraftPhase::Pick {
                    Ok(self.handle_hover(event))
                } else {
                    Ok(ApplyOutcome::rejected())
                }
            }
            EventType::Select => {
                // Stop the countdown before touching the state, so a tick
                // cannot land between the transition and the re-arm.
                timer.cancel();
                Ok(self.handle_select(event))
            }
            EventType::Timeout => {
                self.state.timer = TURN_SECONDS;
                Ok(ApplyOutcome::changed())
            }
            // Reserved for chat.
            EventType::Message => Ok(ApplyOutcome::quiet()),
            EventType::Unknown => Err(DraftError::UnrecognizedEventKind),
        }
    }

    fn handle_start(&mut self, event: &Event) -> ApplyOutcome {
        match self.state.phase {
            DraftPhase::Ready => {
                if self.state.turn == DraftTurn::Start {
                    // First confirmation: hand the handshake to the other
                    // side and wait for it to press start too. Only a team
                    // side can confirm; sentinel users leave it untouched.
                    match event.user {
                        DraftTurn::Blue | DraftTurn::Red => {
                            self.state.turn = event.user.opposite();
                            ApplyOutcome::changed()
                        }
                        _ => ApplyOutcome::quiet(),
                    }
                } else {
                    self.state.turn = DraftTurn::Blue;
                    self.state.phase = DraftPhase::Ban;
                    self.state.timer = TURN_SECONDS;
                    ApplyOutcome::advanced()
                }
            }
            DraftPhase::End => {
                self.state.turn = event.user.opposite();
                self.state.phase = if self.state.game < MAX_GAMES {
                    DraftPhase::Restart
                } else {
                    DraftPhase::Over
                };
                ApplyOutcome::changed()
            }
            DraftPhase::Restart => {
                if self.state.game < MAX_GAMES {
                    self.restart(event.flag);
                    ApplyOutcome::changed()
                } else {
                    ApplyOutcome::quiet()
                }
            }
            _ => ApplyOutcome::quiet(),
        }
    }

    fn handle_hover(&mut self, event: &Event) -> ApplyOutcome {
        let champion = DraftChampion {
            id: event.payload.id.clone(),
            name: event.payload.name.clone(),
            role: event.payload.role.clone(),
            status: ChampionStatus::Hover,
        };

        let team = self.team_for_mut(event.user);
        if !place_champion(&mut team.picks, champion) {
            warn!(side = ?event.user, champion = %event.payload.id, "no pick slot left to hover");
            return ApplyOutcome::quiet();
        }
        ApplyOutcome::changed()
    }

    fn handle_select(&mut self, event: &Event) -> ApplyOutcome {
        let ban_phase = self.state.phase == DraftPhase::Ban;

        let updated = if ban_phase {
            let id = event.payload.id.clone();
            let team = self.team_for_mut(event.user);
            place_ban(&mut team.bans, id)
        } else {
            let champion = DraftChampion {
                id: event.payload.id.clone(),
                name: event.payload.name.clone(),
                role: event.payload.role.clone(),
                status: ChampionStatus::Selected,
            };
            let team = self.team_for_mut(event.user);
            place_champion(&mut team.picks, champion)
        };

        if !updated {
            warn!(
                side = ?event.user,
                champion = %event.payload.id,
                ban_phase,
                "no open slot for selection"
            );
            return ApplyOutcome::quiet();
        }

        self.turn_counter += 1;
        let tournament = self.state.options.tournament_ban;
        self.state.phase = turn_order::phase_for(tournament, self.turn_counter);
        self.state.turn = turn_order::turn_for(tournament, self.turn_counter);
        self.state.timer = TURN_SECONDS;
        ApplyOutcome::advanced()
    }

    /// Rolls the lobby into the next game: optional side swap, fearless
    /// carry-over, fresh slots, turn counter back to 1.
    fn restart(&mut self, switch_side: bool) {
        let state = &mut self.state;
        if switch_side {
            std::mem::swap(&mut state.blue_team, &mut state.red_team);
        }

        if state.options.is_fearless {
            let keep_ban = state.options.keep_ban;
            carry_over(&mut state.blue_team, keep_ban);
            carry_over(&mut state.red_team, keep_ban);
        }

        state.blue_team.clear_slots();
        state.red_team.clear_slots();
        state.phase = DraftPhase::Ready;
        state.turn = DraftTurn::Start;
        state.game += 1;
        self.turn_counter = 1;
    }

    fn team_for_mut(&mut self, side: DraftTurn) -> &mut TeamState {
        if side == DraftTurn::Blue {
            &mut self.state.blue_team
        } else {
            &mut self.state.red_team
        }
    }
}

/// Replaces the most recent hover slot, falling back to the first empty
/// slot. Returns false when all five slots are already locked in.
fn place_champion(picks: &mut [Option<DraftChampion>], champion: DraftChampion) -> bool {
    if let Some(slot) = picks
        .iter_mut()
        .find(|slot| slot.as_ref().is_some_and(|c| c.status == ChampionStatus::Hover))
    {
        *slot = Some(champion);
        return true;
    }
    if let Some(slot) = picks.iter_mut().find(|slot| slot.is_none()) {
        *slot = Some(champion);
        return true;
    }
    false
}

fn place_ban(bans: &mut [Option<String>], id: String) -> bool {
    if let Some(slot) = bans.iter_mut().find(|slot| slot.is_none()) {
        *slot = Some(id);
        return true;
    }
    false
}

/// Appends this game's picks (and optionally bans) to the team history,
/// writing "none" for slots that were never filled.
fn carry_over(team: &mut TeamState, keep_ban: bool) {
    let picks: Vec<String> = team
        .picks
        .iter()
        .map(|slot| {
            slot.as_ref()
                .map_or_else(|| "none".to_string(), |champ| champ.id.clone())
        })
        .collect();
    team.previous_picks.extend(picks);

    if keep_ban {
        let bans: Vec<String> = team
            .bans
            .iter()
            .map(|slot| slot.clone().unwrap_or_else(|| "none".to_string()))
            .collect();
        team.previous_bans.extend(bans);
    }
}
