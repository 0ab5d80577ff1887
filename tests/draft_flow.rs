//! End-to-end draft flows through the registry, state machine, and fan-out.

use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;

use fearlessdraft_server::dto::draft_dto::{DraftOptions, DraftPhase, DraftTurn};
use fearlessdraft_server::dto::event_dto::{Event, EventPayload, EventType, LobbyRole};
use fearlessdraft_server::dto::lobby_dto::{Lobby, UserSession};
use fearlessdraft_server::services::draft::ApplyOutcome;
use fearlessdraft_server::services::lobby::LobbyService;
use fearlessdraft_server::services::websocket;

fn ev(user: DraftTurn, kind: EventType, id: &str) -> Event {
    Event {
        user,
        r#type: kind,
        payload: EventPayload {
            id: id.to_string(),
            name: id.to_string(),
            ..Default::default()
        },
        flag: false,
    }
}

async fn apply(lobby: &Arc<Lobby>, event: Event) -> ApplyOutcome {
    let mut draft = lobby.draft.lock().await;
    draft.apply(&event, &lobby.timer).unwrap()
}

async fn confirm_start(lobby: &Arc<Lobby>) {
    apply(lobby, ev(DraftTurn::Blue, EventType::Start, "")).await;
    apply(lobby, ev(DraftTurn::Red, EventType::Start, "")).await;
}

/// Plays all 20 selections of one game, naming champions `{prefix}1..20`.
async fn play_out_game(lobby: &Arc<Lobby>, prefix: &str) {
    for n in 1..=20 {
        let side = lobby.draft.lock().await.state.turn;
        let outcome = apply(lobby, ev(side, EventType::Select, &format!("{prefix}{n}"))).await;
        assert!(outcome.accepted && outcome.broadcast, "selection {n} stalled");
    }
}

async fn create_lobby(service: &LobbyService, options: DraftOptions) -> Arc<Lobby> {
    let response = service
        .create_lobby(
            options,
            "Cloud9".to_string(),
            "Fnatic".to_string(),
            vec![],
            vec![],
        )
        .await;
    service.get_lobby(&response.lobby_id).await.unwrap()
}

#[tokio::test]
async fn standard_fearless_series_carries_history_and_swaps_sides() {
    let service = LobbyService::new();
    let lobby = create_lobby(
        &service,
        DraftOptions {
            is_fearless: true,
            keep_ban: true,
            has_timer: true,
            ..Default::default()
        },
    )
    .await;

    confirm_start(&lobby).await;
    {
        let draft = lobby.draft.lock().await;
        assert_eq!(draft.state.phase, DraftPhase::Ban);
        assert_eq!(draft.state.turn, DraftTurn::Blue);
        assert_eq!(draft.state.timer, 30);
    }

    play_out_game(&lobby, "g1c").await;
    {
        let draft = lobby.draft.lock().await;
        assert_eq!(draft.state.phase, DraftPhase::End);
        assert_eq!(draft.state.turn, DraftTurn::End);
        assert!(draft.state.blue_team.picks.iter().all(|s| s.is_some()));
        assert!(draft.state.red_team.bans.iter().all(|s| s.is_some()));
    }

    // Blue confirms the finished game, so red holds the restart turn.
    apply(&lobby, ev(DraftTurn::Blue, EventType::Start, "")).await;
    {
        let draft = lobby.draft.lock().await;
        assert_eq!(draft.state.phase, DraftPhase::Restart);
        assert_eq!(draft.state.turn, DraftTurn::Red);
    }

    let mut restart = ev(DraftTurn::Red, EventType::Start, "");
    restart.flag = true;
    apply(&lobby, restart).await;
    {
        let draft = lobby.draft.lock().await;
        assert_eq!(draft.state.phase, DraftPhase::Ready);
        assert_eq!(draft.state.turn, DraftTurn::Start);
        assert_eq!(draft.state.game, 2);
        // sides swapped with the restart flag
        assert_eq!(draft.state.blue_team.name, "Fnatic");
        assert_eq!(draft.state.red_team.name, "Cloud9");
        // fearless + keepBan: five entries of history per team
        assert_eq!(draft.state.blue_team.previous_picks.len(), 5);
        assert_eq!(draft.state.blue_team.previous_bans.len(), 5);
        assert_eq!(draft.state.red_team.previous_picks.len(), 5);
        assert_eq!(draft.state.red_team.previous_bans.len(), 5);
        assert!(draft.state.blue_team.picks.iter().all(|s| s.is_none()));
        assert!(draft.state.red_team.bans.iter().all(|s| s.is_none()));
    }
}

#[tokio::test]
async fn tournament_mode_runs_two_ban_rounds() {
    let service = LobbyService::new();
    let lobby = create_lobby(
        &service,
        DraftOptions {
            tournament_ban: true,
            ..Default::default()
        },
    )
    .await;
    confirm_start(&lobby).await;

    let mut checkpoints = Vec::new();
    for n in 1..=20 {
        let side = lobby.draft.lock().await.state.turn;
        apply(&lobby, ev(side, EventType::Select, &format!("c{n}"))).await;
        let draft = lobby.draft.lock().await;
        checkpoints.push((n, draft.state.phase, draft.state.turn));
    }

    // phase boundaries of the tournament table
    assert_eq!(checkpoints[5].1, DraftPhase::Pick); // after select 6
    assert_eq!(checkpoints[5].2, DraftTurn::Blue);
    assert_eq!(checkpoints[11].1, DraftPhase::Ban); // after select 12
    assert_eq!(checkpoints[11].2, DraftTurn::Red);
    assert_eq!(checkpoints[15].1, DraftPhase::Pick); // after select 16
    assert_eq!(checkpoints[15].2, DraftTurn::Red);
    assert_eq!(checkpoints[19].1, DraftPhase::End); // after select 20
    assert_eq!(checkpoints[19].2, DraftTurn::End);

    let draft = lobby.draft.lock().await;
    // 6 + 4 bans and 6 + 4 picks split across the sides
    let blue_bans = draft.state.blue_team.bans.iter().filter(|s| s.is_some()).count();
    let red_bans = draft.state.red_team.bans.iter().filter(|s| s.is_some()).count();
    assert_eq!(blue_bans + red_bans, 10);
    assert!(draft.state.blue_team.picks.iter().all(|s| s.is_some()));
    assert!(draft.state.red_team.picks.iter().all(|s| s.is_some()));
}

#[tokio::test]
async fn a_series_ends_after_game_five() {
    let service = LobbyService::new();
    let lobby = create_lobby(&service, DraftOptions::default()).await;

    for game in 1..=4 {
        confirm_start(&lobby).await;
        play_out_game(&lobby, &format!("g{game}c")).await;
        // red confirms the finish, blue restarts without a swap
        apply(&lobby, ev(DraftTurn::Red, EventType::Start, "")).await;
        apply(&lobby, ev(DraftTurn::Blue, EventType::Start, "")).await;
        assert_eq!(lobby.draft.lock().await.state.game, game + 1);
    }

    confirm_start(&lobby).await;
    play_out_game(&lobby, "g5c").await;
    apply(&lobby, ev(DraftTurn::Red, EventType::Start, "")).await;

    let draft = lobby.draft.lock().await;
    assert_eq!(draft.state.phase, DraftPhase::Over);
    assert_eq!(draft.state.game, 5);
}

#[tokio::test]
async fn snapshots_reach_every_seat_after_a_mutation() {
    let service = LobbyService::new();
    let lobby = create_lobby(&service, DraftOptions::default()).await;

    let mut receivers = Vec::new();
    {
        let mut sessions = lobby.sessions.lock().await;
        for role in [LobbyRole::Blue, LobbyRole::Red, LobbyRole::Spectator] {
            let (tx, rx) = mpsc::unbounded_channel();
            sessions.add(UserSession {
                id: Uuid::new_v4(),
                role,
                tx,
            });
            receivers.push(rx);
        }
    }

    let outcome = apply(&lobby, ev(DraftTurn::Blue, EventType::Start, "")).await;
    assert!(outcome.broadcast);
    websocket::broadcast_state(&lobby).await;

    for rx in receivers.iter_mut() {
        let frame = rx.recv().await.unwrap();
        let snapshot: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(snapshot["turn"], "red");
        assert_eq!(snapshot["phase"], "ready");
    }
}
