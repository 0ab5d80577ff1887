use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, ws::WebSocketUpgrade},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use crate::dto::event_dto::LobbyRole;
use crate::dto::lobby_dto::CreateLobbyRequest;
use crate::services::lobby::LobbyService;
use crate::services::websocket;

/* POST to create a new lobby; responds with the three role-scoped join
   paths. */
pub async fn create_lobby(
    Extension(service): Extension<Arc<LobbyService>>,
    Json(payload): Json<CreateLobbyRequest>,
) -> impl IntoResponse {
    info!(
        blue = %payload.blue_team_name,
        red = %payload.red_team_name,
        "creating lobby"
    );

    let response = service
        .create_lobby(
            payload.options,
            payload.blue_team_name,
            payload.red_team_name,
            payload.champions,
            payload.disabled_champion_ids,
        )
        .await;

    (StatusCode::OK, Json(response))
}

/* GET /ws/lobby/{lobby_id}/{role}: validates the target before upgrading,
   then hands the socket to the fan-out layer. */
pub async fn lobby_websocket(
    ws: WebSocketUpgrade,
    Extension(service): Extension<Arc<LobbyService>>,
    Path((lobby_id, role)): Path<(String, String)>,
) -> impl IntoResponse {
    let Some(lobby) = service.get_lobby(&lobby_id).await else {
        return (StatusCode::NOT_FOUND, "Lobby not found").into_response();
    };
    let Ok(role) = role.parse::<LobbyRole>() else {
        return (StatusCode::BAD_REQUEST, "Invalid role").into_response();
    };

    ws.on_upgrade(move |socket| websocket::handle_socket(socket, lobby, role))
        .into_response()
}
