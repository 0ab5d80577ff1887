use std::sync::Arc;

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use fearlessdraft_server::routes::{championrates, lobby};
use fearlessdraft_server::services::champion_rates::{ChampionRatesService, DEFAULT_RATES_URL};
use fearlessdraft_server::services::lobby::LobbyService;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let lobby_service = LobbyService::new();
    let champion_rates = Arc::new(ChampionRatesService::new(DEFAULT_RATES_URL.to_string()));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/lobby/create", post(lobby::create_lobby))
        .route("/ws/lobby/{lobby_id}/{role}", get(lobby::lobby_websocket))
        .route("/proxy/championrates", get(championrates::get_champion_rates))
        .layer(Extension(lobby_service))
        .layer(Extension(champion_rates))
        .layer(cors);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
    info!("Started server on :8080.");
    axum::serve(listener, app).await.unwrap();
}
