use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use tracing::error;

use crate::services::champion_rates::ChampionRatesService;

pub async fn get_champion_rates(
    Extension(service): Extension<Arc<ChampionRatesService>>,
) -> impl IntoResponse {
    match service.fetch_and_transform().await {
        Ok(rates) => (StatusCode::OK, Json(rates)).into_response(),
        Err(e) => {
            error!("Failed to proxy champion rates: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
