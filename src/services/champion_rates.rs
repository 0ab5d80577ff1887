use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

use crate::dto::champion_rates_dto::{RemappedChampionRates, UpstreamChampionRates};

pub const DEFAULT_RATES_URL: &str =
    "https://cdn.merakianalytics.com/riot/lol/resources/latest/en-US/championrates.json";

#[derive(Debug, Error)]
pub enum ChampionRatesError {
    #[error("failed to fetch champion rates: {0}")]
    Upstream(#[from] reqwest::Error),
}

/// Proxy for the upstream champion-popularity feed. Only remaps the role
/// vocabulary; draft correctness never depends on it.
pub struct ChampionRatesService {
    client: reqwest::Client,
    data_url: String,
}

impl ChampionRatesService {
    pub fn new(data_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            data_url,
        }
    }

    pub fn map_role(role: &str) -> String {
        match role {
            "TOP" => "top".to_string(),
            "JUNGLE" => "jungle".to_string(),
            "MIDDLE" => "mid".to_string(),
            "BOTTOM" => "bot".to_string(),
            "UTILITY" => "support".to_string(),
            other => {
                warn!(role = %other, "unknown upstream role, passing through");
                other.to_string()
            }
        }
    }

    pub async fn fetch_and_transform(&self) -> Result<RemappedChampionRates, ChampionRatesError> {
        let upstream: UpstreamChampionRates = self
            .client
            .get(&self.data_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut data = HashMap::new();
        for (champion, roles) in upstream.data {
            let remapped = roles
                .into_iter()
                .map(|(role, rate)| (Self::map_role(&role), rate))
                .collect();
            data.insert(champion, remapped);
        }
        Ok(RemappedChampionRates { data })
    }
}
