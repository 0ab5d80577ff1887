use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct RoleRate {
    #[serde(rename = "playRate")]
    pub play_rate: f64,
}

/// The upstream feed: champion id -> upstream role name -> play rate.
#[derive(Debug, Deserialize)]
pub struct UpstreamChampionRates {
    pub data: HashMap<String, HashMap<String, RoleRate>>,
}

/// Same shape with the role vocabulary remapped for the draft frontend.
#[derive(Debug, Serialize)]
pub struct RemappedChampionRates {
    pub data: HashMap<String, HashMap<String, RoleRate>>,
}
