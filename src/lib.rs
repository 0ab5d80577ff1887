pub mod dto {
    pub mod champion_rates_dto;
    pub mod draft_dto;
    pub mod event_dto;
    pub mod lobby_dto;
}

pub mod routes {
    pub mod championrates;
    pub mod lobby;
}

pub mod services {
    pub mod champion_rates;
    pub mod draft;
    pub mod lobby;
    pub mod timer;
    pub mod turn_order;
    pub mod websocket;
}
