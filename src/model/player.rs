use serde::{Deserialize, Serialize};

/// Basic profile information for a player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub player_id: String,
    pub nickname: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub country: String,
}

/// Result page of a player search by nickname.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSearchResponse {
    pub items: Vec<PlayerProfile>,
}
