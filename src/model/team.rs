use serde::{Deserialize, Serialize};

/// Basic profile information for a team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamProfile {
    pub team_id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
}

/// Result page of a team search by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSearchResponse {
    pub items: Vec<TeamProfile>,
}
