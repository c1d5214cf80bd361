use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Full per-match statistics as returned by `GET /matches/{id}/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchStatsResponse {
    pub rounds: Vec<MatchRound>,
}

/// One played round set (best-of entry) within a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRound {
    pub teams: Vec<MatchTeamStats>,
}

/// One team's side of a round, with per-player stat lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchTeamStats {
    pub players: Vec<PlayerMatchStats>,
}

/// A single player's raw stat line for one match.
///
/// Upstream reports every numeric/boolean field as a string, e.g.
/// `"Kills": "23"`, `"Result": "1"`, `"K/D Ratio": "1.53"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerMatchStats {
    pub player_id: String,
    #[serde(default)]
    pub player_stats: HashMap<String, String>,
}
