use serde::{Deserialize, Serialize};

/// Per-competition summary derived from a player's match history.
///
/// Recomputed from a history snapshot on each call, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionInfo {
    pub competition_id: String,
    pub competition_name: String,
    pub competition_type: String,
    pub organizer_id: String,
    pub match_count: u32,
}

/// A player's aggregate performance across one competition.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSeasonStats {
    pub player_id: String,
    pub competition_id: String,
    pub competition_name: String,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    /// Percentage of played matches won, rounded to the nearest integer.
    pub win_rate: u32,
    pub kills: f64,
    pub deaths: f64,
    pub assists: f64,
    pub kd_ratio: f64,
    pub adr: f64,
    pub headshot_pct: f64,
    pub mvps: f64,
    pub multi_kills: MultiKills,
}

/// Multi-kill round counts summed over a season.
#[derive(Debug, Clone, Serialize)]
pub struct MultiKills {
    pub triples: f64,
    pub quads: f64,
    pub aces: f64,
}

impl PlayerSeasonStats {
    /// The defined result for a competition the player has no matches in.
    pub fn empty(player_id: impl Into<String>, competition_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            competition_id: competition_id.into(),
            competition_name: String::new(),
            matches_played: 0,
            wins: 0,
            losses: 0,
            win_rate: 0,
            kills: 0.0,
            deaths: 0.0,
            assists: 0.0,
            kd_ratio: 0.0,
            adr: 0.0,
            headshot_pct: 0.0,
            mvps: 0.0,
            multi_kills: MultiKills {
                triples: 0.0,
                quads: 0.0,
                aces: 0.0,
            },
        }
    }
}
