use serde::{Deserialize, Serialize};

/// One page of a player's match history as returned by upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchHistoryResponse {
    pub items: Vec<MatchHistoryItem>,
}

/// A single match entry in a player's history, newest first.
///
/// Immutable once returned by upstream; identity is `match_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchHistoryItem {
    pub match_id: String,
    pub competition_id: String,
    pub competition_name: String,
    pub competition_type: String,
    pub organizer_id: String,
    pub finished_at: i64,
}
