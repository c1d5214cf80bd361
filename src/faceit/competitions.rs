use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::cache::CacheLayer;
use crate::error::Result;
use crate::faceit::{history, Transport, ESEA_ORGANIZER_ID};
use crate::model::{CompetitionInfo, MatchHistoryItem};

/// Exact-match filter applied to history items before grouping.
#[derive(Debug, Clone, Default)]
pub struct CompetitionFilter {
    pub organizer_id: Option<String>,
    pub competition_type: Option<String>,
}

impl CompetitionFilter {
    fn matches(&self, item: &MatchHistoryItem) -> bool {
        self.organizer_id
            .as_ref()
            .is_none_or(|organizer| *organizer == item.organizer_id)
            && self
                .competition_type
                .as_ref()
                .is_none_or(|kind| *kind == item.competition_type)
    }
}

/// Fold a history snapshot into one summary per competition.
///
/// The first occurrence of a competition id seeds its entry; later matches
/// only bump `match_count`. Emitted order follows first-seen order in the
/// history, which upstream returns newest first.
fn group_competitions(
    history: &[MatchHistoryItem],
    filter: &CompetitionFilter,
) -> Vec<CompetitionInfo> {
    let mut grouped: Vec<CompetitionInfo> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for item in history.iter().filter(|item| filter.matches(item)) {
        match index.get(item.competition_id.as_str()) {
            Some(&position) => grouped[position].match_count += 1,
            None => {
                index.insert(&item.competition_id, grouped.len());
                grouped.push(CompetitionInfo {
                    competition_id: item.competition_id.clone(),
                    competition_name: item.competition_name.clone(),
                    competition_type: item.competition_type.clone(),
                    organizer_id: item.organizer_id.clone(),
                    match_count: 1,
                });
            }
        }
    }
    grouped
}

/// List the competitions a player appears in, optionally filtered.
///
/// Recomputed from the (cached) history on every call; only the ESEA
/// convenience lookup below keeps its own derived cache.
#[instrument(skip(transport, caches))]
pub(crate) async fn get_player_competitions<T: Transport>(
    transport: &T,
    caches: &CacheLayer,
    player_id: &str,
    game: &str,
    max_matches: usize,
    filter: &CompetitionFilter,
) -> Result<Vec<CompetitionInfo>> {
    let history = history::get_player_history(transport, caches, player_id, game, max_matches).await?;
    let competitions = group_competitions(&history, filter);
    debug!(
        player_id,
        game,
        count = competitions.len(),
        "grouped competitions"
    );
    Ok(competitions)
}

/// List a player's ESEA championship seasons, via the seasons cache.
#[instrument(skip(transport, caches))]
pub(crate) async fn get_player_esea_seasons<T: Transport>(
    transport: &T,
    caches: &CacheLayer,
    player_id: &str,
    game: &str,
    max_matches: usize,
) -> Result<Vec<CompetitionInfo>> {
    let cache_key = format!("{player_id}:{game}");
    if let Some(seasons) = caches.player_seasons.get(&cache_key).await {
        debug!(player_id, game, "player seasons cache hit");
        return Ok(seasons);
    }

    let filter = CompetitionFilter {
        organizer_id: Some(ESEA_ORGANIZER_ID.to_string()),
        competition_type: Some("championship".to_string()),
    };
    let seasons =
        get_player_competitions(transport, caches, player_id, game, max_matches, &filter).await?;
    caches.player_seasons.set(cache_key, seasons.clone()).await;
    Ok(seasons)
}
