use tracing::{debug, instrument};

use crate::cache::CacheLayer;
use crate::error::Result;
use crate::faceit::{self, Transport, HISTORY_PAGE_LIMIT};
use crate::model::{MatchHistoryItem, MatchHistoryResponse};

/// Fetch up to `max_matches` history items for a player, newest first.
///
/// Reads through the history cache keyed by `(player, game, max_matches)`.
/// On a miss, pages the upstream endpoint with `min(100, remaining)` sized
/// requests until the quota is met or a short page signals the end of the
/// player's data, then caches the concatenated list. Page order is preserved
/// as returned by upstream (reverse chronological).
#[instrument(skip(transport, caches))]
pub(crate) async fn get_player_history<T: Transport>(
    transport: &T,
    caches: &CacheLayer,
    player_id: &str,
    game: &str,
    max_matches: usize,
) -> Result<Vec<MatchHistoryItem>> {
    let cache_key = format!("{player_id}:{game}:{max_matches}");
    if let Some(items) = caches.player_history.get(&cache_key).await {
        debug!(
            player_id,
            game,
            count = items.len(),
            "player history cache hit"
        );
        return Ok(items);
    }

    let mut items: Vec<MatchHistoryItem> = Vec::new();
    let mut offset = 0usize;
    while items.len() < max_matches {
        let limit = HISTORY_PAGE_LIMIT.min(max_matches - items.len());
        let endpoint =
            format!("/players/{player_id}/history?game={game}&offset={offset}&limit={limit}");
        let page: MatchHistoryResponse = faceit::fetch_json(transport, &endpoint).await?;
        let received = page.items.len();
        items.extend(page.items);
        if received < limit {
            break;
        }
        offset += received;
    }

    debug!(player_id, game, count = items.len(), "fetched player history");
    caches.player_history.set(cache_key, items.clone()).await;
    Ok(items)
}
