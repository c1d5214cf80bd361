use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::model::{CompetitionInfo, MatchHistoryItem, MatchStatsResponse};

// Match stats are immutable once a match is played.
const MATCH_STATS_TTL: Duration = Duration::from_secs(86400);
const MATCH_STATS_SWEEP: Duration = Duration::from_secs(3600);

// Player match history and the derived season list stay fresh enough for
// active players at five minutes.
const PLAYER_HISTORY_TTL: Duration = Duration::from_secs(300);
const PLAYER_HISTORY_SWEEP: Duration = Duration::from_secs(60);

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// A shared key/value cache where every entry expires `ttl` after insertion.
///
/// Expiry is passive: [`TtlCache::get`] treats a stale entry as absent, and a
/// background sweeper purges stale entries to bound memory. Entries are never
/// mutated in place, only replaced or dropped.
pub struct TtlCache<V> {
    ttl: Duration,
    entries: Arc<RwLock<HashMap<String, Entry<V>>>>,
}

impl<V: Clone + Send + Sync + 'static> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Look up a key, treating an expired-but-not-yet-swept entry as absent.
    pub async fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.inserted_at.elapsed() >= self.ttl {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Insert or replace the entry for `key`, restarting its TTL.
    pub async fn set(&self, key: impl Into<String>, value: V) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.into(),
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Spawn a task that purges expired entries every `every`.
    ///
    /// The task holds only a weak reference to the map and stops on its own
    /// once the cache is dropped. Must be called within a Tokio runtime.
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let ttl = self.ttl;
        let entries = Arc::downgrade(&self.entries);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // The first tick completes immediately; skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(entries) = entries.upgrade() else {
                    break;
                };
                let now = Instant::now();
                let mut map = entries.write().await;
                let before = map.len();
                map.retain(|_, entry| now.duration_since(entry.inserted_at) < ttl);
                let swept = before - map.len();
                if swept > 0 {
                    debug!(swept, remaining = map.len(), "swept expired cache entries");
                }
            }
        })
    }

    #[cfg(test)]
    async fn raw_len(&self) -> usize {
        self.entries.read().await.len()
    }
}

/// The three caches the client reads through, constructed once per process.
pub struct CacheLayer {
    pub(crate) match_stats: TtlCache<MatchStatsResponse>,
    pub(crate) player_history: TtlCache<Vec<MatchHistoryItem>>,
    pub(crate) player_seasons: TtlCache<Vec<CompetitionInfo>>,
}

impl CacheLayer {
    /// Construct the caches and start their sweepers.
    ///
    /// Must be called within a Tokio runtime; the sweeper tasks are spawned
    /// on it and stop when the layer is dropped.
    pub fn new() -> Self {
        let match_stats = TtlCache::new(MATCH_STATS_TTL);
        let player_history = TtlCache::new(PLAYER_HISTORY_TTL);
        let player_seasons = TtlCache::new(PLAYER_HISTORY_TTL);
        match_stats.spawn_sweeper(MATCH_STATS_SWEEP);
        player_history.spawn_sweeper(PLAYER_HISTORY_SWEEP);
        player_seasons.spawn_sweeper(PLAYER_HISTORY_SWEEP);
        Self {
            match_stats,
            player_history,
            player_seasons,
        }
    }
}

impl Default for CacheLayer {
    fn default() -> Self {
        Self::new()
    }
}
