use tracing::instrument;

use crate::cache::CacheLayer;
use crate::config::Config;
use crate::error::Result;
use crate::faceit::{self, HttpTransport, Transport};
use crate::model::*;

pub use crate::faceit::competitions::CompetitionFilter;

/// The main entry point for querying FACEIT player and team statistics.
///
/// `FaceitClient` wraps a [`Transport`] (an authenticated [`reqwest::Client`]
/// in production) together with the process-wide cache layer, and exposes one
/// async method per operation. Construct it once and share it; the caches
/// live as long as the client does.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> faceit_stats::Result<()> {
/// use faceit_stats::FaceitClient;
///
/// let client = FaceitClient::from_env()?;
/// let seasons = client.get_player_esea_seasons("player-id", "cs2").await?;
/// for season in &seasons {
///     let stats = client
///         .get_player_season_stats("player-id", &season.competition_id, "cs2")
///         .await?;
///     println!("{}: {}W/{}L", season.competition_name, stats.wins, stats.losses);
/// }
/// # Ok(())
/// # }
/// ```
pub struct FaceitClient<T: Transport = HttpTransport> {
    transport: T,
    caches: CacheLayer,
    max_history_matches: usize,
}

impl FaceitClient<HttpTransport> {
    /// Create a client from process environment configuration.
    ///
    /// Fails with [`crate::FaceitError::MissingApiKey`] before any network
    /// call if `FACEIT_API_KEY` is unset. Must be called within a Tokio
    /// runtime (the cache sweepers are spawned on it).
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Config::from_env()?))
    }

    /// Create a client from an explicit [`Config`].
    pub fn new(config: Config) -> Self {
        Self::with_transport(
            HttpTransport::new(config.api_key),
            config.max_history_matches,
        )
    }
}

impl<T: Transport> FaceitClient<T> {
    /// Create a client over a custom transport.
    ///
    /// This is the seam tests use to substitute a scripted transport for the
    /// real HTTP one.
    pub fn with_transport(transport: T, max_history_matches: usize) -> Self {
        Self {
            transport,
            caches: CacheLayer::new(),
            max_history_matches,
        }
    }

    /// Fetch a player's profile by id.
    #[instrument(skip(self))]
    pub async fn get_player(&self, player_id: &str) -> Result<PlayerProfile> {
        faceit::players::get_player(&self.transport, player_id).await
    }

    /// Search players by nickname.
    #[instrument(skip(self))]
    pub async fn search_players(
        &self,
        nickname: &str,
        game: &str,
        limit: usize,
    ) -> Result<PlayerSearchResponse> {
        faceit::players::search_players(&self.transport, nickname, game, limit).await
    }

    /// Fetch a team's profile by id.
    #[instrument(skip(self))]
    pub async fn get_team(&self, team_id: &str) -> Result<TeamProfile> {
        faceit::teams::get_team(&self.transport, team_id).await
    }

    /// Search teams by name.
    #[instrument(skip(self))]
    pub async fn search_teams(&self, nickname: &str, limit: usize) -> Result<TeamSearchResponse> {
        faceit::teams::search_teams(&self.transport, nickname, limit).await
    }

    /// Fetch a player's match history, newest first, up to the configured cap.
    #[instrument(skip(self))]
    pub async fn get_player_history(
        &self,
        player_id: &str,
        game: &str,
    ) -> Result<Vec<MatchHistoryItem>> {
        faceit::history::get_player_history(
            &self.transport,
            &self.caches,
            player_id,
            game,
            self.max_history_matches,
        )
        .await
    }

    /// List the competitions a player appears in, optionally filtered by
    /// organizer and/or competition type.
    #[instrument(skip(self, filter))]
    pub async fn get_player_competitions(
        &self,
        player_id: &str,
        game: &str,
        filter: &CompetitionFilter,
    ) -> Result<Vec<CompetitionInfo>> {
        faceit::competitions::get_player_competitions(
            &self.transport,
            &self.caches,
            player_id,
            game,
            self.max_history_matches,
            filter,
        )
        .await
    }

    /// List a player's ESEA championship seasons.
    #[instrument(skip(self))]
    pub async fn get_player_esea_seasons(
        &self,
        player_id: &str,
        game: &str,
    ) -> Result<Vec<CompetitionInfo>> {
        faceit::competitions::get_player_esea_seasons(
            &self.transport,
            &self.caches,
            player_id,
            game,
            self.max_history_matches,
        )
        .await
    }

    /// Aggregate a player's win/loss record and stat totals for one
    /// competition.
    #[instrument(skip(self))]
    pub async fn get_player_season_stats(
        &self,
        player_id: &str,
        competition_id: &str,
        game: &str,
    ) -> Result<PlayerSeasonStats> {
        faceit::season::get_player_season_stats(
            &self.transport,
            &self.caches,
            player_id,
            competition_id,
            game,
            self.max_history_matches,
        )
        .await
    }
}
