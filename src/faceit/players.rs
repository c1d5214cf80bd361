use tracing::instrument;

use crate::error::Result;
use crate::faceit::{self, Transport};
use crate::model::{PlayerProfile, PlayerSearchResponse};

#[instrument(skip(transport))]
pub(crate) async fn get_player<T: Transport>(
    transport: &T,
    player_id: &str,
) -> Result<PlayerProfile> {
    faceit::fetch_json(transport, &format!("/players/{player_id}")).await
}

#[instrument(skip(transport))]
pub(crate) async fn search_players<T: Transport>(
    transport: &T,
    nickname: &str,
    game: &str,
    limit: usize,
) -> Result<PlayerSearchResponse> {
    let endpoint = format!("/search/players?nickname={nickname}&game={game}&offset=0&limit={limit}");
    faceit::fetch_json(transport, &endpoint).await
}
