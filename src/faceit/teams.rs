use tracing::instrument;

use crate::error::Result;
use crate::faceit::{self, Transport};
use crate::model::{TeamProfile, TeamSearchResponse};

#[instrument(skip(transport))]
pub(crate) async fn get_team<T: Transport>(transport: &T, team_id: &str) -> Result<TeamProfile> {
    faceit::fetch_json(transport, &format!("/teams/{team_id}")).await
}

#[instrument(skip(transport))]
pub(crate) async fn search_teams<T: Transport>(
    transport: &T,
    nickname: &str,
    limit: usize,
) -> Result<TeamSearchResponse> {
    let endpoint = format!("/search/teams?nickname={nickname}&offset=0&limit={limit}");
    faceit::fetch_json(transport, &endpoint).await
}
