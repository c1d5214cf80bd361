use std::collections::HashMap;

use futures::future::join_all;
use tracing::{debug, instrument};

use crate::cache::CacheLayer;
use crate::error::Result;
use crate::faceit::{self, history, Transport};
use crate::model::{MatchStatsResponse, MultiKills, PlayerSeasonStats};

/// The target player's outcome and raw stat line for one match.
struct MatchPerformance {
    won: bool,
    stats: HashMap<String, String>,
}

/// Aggregate a player's performance across one competition.
///
/// Filters the (cached) history down to the requested competition, fans out
/// one stats fetch per match, and folds the surviving stat lines. A match
/// whose stats cannot be retrieved or parsed drops out of the aggregate
/// instead of failing the season; only a history fetch failure escalates.
/// Zero matches in the competition is a defined empty result, not an error.
#[instrument(skip(transport, caches))]
pub(crate) async fn get_player_season_stats<T: Transport>(
    transport: &T,
    caches: &CacheLayer,
    player_id: &str,
    competition_id: &str,
    game: &str,
    max_matches: usize,
) -> Result<PlayerSeasonStats> {
    let history =
        history::get_player_history(transport, caches, player_id, game, max_matches).await?;
    let season_matches: Vec<_> = history
        .iter()
        .filter(|item| item.competition_id == competition_id)
        .collect();

    if season_matches.is_empty() {
        return Ok(PlayerSeasonStats::empty(player_id, competition_id));
    }
    let competition_name = season_matches[0].competition_name.clone();

    let fetches = season_matches
        .iter()
        .map(|item| fetch_match_performance(transport, caches, &item.match_id, player_id));
    let performances: Vec<MatchPerformance> = join_all(fetches).await.into_iter().flatten().collect();

    debug!(
        player_id,
        competition_id,
        candidates = season_matches.len(),
        usable = performances.len(),
        "aggregated season stats"
    );
    Ok(reduce_season(
        player_id,
        competition_id,
        competition_name,
        &performances,
    ))
}

/// Locate the player's stat line in one match, degrading to `None` on any
/// failure: unreachable stats, no played round, or the player not appearing
/// in the sheet.
async fn fetch_match_performance<T: Transport>(
    transport: &T,
    caches: &CacheLayer,
    match_id: &str,
    player_id: &str,
) -> Option<MatchPerformance> {
    let stats = match get_match_stats(transport, caches, match_id).await {
        Ok(stats) => stats,
        Err(error) => {
            debug!(match_id, error = %error, "skipping match with unavailable stats");
            return None;
        }
    };

    let round = stats.rounds.first()?;
    round
        .teams
        .iter()
        .flat_map(|team| team.players.iter())
        .find(|player| player.player_id == player_id)
        .map(|player| MatchPerformance {
            won: player.player_stats.get("Result").map(String::as_str) == Some("1"),
            stats: player.player_stats.clone(),
        })
}

/// Read-through fetch of a match's stat sheet. Results are final once a
/// match concludes, hence the long TTL on this cache.
async fn get_match_stats<T: Transport>(
    transport: &T,
    caches: &CacheLayer,
    match_id: &str,
) -> Result<MatchStatsResponse> {
    if let Some(stats) = caches.match_stats.get(match_id).await {
        return Ok(stats);
    }
    let stats: MatchStatsResponse =
        faceit::fetch_json(transport, &format!("/matches/{match_id}/stats")).await?;
    caches.match_stats.set(match_id, stats.clone()).await;
    Ok(stats)
}

fn reduce_season(
    player_id: &str,
    competition_id: &str,
    competition_name: String,
    performances: &[MatchPerformance],
) -> PlayerSeasonStats {
    let played = performances.len() as u32;
    let wins = performances.iter().filter(|p| p.won).count() as u32;
    let losses = played - wins;
    let win_rate = if played > 0 {
        ((f64::from(wins) / f64::from(played)) * 100.0).round() as u32
    } else {
        0
    };

    PlayerSeasonStats {
        player_id: player_id.to_string(),
        competition_id: competition_id.to_string(),
        competition_name,
        matches_played: played,
        wins,
        losses,
        win_rate,
        kills: stat_sum(performances, "Kills"),
        deaths: stat_sum(performances, "Deaths"),
        assists: stat_sum(performances, "Assists"),
        kd_ratio: stat_avg(performances, "K/D Ratio"),
        adr: stat_avg(performances, "ADR"),
        headshot_pct: stat_avg(performances, "Headshots %"),
        mvps: stat_sum(performances, "MVPs"),
        multi_kills: MultiKills {
            triples: stat_sum(performances, "Triple Kills"),
            quads: stat_sum(performances, "Quadro Kills"),
            aces: stat_sum(performances, "Penta Kills"),
        },
    }
}

fn stat_value(performance: &MatchPerformance, key: &str) -> f64 {
    performance
        .stats
        .get(key)
        .and_then(|value| value.parse().ok())
        .unwrap_or(0.0)
}

fn stat_sum(performances: &[MatchPerformance], key: &str) -> f64 {
    performances.iter().map(|p| stat_value(p, key)).sum()
}

/// Mean over all surviving matches, rounded to two decimal places.
/// The average over zero matches is zero.
fn stat_avg(performances: &[MatchPerformance], key: &str) -> f64 {
    if performances.is_empty() {
        return 0.0;
    }
    (stat_sum(performances, key) / performances.len() as f64 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faceit::testing::{ok_json, status_response, StubTransport};

    fn history_page(competitions: &[(&str, &str)]) -> serde_json::Value {
        let items: Vec<_> = competitions
            .iter()
            .enumerate()
            .map(|(i, (match_id, competition_id))| {
                serde_json::json!({
                    "match_id": match_id,
                    "competition_id": competition_id,
                    "competition_name": format!("Competition {competition_id}"),
                    "competition_type": "championship",
                    "organizer_id": "org-1",
                    "finished_at": 1700000000 + i as i64,
                })
            })
            .collect();
        serde_json::json!({ "items": items })
    }

    fn match_stats(player_id: &str, stats: &[(&str, &str)]) -> serde_json::Value {
        let player_stats: serde_json::Map<String, serde_json::Value> = stats
            .iter()
            .map(|(key, value)| ((*key).to_string(), serde_json::json!(value)))
            .collect();
        serde_json::json!({
            "rounds": [{
                "teams": [
                    { "players": [{ "player_id": "enemy-1", "player_stats": { "Result": "0" } }] },
                    { "players": [{ "player_id": player_id, "player_stats": player_stats }] },
                ]
            }]
        })
    }

    fn route_history(stub: &StubTransport, competitions: &[(&str, &str)]) {
        stub.on(
            "/players/p1/history?game=cs2&offset=0&limit=100",
            ok_json(history_page(competitions)),
        );
    }

    #[tokio::test]
    async fn test_aggregates_wins_sums_and_averages() {
        let stub = StubTransport::new();
        let caches = CacheLayer::new();
        route_history(
            &stub,
            &[("m1", "esea-s55"), ("m2", "esea-s55"), ("m3", "other")],
        );
        stub.on(
            "/matches/m1/stats",
            ok_json(match_stats(
                "p1",
                &[
                    ("Result", "1"),
                    ("Kills", "20"),
                    ("Deaths", "10"),
                    ("Assists", "4"),
                    ("K/D Ratio", "2.0"),
                    ("ADR", "90.5"),
                    ("Headshots %", "50"),
                    ("MVPs", "5"),
                    ("Triple Kills", "2"),
                    ("Quadro Kills", "1"),
                    ("Penta Kills", "0"),
                ],
            )),
        );
        stub.on(
            "/matches/m2/stats",
            ok_json(match_stats(
                "p1",
                &[
                    ("Result", "0"),
                    ("Kills", "15"),
                    ("Deaths", "15"),
                    ("Assists", "6"),
                    ("K/D Ratio", "1.0"),
                    ("ADR", "70.5"),
                    ("Headshots %", "45"),
                    ("MVPs", "2"),
                    ("Triple Kills", "1"),
                    ("Quadro Kills", "0"),
                    ("Penta Kills", "1"),
                ],
            )),
        );

        let stats = get_player_season_stats(&stub, &caches, "p1", "esea-s55", "cs2", 200)
            .await
            .unwrap();

        assert_eq!(stats.competition_name, "Competition esea-s55");
        assert_eq!(stats.matches_played, 2);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.win_rate, 50);
        assert_eq!(stats.kills, 35.0);
        assert_eq!(stats.deaths, 25.0);
        assert_eq!(stats.assists, 10.0);
        assert_eq!(stats.kd_ratio, 1.5);
        assert_eq!(stats.adr, 80.5);
        assert_eq!(stats.headshot_pct, 47.5);
        assert_eq!(stats.mvps, 7.0);
        assert_eq!(stats.multi_kills.triples, 3.0);
        assert_eq!(stats.multi_kills.quads, 1.0);
        assert_eq!(stats.multi_kills.aces, 1.0);
        // The match from the other competition is never fetched.
        assert_eq!(stub.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_match_fetch_is_excluded_from_denominator() {
        let stub = StubTransport::new();
        let caches = CacheLayer::new();
        route_history(&stub, &[("m1", "esea-s55"), ("m2", "esea-s55")]);
        stub.on(
            "/matches/m1/stats",
            ok_json(match_stats(
                "p1",
                &[("Result", "1"), ("Kills", "20"), ("K/D Ratio", "2.0")],
            )),
        );
        stub.on("/matches/m2/stats", status_response(500, "upstream exploded"));

        let stats = get_player_season_stats(&stub, &caches, "p1", "esea-s55", "cs2", 200)
            .await
            .unwrap();

        assert_eq!(stats.matches_played, 1);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 0);
        assert_eq!(stats.win_rate, 100);
        assert_eq!(stats.kills, 20.0);
        assert_eq!(stats.kd_ratio, 2.0);
        assert_eq!(stats.wins + stats.losses, stats.matches_played);
    }

    #[tokio::test]
    async fn test_player_missing_from_sheet_degrades_to_no_data() {
        let stub = StubTransport::new();
        let caches = CacheLayer::new();
        route_history(&stub, &[("m1", "esea-s55"), ("m2", "esea-s55")]);
        stub.on(
            "/matches/m1/stats",
            ok_json(match_stats("p1", &[("Result", "1"), ("Kills", "12")])),
        );
        // p1 is not on either roster in m2.
        stub.on(
            "/matches/m2/stats",
            ok_json(match_stats("someone-else", &[("Result", "1")])),
        );

        let stats = get_player_season_stats(&stub, &caches, "p1", "esea-s55", "cs2", 200)
            .await
            .unwrap();

        assert_eq!(stats.matches_played, 1);
        assert_eq!(stats.kills, 12.0);
    }

    #[tokio::test]
    async fn test_match_without_rounds_degrades_to_no_data() {
        let stub = StubTransport::new();
        let caches = CacheLayer::new();
        route_history(&stub, &[("m1", "esea-s55")]);
        stub.on("/matches/m1/stats", ok_json(serde_json::json!({ "rounds": [] })));

        let stats = get_player_season_stats(&stub, &caches, "p1", "esea-s55", "cs2", 200)
            .await
            .unwrap();

        assert_eq!(stats.matches_played, 0);
        assert_eq!(stats.win_rate, 0);
        // The name still comes from the history item, not the stat sheets.
        assert_eq!(stats.competition_name, "Competition esea-s55");
    }

    #[tokio::test]
    async fn test_unknown_competition_returns_defined_empty_result() {
        let stub = StubTransport::new();
        let caches = CacheLayer::new();
        route_history(&stub, &[("m1", "other")]);

        let stats = get_player_season_stats(&stub, &caches, "p1", "esea-s55", "cs2", 200)
            .await
            .unwrap();

        assert_eq!(stats.player_id, "p1");
        assert_eq!(stats.competition_id, "esea-s55");
        assert_eq!(stats.competition_name, "");
        assert_eq!(stats.matches_played, 0);
        assert_eq!(stats.wins, 0);
        assert_eq!(stats.losses, 0);
        assert_eq!(stats.win_rate, 0);
        assert_eq!(stats.kills, 0.0);
        assert_eq!(stats.kd_ratio, 0.0);
        // Only the history endpoint is hit.
        assert_eq!(stub.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_repeat_aggregation_is_served_from_caches() {
        let stub = StubTransport::new();
        let caches = CacheLayer::new();
        route_history(&stub, &[("m1", "esea-s55")]);
        stub.on(
            "/matches/m1/stats",
            ok_json(match_stats("p1", &[("Result", "1"), ("Kills", "30")])),
        );

        let first = get_player_season_stats(&stub, &caches, "p1", "esea-s55", "cs2", 200)
            .await
            .unwrap();
        let second = get_player_season_stats(&stub, &caches, "p1", "esea-s55", "cs2", 200)
            .await
            .unwrap();

        assert_eq!(stub.calls().len(), 2);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_win_rate_rounds_to_nearest_percent() {
        let stub = StubTransport::new();
        let caches = CacheLayer::new();
        route_history(
            &stub,
            &[("m1", "esea-s55"), ("m2", "esea-s55"), ("m3", "esea-s55")],
        );
        stub.on("/matches/m1/stats", ok_json(match_stats("p1", &[("Result", "1")])));
        stub.on("/matches/m2/stats", ok_json(match_stats("p1", &[("Result", "1")])));
        stub.on("/matches/m3/stats", ok_json(match_stats("p1", &[("Result", "0")])));

        let stats = get_player_season_stats(&stub, &caches, "p1", "esea-s55", "cs2", 200)
            .await
            .unwrap();

        assert_eq!(stats.wins, 2);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.win_rate, 67);
    }
}
