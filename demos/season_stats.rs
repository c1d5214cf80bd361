//! Walk a player's ESEA seasons and print their aggregate record.
//!
//! Usage: FACEIT_API_KEY=... cargo run --example season_stats <player-id>

use faceit_stats::FaceitClient;

#[tokio::main]
async fn main() {
    let player_id = std::env::args()
        .nth(1)
        .expect("usage: season_stats <player-id>");

    let client = FaceitClient::from_env().unwrap();

    let player = client.get_player(&player_id).await.unwrap();
    println!("{} ({})", player.nickname, player.country);

    let seasons = client
        .get_player_esea_seasons(&player_id, "cs2")
        .await
        .unwrap();
    println!("Found {} ESEA seasons", seasons.len());

    for season in seasons {
        let stats = client
            .get_player_season_stats(&player_id, &season.competition_id, "cs2")
            .await
            .unwrap();
        println!(
            "{}: {} maps, {}W/{}L ({}%), {:.0} kills, {:.2} K/D, {:.1} ADR",
            season.competition_name,
            stats.matches_played,
            stats.wins,
            stats.losses,
            stats.win_rate,
            stats.kills,
            stats.kd_ratio,
            stats.adr,
        );
    }
}
