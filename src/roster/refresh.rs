//! Leaderboard refresh: fetch, merge, sort, persist.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::calculate::{apply_league_entry, sort_leaderboard};
use crate::fetch::RiotApi;
use crate::models::Player;
use crate::storage::{RosterStore, StorageError};

/// What happened to one player during a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum PlayerOutcome {
    /// Ranked solo standing found and merged
    Updated,
    /// No ranked solo entry; record left as it was
    NoRankedEntry,
    /// Lookup failed; record left as it was
    Failed(String),
}

/// Per-player result of a refresh, keyed by PUUID.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerReport {
    pub puuid: String,
    pub outcome: PlayerOutcome,
}

/// Sorted roster plus what happened to each player along the way.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshReport {
    pub players: Vec<Player>,
    pub outcomes: Vec<PlayerReport>,
}

impl RefreshReport {
    pub fn updated_count(&self) -> usize {
        self.count(|o| matches!(o, PlayerOutcome::Updated))
    }

    pub fn unranked_count(&self) -> usize {
        self.count(|o| matches!(o, PlayerOutcome::NoRankedEntry))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, PlayerOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&PlayerOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Fetch each player's standing in turn and merge it into the record.
///
/// Calls are strictly sequential. A failed or empty lookup leaves the record
/// untouched and is only reported.
pub async fn merge_rankings(players: &mut [Player], api: &dyn RiotApi) -> Vec<PlayerReport> {
    let mut outcomes = Vec::with_capacity(players.len());

    for player in players.iter_mut() {
        let outcome = match api.ranked_solo_entry(&player.puuid, &player.region).await {
            Ok(Some(entry)) => {
                apply_league_entry(player, &entry);
                debug!(
                    "{}: {} {} {} LP",
                    player.riot_id(),
                    player.tier,
                    player.rank,
                    player.league_points
                );
                PlayerOutcome::Updated
            }
            Ok(None) => {
                debug!("{}: no ranked solo entry", player.riot_id());
                PlayerOutcome::NoRankedEntry
            }
            Err(e) => {
                warn!("Failed to fetch ranked data for {}: {}", player.riot_id(), e);
                PlayerOutcome::Failed(e.to_string())
            }
        };

        outcomes.push(PlayerReport {
            puuid: player.puuid.clone(),
            outcome,
        });
    }

    outcomes
}

/// Refresh every tracked player, re-sort, and rewrite the roster file.
///
/// The file is rewritten even when nothing changed. Only storage errors
/// propagate.
pub async fn refresh_leaderboard(
    store: &RosterStore,
    api: &dyn RiotApi,
) -> Result<RefreshReport, StorageError> {
    let mut players = store.load().await?;
    info!(
        "Refreshing {} players via {} provider",
        players.len(),
        api.name()
    );

    let outcomes = merge_rankings(&mut players, api).await;
    sort_leaderboard(&mut players);
    store.save(&players).await?;

    let report = RefreshReport { players, outcomes };
    info!(
        "Refresh complete: {} updated, {} unranked, {} failed",
        report.updated_count(),
        report.unranked_count(),
        report.failed_count()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::is_sorted_leaderboard;
    use crate::fetch::{FetcherConfig, MockRiotApi, RiotClient};
    use crate::models::Tier;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn player(name: &str, tier: Tier, lp: u32, wins: u32, losses: u32, win_rate: u32) -> Player {
        let mut p = Player::new_unranked(name, "EUW", format!("p-{}", name), "euw1");
        p.tier = tier;
        p.rank = "I".to_string();
        p.league_points = lp;
        p.wins = wins;
        p.losses = losses;
        p.win_rate = win_rate;
        p
    }

    async fn seeded_store(dir: &TempDir, players: &[Player]) -> RosterStore {
        let store = RosterStore::new(dir.path().join("players.json"));
        store.save(players).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_refresh_merges_and_sorts() {
        let tmp = TempDir::new().unwrap();
        let store = seeded_store(
            &tmp,
            &[
                player("alice", Tier::Gold, 40, 11, 9, 55),
                player("bob", Tier::Silver, 10, 1, 1, 50),
            ],
        )
        .await;
        let api = MockRiotApi::new()
            .with_entries("p-bob", vec![MockRiotApi::solo_entry("PLATINUM", "IV", 12, 2, 1)]);

        let report = refresh_leaderboard(&store, &api).await.unwrap();

        assert_eq!(report.players[0].summoner_name, "bob");
        assert_eq!(report.players[0].tier, Tier::Platinum);
        assert_eq!(report.players[0].rank, "IV");
        assert_eq!(report.players[0].win_rate, 67);
        assert_eq!(report.players[1].summoner_name, "alice");
        assert_eq!(report.updated_count(), 1);
        assert_eq!(report.unranked_count(), 1);
        assert_eq!(report.failed_count(), 0);
        assert!(is_sorted_leaderboard(&report.players));

        // Persisted in the same order
        assert_eq!(store.load().await.unwrap(), report.players);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_record() {
        let tmp = TempDir::new().unwrap();
        let before = player("carol", Tier::Diamond, 77, 30, 20, 60);
        let store = seeded_store(&tmp, &[before.clone()]).await;
        let api = MockRiotApi::new().with_failure("p-carol", 503);

        let report = refresh_leaderboard(&store, &api).await.unwrap();

        assert_eq!(report.players, vec![before]);
        assert!(matches!(report.outcomes[0].outcome, PlayerOutcome::Failed(_)));
        assert_eq!(report.failed_count(), 1);
    }

    #[tokio::test]
    async fn test_transport_error_keeps_record() {
        // Bind then drop to get a port nobody is listening on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = RiotClient::new(FetcherConfig {
            api_key: "k".to_string(),
            base_url: Some(format!("http://{}", addr).parse().unwrap()),
            ..FetcherConfig::default()
        })
        .unwrap();

        let tmp = TempDir::new().unwrap();
        let before = vec![
            player("dave", Tier::Gold, 10, 5, 5, 50),
            player("erin", Tier::Master, 150, 60, 40, 60),
        ];
        let store = seeded_store(&tmp, &before).await;

        let report = refresh_leaderboard(&store, &client).await.unwrap();

        assert_eq!(report.failed_count(), 2);
        assert_eq!(report.players, vec![before[1].clone(), before[0].clone()]);
    }

    #[tokio::test]
    async fn test_entry_without_games_keeps_win_rate() {
        let tmp = TempDir::new().unwrap();
        let store = seeded_store(&tmp, &[player("frank", Tier::Gold, 50, 6, 4, 60)]).await;
        let api = MockRiotApi::new()
            .with_entries("p-frank", vec![MockRiotApi::solo_entry("SILVER", "II", 0, 0, 0)]);

        let report = refresh_leaderboard(&store, &api).await.unwrap();

        let frank = &report.players[0];
        assert_eq!(frank.tier, Tier::Silver);
        assert_eq!(frank.wins, 0);
        assert_eq!(frank.losses, 0);
        assert_eq!(frank.win_rate, 60);
    }

    #[tokio::test]
    async fn test_refresh_calls_provider_once_per_player() {
        let tmp = TempDir::new().unwrap();
        let store = seeded_store(
            &tmp,
            &[
                player("a", Tier::Iron, 0, 0, 0, 0),
                player("b", Tier::Iron, 0, 0, 0, 0),
                player("c", Tier::Iron, 0, 0, 0, 0),
            ],
        )
        .await;
        let api = MockRiotApi::new();

        let report = refresh_leaderboard(&store, &api).await.unwrap();

        assert_eq!(api.calls(), 3);
        assert_eq!(report.outcomes.len(), 3);
    }

    #[tokio::test]
    async fn test_refresh_empty_roster_writes_file() {
        let tmp = TempDir::new().unwrap();
        let store = RosterStore::new(tmp.path().join("players.json"));

        let report = refresh_leaderboard(&store, &MockRiotApi::new()).await.unwrap();

        assert!(report.players.is_empty());
        assert!(store.exists().await);
    }

    #[tokio::test]
    async fn test_refresh_corrupt_store_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("players.json");
        std::fs::write(&path, "not json").unwrap();
        let store = RosterStore::new(path);

        let result = refresh_leaderboard(&store, &MockRiotApi::new()).await;
        assert!(matches!(result, Err(StorageError::Json(_))));
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(PlayerOutcome::Failed("boom".to_string())).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["detail"], "boom");

        let json = serde_json::to_value(PlayerOutcome::Updated).unwrap();
        assert_eq!(json["status"], "updated");
    }

    #[tokio::test]
    async fn test_refresh_keeps_unknown_keys_on_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("players.json");
        std::fs::write(
            &path,
            r#"[
  {
    "summonerName": "dave",
    "puuid": "p-dave",
    "region": "euw1",
    "tier": "SILVER",
    "rank": "II",
    "lp": 5,
    "wins": 0,
    "losses": 0,
    "winrate": null,
    "profileIconId": 42
  }
]"#,
        )
        .unwrap();
        let store = RosterStore::new(&path);
        let api = MockRiotApi::new()
            .with_entries("p-dave", vec![MockRiotApi::solo_entry("GOLD", "IV", 20, 3, 1)]);

        let report = refresh_leaderboard(&store, &api).await.unwrap();
        assert_eq!(report.updated_count(), 1);
        assert_eq!(report.players[0].win_rate, 75);

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[0]["profileIconId"], 42);
        assert_eq!(raw[0]["tier"], "GOLD");
        assert_eq!(raw[0]["winrate"], 75);
    }
}
