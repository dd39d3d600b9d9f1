//! Provider response payloads.

use serde::{Deserialize, Serialize};

/// Queue type string of the ranked solo/duo queue.
pub const RANKED_SOLO_QUEUE: &str = "RANKED_SOLO_5x5";

/// One queue standing from the league entries endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntry {
    pub queue_type: String,
    pub tier: String,
    pub rank: String,
    pub league_points: u32,
    pub wins: u32,
    pub losses: u32,
}

impl LeagueEntry {
    pub fn is_ranked_solo(&self) -> bool {
        self.queue_type == RANKED_SOLO_QUEUE
    }
}

/// Pick the ranked solo entry out of a player's queue standings.
pub fn find_ranked_solo(entries: Vec<LeagueEntry>) -> Option<LeagueEntry> {
    entries.into_iter().find(LeagueEntry::is_ranked_solo)
}

/// Account lookup result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub puuid: String,
    #[serde(default)]
    pub game_name: Option<String>,
    #[serde(default)]
    pub tag_line: Option<String>,
}
