//! Tracked player records and ranked tiers.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Ranked tier as reported by the provider.
///
/// Unknown tier names round-trip verbatim through `Other` so a roster file
/// written by a newer provider version is never rewritten lossily.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tier {
    Challenger,
    Grandmaster,
    Master,
    Diamond,
    Platinum,
    Gold,
    Silver,
    Bronze,
    Iron,
    Unranked,
    Other(String),
}

impl Tier {
    /// The provider's spelling of this tier.
    pub fn as_str(&self) -> &str {
        match self {
            Tier::Challenger => "CHALLENGER",
            Tier::Grandmaster => "GRANDMASTER",
            Tier::Master => "MASTER",
            Tier::Diamond => "DIAMOND",
            Tier::Platinum => "PLATINUM",
            Tier::Gold => "GOLD",
            Tier::Silver => "SILVER",
            Tier::Bronze => "BRONZE",
            Tier::Iron => "IRON",
            Tier::Unranked => "UNRANKED",
            Tier::Other(name) => name,
        }
    }

    /// Position in the ladder, 9 for CHALLENGER down to 1 for IRON.
    /// Unranked and unrecognised tiers sit at 0.
    pub fn strength(&self) -> u8 {
        match self {
            Tier::Challenger => 9,
            Tier::Grandmaster => 8,
            Tier::Master => 7,
            Tier::Diamond => 6,
            Tier::Platinum => 5,
            Tier::Gold => 4,
            Tier::Silver => 3,
            Tier::Bronze => 2,
            Tier::Iron => 1,
            Tier::Unranked | Tier::Other(_) => 0,
        }
    }
}

impl From<String> for Tier {
    fn from(s: String) -> Self {
        match s.as_str() {
            "CHALLENGER" => Tier::Challenger,
            "GRANDMASTER" => Tier::Grandmaster,
            "MASTER" => Tier::Master,
            "DIAMOND" => Tier::Diamond,
            "PLATINUM" => Tier::Platinum,
            "GOLD" => Tier::Gold,
            "SILVER" => Tier::Silver,
            "BRONZE" => Tier::Bronze,
            "IRON" => Tier::Iron,
            "UNRANKED" => Tier::Unranked,
            _ => Tier::Other(s),
        }
    }
}

impl From<&str> for Tier {
    fn from(s: &str) -> Self {
        Tier::from(s.to_string())
    }
}

impl From<Tier> for String {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Unranked
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tracked player in the roster file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    #[serde(rename = "summonerName")]
    pub summoner_name: String,

    /// Riot ID tag, kept for display ("Name#TAG")
    #[serde(rename = "tagLine", default, skip_serializing_if = "String::is_empty")]
    pub tag_line: String,

    /// Provider-assigned stable identifier
    pub puuid: String,

    /// Platform routing value, e.g. "euw1"
    pub region: String,

    #[serde(default)]
    pub tier: Tier,

    /// Division within the tier ("I".."IV"), empty when unranked
    #[serde(default)]
    pub rank: String,

    #[serde(
        rename = "lp",
        alias = "leaguePoints",
        default,
        deserialize_with = "null_as_zero"
    )]
    pub league_points: u32,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub wins: u32,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub losses: u32,

    /// Whole-number percentage of games won. Older roster files hold `null`
    /// here for players with no games.
    #[serde(
        rename = "winrate",
        alias = "winRate",
        default,
        deserialize_with = "null_as_zero"
    )]
    pub win_rate: u32,

    /// Keys this crate does not model, written back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_default())
}

impl Player {
    /// A freshly registered player with no ranked data yet.
    pub fn new_unranked(
        summoner_name: impl Into<String>,
        tag_line: impl Into<String>,
        puuid: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            summoner_name: summoner_name.into(),
            tag_line: tag_line.into(),
            puuid: puuid.into(),
            region: region.into(),
            tier: Tier::Unranked,
            rank: String::new(),
            league_points: 0,
            wins: 0,
            losses: 0,
            win_rate: 0,
            extra: Map::new(),
        }
    }

    /// "Name#TAG" when the tag is known, the bare name otherwise.
    pub fn riot_id(&self) -> String {
        if self.tag_line.is_empty() {
            self.summoner_name.clone()
        } else {
            format!("{}#{}", self.summoner_name, self.tag_line)
        }
    }
}
