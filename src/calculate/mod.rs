//! Leaderboard ordering and derived metrics.
//!
//! - Win rate as a whole-number percentage
//! - Tier strength ordering
//! - Stable leaderboard sort (tier, then LP, then win rate)

use std::cmp::Ordering;

use crate::models::{LeagueEntry, Player, Tier};

/// Win rate as a percentage rounded half-up, or `None` with no games played.
pub fn calculate_win_rate(wins: u32, losses: u32) -> Option<u32> {
    let total = u64::from(wins) + u64::from(losses);
    if total == 0 {
        return None;
    }
    // round(100 * w / t) == floor((200 * w + t) / (2 * t)) for w, t >= 0
    let rounded = (200 * u64::from(wins) + total) / (2 * total);
    Some(rounded as u32)
}

/// Ladder position of a tier; higher is better.
pub fn tier_strength(tier: &Tier) -> u8 {
    tier.strength()
}

/// Leaderboard order: stronger tier first, then more LP, then higher win rate.
pub fn compare_players(a: &Player, b: &Player) -> Ordering {
    tier_strength(&b.tier)
        .cmp(&tier_strength(&a.tier))
        .then_with(|| b.league_points.cmp(&a.league_points))
        .then_with(|| b.win_rate.cmp(&a.win_rate))
}

/// Sort a roster into leaderboard order. Exact ties keep their input order.
pub fn sort_leaderboard(players: &mut [Player]) {
    players.sort_by(compare_players);
}

/// Whether every adjacent pair is in leaderboard order.
pub fn is_sorted_leaderboard(players: &[Player]) -> bool {
    players
        .windows(2)
        .all(|pair| compare_players(&pair[0], &pair[1]) != Ordering::Greater)
}

/// Overwrite a player's ranked fields from a solo-queue entry.
///
/// The stored win rate is only recomputed when the entry has games on record.
pub fn apply_league_entry(player: &mut Player, entry: &LeagueEntry) {
    player.tier = Tier::from(entry.tier.as_str());
    player.rank = entry.rank.clone();
    player.league_points = entry.league_points;
    player.wins = entry.wins;
    player.losses = entry.losses;
    if let Some(win_rate) = calculate_win_rate(entry.wins, entry.losses) {
        player.win_rate = win_rate;
    }
}
