//! Roster operations: refreshing the leaderboard and registering players.

mod refresh;
mod register;

pub use refresh::*;
pub use register::*;
