//! Core data models for the leaderboard.

mod league;
mod player;

pub use league::*;
pub use player::*;
