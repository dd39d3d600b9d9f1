//! # Ranked Ladder
//!
//! A small leaderboard service for a tracked roster of League of Legends
//! players, ordered by their ranked solo-queue standing.
//!
//! ## Architecture
//!
//! - **models**: Player records, tiers, and provider payloads
//! - **fetch**: Riot API client (ranked entries, Riot ID lookup)
//! - **storage**: JSON roster file
//! - **calculate**: Win rate and leaderboard ordering
//! - **roster**: Refresh pipeline and player registration
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod fetch;
pub mod models;
pub mod roster;
pub mod storage;

pub use models::*;
