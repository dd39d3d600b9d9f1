//! Adding a tracked player by Riot ID.

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::fetch::{FetchError, RiotApi};
use crate::models::Player;
use crate::storage::{RosterStore, StorageError};

/// Why a registration was refused.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("missing required field: {0}")]
    InvalidInput(&'static str),

    #[error("account not found: {0}")]
    NotFound(#[from] FetchError),

    #[error("player already tracked: {0}")]
    Conflict(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Registration payload. Every field is optional on the wire so that a
/// missing one is reported as invalid input rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub summoner: Option<String>,
    pub tag_line: Option<String>,
    pub region: Option<String>,
}

/// A registration request with every field present and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub summoner: String,
    pub tag_line: String,
    pub region: String,
}

fn required(value: &Option<String>, field: &'static str) -> Result<String, RegistrationError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(RegistrationError::InvalidInput(field)),
    }
}

impl RegisterRequest {
    pub fn new(
        summoner: impl Into<String>,
        tag_line: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            summoner: Some(summoner.into()),
            tag_line: Some(tag_line.into()),
            region: Some(region.into()),
        }
    }

    /// Blank fields count as missing.
    pub fn validate(&self) -> Result<ValidatedRequest, RegistrationError> {
        Ok(ValidatedRequest {
            summoner: required(&self.summoner, "summoner")?,
            tag_line: required(&self.tag_line, "tagLine")?,
            region: required(&self.region, "region")?.to_ascii_lowercase(),
        })
    }
}

/// Resolve the Riot ID, refuse duplicates, and append an unranked record.
///
/// Nothing guards the load/append/save sequence against a concurrent
/// registration of the same account.
pub async fn register_player(
    store: &RosterStore,
    api: &dyn RiotApi,
    request: &RegisterRequest,
) -> Result<Player, RegistrationError> {
    let request = request.validate()?;

    let puuid = api
        .resolve_puuid(&request.summoner, &request.tag_line, &request.region)
        .await
        .map_err(|e| {
            warn!(
                "Could not resolve {}#{} on {}: {}",
                request.summoner, request.tag_line, request.region, e
            );
            RegistrationError::NotFound(e)
        })?;

    let mut players = store.load().await.map_err(|e| {
        error!(
            "Roster unreadable while registering {}#{}: {}",
            request.summoner, request.tag_line, e
        );
        RegistrationError::Storage(e)
    })?;
    if players.iter().any(|p| p.puuid == puuid) {
        return Err(RegistrationError::Conflict(puuid));
    }

    let player = Player::new_unranked(request.summoner, request.tag_line, puuid, request.region);
    players.push(player.clone());
    store.save(&players).await.map_err(|e| {
        error!(
            "Roster unwritable while registering {}: {}",
            player.riot_id(),
            e
        );
        RegistrationError::Storage(e)
    })?;

    info!("Registered {} ({})", player.riot_id(), player.region);
    Ok(player)
}
