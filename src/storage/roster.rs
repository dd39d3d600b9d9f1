//! JSON roster file.

use std::path::PathBuf;

use tokio::fs;
use tracing::{debug, info};

use super::StorageError;
use crate::models::Player;

/// Read-all / write-all access to the roster file.
///
/// There is no locking: two overlapping read-modify-write cycles race and
/// the last writer wins.
#[derive(Debug, Clone)]
pub struct RosterStore {
    path: PathBuf,
}

impl RosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Check if the roster file exists.
    pub async fn exists(&self) -> bool {
        fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// Load every player. A missing file is an empty roster.
    pub async fn load(&self) -> Result<Vec<Player>, StorageError> {
        if !self.exists().await {
            debug!("Roster file {:?} not found, starting empty", self.path);
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).await?;
        let players: Vec<Player> = serde_json::from_str(&contents)?;

        debug!("Read {} players from {:?}", players.len(), self.path);
        Ok(players)
    }

    /// Replace the whole roster file.
    pub async fn save(&self, players: &[Player]) -> Result<usize, StorageError> {
        if self.path.as_os_str().is_empty() {
            return Err(StorageError::InvalidPath(self.path.clone()));
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(players)?;
        fs::write(&self.path, json).await?;

        info!("Wrote {} players to {:?}", players.len(), self.path);
        Ok(players.len())
    }
}
