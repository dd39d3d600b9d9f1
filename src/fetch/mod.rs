//! Riot API client.
//!
//! Looks up ranked queue standings by PUUID and resolves Riot IDs
//! (`gameName#tagLine`) into PUUIDs. Requests are never retried.

mod routing;

pub use routing::{platform_host, regional_host};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::models::{find_ranked_solo, Account, LeagueEntry};

/// Header carrying the API key on every request.
pub const RIOT_TOKEN_HEADER: &str = "x-riot-token";

/// Errors that can occur when talking to the Riot API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid API key header value")]
    InvalidApiKey,

    #[error("Rate limited by {host}, retry after {retry_after_secs}s")]
    RateLimited { host: String, retry_after_secs: u64 },

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for the Riot API client.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub api_key: String,

    /// Send every request here instead of the per-region hosts
    pub base_url: Option<Url>,

    /// Request timeout; `None` leaves the transport defaults in place
    pub timeout: Option<Duration>,

    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            timeout: None,
            user_agent: format!("ranked-ladder/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Ranked data provider.
#[async_trait]
pub trait RiotApi: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Every queue standing of a player on a platform.
    async fn ranked_entries(&self, puuid: &str, region: &str)
        -> Result<Vec<LeagueEntry>, FetchError>;

    /// Account behind a Riot ID.
    async fn account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
        region: &str,
    ) -> Result<Account, FetchError>;

    /// The ranked solo standing, `None` when the player has not placed.
    async fn ranked_solo_entry(
        &self,
        puuid: &str,
        region: &str,
    ) -> Result<Option<LeagueEntry>, FetchError> {
        let entries = self.ranked_entries(puuid, region).await?;
        Ok(find_ranked_solo(entries))
    }

    /// PUUID behind a Riot ID.
    async fn resolve_puuid(
        &self,
        game_name: &str,
        tag_line: &str,
        region: &str,
    ) -> Result<String, FetchError> {
        let account = self.account_by_riot_id(game_name, tag_line, region).await?;
        Ok(account.puuid)
    }
}

/// HTTP client for the public Riot API.
pub struct RiotClient {
    client: Client,
    config: FetcherConfig,
}

impl RiotClient {
    /// Create a new client with the given configuration.
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let mut key = HeaderValue::from_str(&config.api_key).map_err(|_| FetchError::InvalidApiKey)?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(RIOT_TOKEN_HEADER), key);

        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// URL of `segments` on a routing host, percent-encoding each segment.
    fn endpoint(&self, host: &str, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = match &self.config.base_url {
            Some(base) => base.clone(),
            None => Url::parse(&format!("https://{}.api.riotgames.com", host))
                .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", host, e)))?,
        };

        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| FetchError::InvalidUrl("base URL cannot carry a path".to_string()))?;
            path.pop_if_empty().extend(segments);
        }

        Ok(url)
    }

    fn ranked_entries_url(&self, puuid: &str, region: &str) -> Result<Url, FetchError> {
        self.endpoint(
            &platform_host(region),
            &["lol", "league", "v4", "entries", "by-puuid", puuid],
        )
    }

    fn account_url(&self, game_name: &str, tag_line: &str, region: &str) -> Result<Url, FetchError> {
        self.endpoint(
            &regional_host(region),
            &["riot", "account", "v1", "accounts", "by-riot-id", game_name, tag_line],
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(1);

            return Err(FetchError::RateLimited {
                host: url.host_str().unwrap_or("unknown").to_string(),
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl RiotApi for RiotClient {
    fn name(&self) -> &'static str {
        "riot"
    }

    async fn ranked_entries(
        &self,
        puuid: &str,
        region: &str,
    ) -> Result<Vec<LeagueEntry>, FetchError> {
        let url = self.ranked_entries_url(puuid, region)?;
        self.get_json(url).await
    }

    async fn account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
        region: &str,
    ) -> Result<Account, FetchError> {
        let url = self.account_url(game_name, tag_line, region)?;
        match self.get_json(url).await {
            Err(FetchError::HttpStatus { status: 404, .. }) => Err(FetchError::AccountNotFound(
                format!("{}#{}", game_name, tag_line),
            )),
            other => other,
        }
    }
}

/// Mock provider for testing.
#[cfg(test)]
#[derive(Default)]
pub struct MockRiotApi {
    ranked: std::collections::HashMap<String, Result<Vec<LeagueEntry>, u16>>,
    accounts: std::collections::HashMap<(String, String), String>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockRiotApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve these queue standings for a PUUID.
    pub fn with_entries(mut self, puuid: &str, entries: Vec<LeagueEntry>) -> Self {
        self.ranked.insert(puuid.to_string(), Ok(entries));
        self
    }

    /// Fail lookups for a PUUID with an HTTP status.
    pub fn with_failure(mut self, puuid: &str, status: u16) -> Self {
        self.ranked.insert(puuid.to_string(), Err(status));
        self
    }

    pub fn with_account(mut self, game_name: &str, tag_line: &str, puuid: &str) -> Self {
        self.accounts
            .insert((game_name.to_string(), tag_line.to_string()), puuid.to_string());
        self
    }

    /// Number of provider calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn solo_entry(tier: &str, rank: &str, league_points: u32, wins: u32, losses: u32) -> LeagueEntry {
        LeagueEntry {
            queue_type: crate::models::RANKED_SOLO_QUEUE.to_string(),
            tier: tier.to_string(),
            rank: rank.to_string(),
            league_points,
            wins,
            losses,
        }
    }
}

#[cfg(test)]
#[async_trait]
impl RiotApi for MockRiotApi {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn ranked_entries(
        &self,
        puuid: &str,
        _region: &str,
    ) -> Result<Vec<LeagueEntry>, FetchError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        match self.ranked.get(puuid) {
            Some(Ok(entries)) => Ok(entries.clone()),
            Some(Err(status)) => Err(FetchError::HttpStatus {
                status: *status,
                message: "mock failure".to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
        _region: &str,
    ) -> Result<Account, FetchError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.accounts
            .get(&(game_name.to_string(), tag_line.to_string()))
            .map(|puuid| Account {
                puuid: puuid.clone(),
                game_name: Some(game_name.to_string()),
                tag_line: Some(tag_line.to_string()),
            })
            .ok_or_else(|| FetchError::AccountNotFound(format!("{}#{}", game_name, tag_line)))
    }
}
