use super::platform::Platform;
use async_trait::async_trait;
use reqwest::Url;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

const BUNGIE_API: &str = "https://www.bungie.net/Platform";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const SUCCESS: i64 = 1;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Bungie error {code} ({status}): {message}")]
    Bungie {
        code: i64,
        status: String,
        message: String,
    },
    #[error("Bungie returned no data")]
    EmptyResponse,
    #[error("invalid API url: {0}")]
    Url(String),
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(rename = "Response")]
    response: Option<T>,
    #[serde(rename = "ErrorCode")]
    error_code: i64,
    #[serde(rename = "ErrorStatus", default)]
    error_status: String,
    #[serde(rename = "Message", default)]
    message: String,
}

impl<T> Envelope<T> {
    fn into_result(self) -> Result<T, ApiError> {
        if self.error_code != SUCCESS {
            return Err(ApiError::Bungie {
                code: self.error_code,
                status: self.error_status,
                message: self.message,
            });
        }
        self.response.ok_or(ApiError::EmptyResponse)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub membership_id: String,
    pub membership_type: u8,
    pub display_name: String,
}

/// The Bungie.net calls the bot relies on.
#[async_trait]
pub trait DestinyApi: Send + Sync {
    /// Account-wide historical stats for the given activity modes.
    async fn get_historical_stats(
        &self,
        platform: Platform,
        membership_id: &str,
        groups: &[&str],
        modes: &[u32],
    ) -> Result<Value, ApiError>;

    /// Looks a player up by display name. `Ok(None)` when nobody matches.
    async fn search_player(
        &self,
        platform: Platform,
        display_name: &str,
    ) -> Result<Option<UserInfo>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct BungieClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl BungieClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: BUNGIE_API.to_string(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ApiError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments)
            // Bungie insists on the trailing slash.
            .push("");
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let start = Instant::now();
        let response = self
            .http
            .get(url.clone())
            .header("X-API-Key", &self.api_key)
            .query(query)
            .send()
            .await?;
        debug!("GET {} answered {} in {:?}", url.path(), response.status(), start.elapsed());

        let envelope: Envelope<T> = response.json().await?;
        envelope.into_result().inspect_err(|e| {
            warn!("Bungie request {} failed: {}", url.path(), e);
        })
    }
}

#[async_trait]
impl DestinyApi for BungieClient {
    async fn get_historical_stats(
        &self,
        platform: Platform,
        membership_id: &str,
        groups: &[&str],
        modes: &[u32],
    ) -> Result<Value, ApiError> {
        let membership_type = platform.membership_type().to_string();
        let url = self.endpoint(&[
            "Destiny2",
            &membership_type,
            "Account",
            membership_id,
            "Character",
            "0",
            "Stats",
        ])?;

        let modes = modes
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.get(url, &[("groups", groups.join(",")), ("modes", modes)])
            .await
    }

    async fn search_player(
        &self,
        platform: Platform,
        display_name: &str,
    ) -> Result<Option<UserInfo>, ApiError> {
        let membership_type = platform.membership_type().to_string();
        let url = self.endpoint(&[
            "Destiny2",
            "SearchDestinyPlayer",
            &membership_type,
            display_name,
        ])?;

        let players: Vec<UserInfo> = self.get(url, &[]).await?;
        Ok(players.into_iter().next())
    }
}
