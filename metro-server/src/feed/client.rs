//! Metro Istanbul station feed client.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use super::error::FeedError;

/// Default URL of the upstream station list.
const DEFAULT_URL: &str = "https://api.ibb.gov.tr/MetroIstanbul/api/MetroMobile/V2/GetStations";

/// Wrapper for the stations response.
#[derive(Debug, Deserialize)]
pub struct StationsResponse {
    #[serde(rename = "Data", default)]
    pub data: Vec<StationRecord>,
}

/// One station record from the feed.
///
/// Only the fields the network needs are kept. Coordinates arrive as
/// strings, numbers or not at all, and are kept as strings here; they are
/// validated when the network is built.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationRecord {
    pub id: i64,
    pub name: String,
    pub line_name: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub detail_info: DetailInfo,
}

/// Position details nested inside a station record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetailInfo {
    #[serde(default, deserialize_with = "coordinate_text")]
    pub latitude: String,
    #[serde(default, deserialize_with = "coordinate_text")]
    pub longitude: String,
}

/// Accept a coordinate as a JSON string, number or null.
fn coordinate_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Parse a feed response body.
pub fn parse_response(body: &str) -> Result<Vec<StationRecord>, FeedError> {
    let response: StationsResponse =
        serde_json::from_str(body).map_err(|e| FeedError::Json {
            message: e.to_string(),
        })?;
    Ok(response.data)
}

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedClientConfig {
    /// URL of the station list endpoint
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedClientConfig {
    /// Create a config pointing at the production endpoint.
    pub fn new() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom endpoint URL (for testing or mirrors).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set a custom request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for FeedClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the upstream station feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    url: String,
}

impl FeedClient {
    /// Create a new feed client.
    pub fn new(config: FeedClientConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// Fetch every station record from the feed.
    pub async fn fetch_all(&self) -> Result<Vec<StationRecord>, FeedError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(FeedError::Json {
                message: "empty response body".to_string(),
            });
        }

        parse_response(&body)
    }
}
