// SPDX-License-Identifier: MPL-2.0
//! Client for the trending-images API.
//!
//! A single GET to the configured endpoint, authenticated with an API key in
//! the query string. The optional `limit` parameter is only sent when it is
//! configured. No retry happens here: the gallery retries on its next tick.

mod response;

pub use response::parse_trending;

use crate::config::SourceConfig;
use crate::error::{Error, NetworkError, Result};
use crate::gallery::ImageRecord;
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound for a trending response body.
const MAX_RESPONSE_BYTES: u64 = 8 * 1024 * 1024;

const USER_AGENT: &str = concat!("GifGallery/", env!("CARGO_PKG_VERSION"));

/// Everything needed to build the trending request.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendingRequest {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub limit: Option<u32>,
    pub timeout: Duration,
}

impl TrendingRequest {
    pub fn from_config(source: &SourceConfig, api_key: Option<String>) -> Self {
        Self {
            endpoint: source.endpoint().to_string(),
            api_key,
            limit: source.limit(),
            timeout: source.request_timeout(),
        }
    }

    /// Builds `endpoint?api_key=KEY[&limit=N]`.
    pub fn url(&self) -> Result<Url> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(Error::Network(NetworkError::MissingApiKey))?;

        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| Error::Config(format!("invalid endpoint {}: {}", self.endpoint, e)))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", api_key);
            if let Some(limit) = self.limit {
                query.append_pair("limit", &limit.to_string());
            }
        }
        Ok(url)
    }
}

/// HTTP client shared by the trending request and rendition downloads.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct GiphyClient {
    http: reqwest::Client,
    request: Arc<TrendingRequest>,
}

impl GiphyClient {
    pub fn new(request: TrendingRequest) -> Result<Self> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .timeout(request.timeout)
            .build()
            .map_err(|e| Error::Network(NetworkError::Transport(e.to_string())))?;

        Ok(Self {
            http,
            request: Arc::new(request),
        })
    }

    pub fn request(&self) -> &TrendingRequest {
        &self.request
    }

    /// Underlying HTTP client, for downloading renditions.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Fetches and maps the trending list.
    pub async fn fetch_trending(self) -> Result<Vec<ImageRecord>> {
        let url = self.request.url()?;
        log::debug!("fetching trending list from {}", self.request.endpoint);

        let response = self.http.get(url).send().await?;
        let body = read_body(response, MAX_RESPONSE_BYTES).await?;
        let body = String::from_utf8_lossy(&body);
        parse_trending(&body)
    }
}

/// Reads a successful response body, refusing anything above `limit` bytes.
pub(crate) async fn read_body(response: reqwest::Response, limit: u64) -> Result<Vec<u8>> {
    use futures_util::StreamExt;

    let status = response.status();
    if !status.is_success() {
        return Err(NetworkError::Status(status.as_u16()).into());
    }

    if response.content_length().is_some_and(|len| len > limit) {
        return Err(NetworkError::TooLarge { limit }.into());
    }

    let mut body = Vec::with_capacity(response.content_length().unwrap_or(0) as usize);
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if body.len() as u64 + chunk.len() as u64 > limit {
            return Err(NetworkError::TooLarge { limit }.into());
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
