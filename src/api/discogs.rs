//! Discogs API client.
//!
//! This module provides a client for the Discogs database API
//! (api.discogs.com). Every request is authenticated with the credentials
//! from [`ClientConfig`].

use std::future::Future;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::catalog::Catalog;
use crate::config::ClientConfig;
use crate::converters;
use crate::error::{DiscogsError, Result};
use crate::models::{ArtistAttributes, Release, ReleaseRef};

/// Discogs API client.
///
/// Provides methods to query artists and releases.
///
/// # Example
///
/// ```rust,no_run
/// use discollab::{ClientConfig, Credentials, DiscogsApi};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ClientConfig::new(Credentials::token("your_token")?);
///     let api = DiscogsApi::new(config)?;
///     let release = api.get_release(249504).await?;
///     println!("Release: {} by {}", release.title, release.artists_string(", "));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DiscogsApi {
    client: Client,
    config: ClientConfig,
}

impl DiscogsApi {
    /// Create a new Discogs API client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let authorization = header::HeaderValue::from_str(&config.credentials.authorization())
            .map_err(|e| DiscogsError::InvalidConfig(format!("invalid credentials: {}", e)))?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.discogs.v2.discogs+json"),
        );
        headers.insert(header::AUTHORIZATION, authorization);

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| DiscogsError::InvalidConfig(format!("build client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Make a GET request to the Discogs API.
    async fn get_api(&self, endpoint: &str) -> Result<Value> {
        let url = format!("{}{}", self.config.base_url, endpoint);
        self.get_url(&url).await
    }

    /// Make a GET request to an absolute URL (used for pagination links).
    async fn get_url(&self, url: &str) -> Result<Value> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = api_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });
            return Err(status_error(status, url, message));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Get raw artist JSON by ID.
    pub async fn get_artist_json(&self, artist_id: u64) -> Result<Value> {
        self.get_api(&format!("artists/{}", artist_id)).await
    }

    /// Get raw release JSON by ID.
    pub async fn get_release_json(&self, release_id: u64) -> Result<Value> {
        self.get_api(&format!("releases/{}", release_id)).await
    }

    /// Get an artist's complete release list.
    ///
    /// Follows `pagination.urls.next` until the last page. A failing page
    /// fails the whole call; a truncated list would silently lose releases.
    pub async fn get_artist_releases(&self, artist_id: u64) -> Result<Vec<ReleaseRef>> {
        let first = self
            .get_api(&format!(
                "artists/{}/releases?page=1&per_page={}",
                artist_id, self.config.per_page
            ))
            .await?;

        let all_releases = collect_release_pages(&first, |url| async move {
            self.get_url(&url).await
        })
        .await
        .map_err(|e| {
            error!("Error fetching next page of releases for {}: {}", artist_id, e);
            e
        })?;

        debug!(
            "Fetched {} release references for artist {}",
            all_releases.len(),
            artist_id
        );
        Ok(all_releases)
    }

    /// Get an artist by ID, including the full release list.
    pub async fn get_artist(&self, artist_id: u64) -> Result<ArtistAttributes> {
        let artist_json = self.get_artist_json(artist_id).await?;
        let mut artist = converters::parse_artist(&artist_json)?;
        artist.releases = self.get_artist_releases(artist_id).await?;
        Ok(artist)
    }

    /// Get a release by ID.
    pub async fn get_release(&self, release_id: u64) -> Result<Release> {
        let release_json = self.get_release_json(release_id).await?;
        converters::parse_release(&release_json)
    }
}

#[async_trait]
impl Catalog for DiscogsApi {
    async fn artist(&self, artist_id: u64) -> Result<ArtistAttributes> {
        self.get_artist(artist_id).await
    }

    async fn release(&self, release_id: u64) -> Result<Release> {
        self.get_release(release_id).await
    }
}

/// Collect release references from `first` and every page linked after it
/// through `pagination.urls.next`, fetching each linked page with `fetch`.
///
/// A failing page fails the whole collection.
async fn collect_release_pages<F, Fut>(first: &Value, mut fetch: F) -> Result<Vec<ReleaseRef>>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Value>>,
{
    let (mut all_releases, mut next_url) = converters::parse_release_page(first);

    while let Some(url) = next_url {
        let page = fetch(url.clone()).await?;
        let (releases, next) = converters::parse_release_page(&page);
        if releases.is_empty() && next.is_some() {
            warn!("Empty release page at {}", url);
        }
        all_releases.extend(releases);
        next_url = next;
    }

    Ok(all_releases)
}

/// Extract the `message` field Discogs puts in error bodies.
fn api_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("message")
        .and_then(|m| m.as_str())
        .map(|s| s.to_string())
}

/// Map a non-success status to an error.
fn status_error(status: StatusCode, url: &str, message: String) -> DiscogsError {
    match status {
        StatusCode::NOT_FOUND => DiscogsError::NotFound(format!("{}: {}", url, message)),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DiscogsError::BadCredentials(message),
        StatusCode::TOO_MANY_REQUESTS => DiscogsError::QuotaExceeded,
        _ => {
            error!("Discogs API error {}: {}", status, message);
            DiscogsError::HttpStatus {
                status: status.as_u16(),
                message,
            }
        }
    }
}
