//! Unified Discogs bridge interface.
//!
//! This module provides a high-level interface that bundles a
//! [`DiscogsApi`] client with a [`Resolver`] and a default cutoff year.

use crate::api::DiscogsApi;
use crate::config::{ClientConfig, Credentials};
use crate::error::Result;
use crate::models::ArtistRecord;
use crate::resolver::{BatchResolveResult, Resolver, DEFAULT_CUTOFF_YEAR};

/// Main bridge interface.
///
/// # Example
///
/// ```rust,no_run
/// use discollab::DiscogsBridge;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let bridge = DiscogsBridge::with_key_secret("consumer_key", "consumer_secret")?;
///
///     let artist = bridge.get_artist_by_id(145257).await?;
///     for c in &artist.collaborators {
///         println!("{} on release {} ({:?})", c.collaborator_name, c.release_id, c.roles);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DiscogsBridge {
    resolver: Resolver<DiscogsApi>,
    cutoff_year: i32,
}

impl DiscogsBridge {
    /// Create a bridge from a full client configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            resolver: Resolver::new(DiscogsApi::new(config)?),
            cutoff_year: DEFAULT_CUTOFF_YEAR,
        })
    }

    /// Create a bridge authenticated with a consumer key and secret.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either value is empty.
    pub fn with_key_secret(key: &str, secret: &str) -> Result<Self> {
        Self::new(ClientConfig::new(Credentials::key_secret(key, secret)?))
    }

    /// Create a bridge authenticated with a personal access token.
    pub fn with_token(token: &str) -> Result<Self> {
        Self::new(ClientConfig::new(Credentials::token(token)?))
    }

    /// Create a bridge from `DISCOGS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Set the default cutoff year used by the `get_*` methods.
    pub fn set_cutoff_year(&mut self, year: i32) {
        self.cutoff_year = year;
    }

    /// Get the default cutoff year.
    pub fn cutoff_year(&self) -> i32 {
        self.cutoff_year
    }

    /// The raw Discogs client.
    pub fn api(&self) -> &DiscogsApi {
        self.resolver.catalog()
    }

    /// Resolve an artist with the default cutoff year.
    pub async fn get_artist_by_id(&self, artist_id: u64) -> Result<ArtistRecord> {
        self.resolver.resolve_artist(artist_id, self.cutoff_year).await
    }

    /// Resolve an artist with an explicit cutoff year.
    pub async fn get_artist_by_id_with_year(&self, artist_id: u64, year: i32) -> Result<ArtistRecord> {
        self.resolver.resolve_artist(artist_id, year).await
    }

    /// Resolve several artists; the first failure aborts the batch.
    pub async fn get_artists_from_list(&self, artist_ids: &[u64]) -> Result<Vec<ArtistRecord>> {
        self.resolver.resolve_many(artist_ids, self.cutoff_year).await
    }

    /// Resolve several artists, collecting per-artist failures.
    pub async fn get_artists_from_list_lenient(&self, artist_ids: &[u64]) -> Result<BatchResolveResult> {
        self.resolver
            .resolve_many_lenient(artist_ids, self.cutoff_year)
            .await
    }
}
