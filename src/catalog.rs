//! The catalog seam between the resolver and a metadata source.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ArtistAttributes, Credit, Release, Track};

/// A source of artist and release metadata.
///
/// [`DiscogsApi`](crate::api::DiscogsApi) is the production implementation.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch an artist with its complete release list.
    ///
    /// Unknown IDs must fail with [`DiscogsError::NotFound`](crate::DiscogsError::NotFound).
    async fn artist(&self, artist_id: u64) -> Result<ArtistAttributes>;

    /// Fetch full release detail.
    async fn release(&self, release_id: u64) -> Result<Release>;

    /// Extra artists credited on one track of `release`.
    ///
    /// Sources that embed track credits in the release detail can rely on
    /// the default, which returns the embedded list.
    async fn track_extra_artists(
        &self,
        _release: &Release,
        track: &Track,
    ) -> Result<Option<Vec<Credit>>> {
        Ok(track.extra_artists.clone())
    }
}
