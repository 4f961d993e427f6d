//! Collaboration resolution.
//!
//! Given an artist, walks the artist's releases up to a cutoff year and
//! collects every other artist credited on them. Contributors come from
//! three places per release:
//!
//! 1. the primary artists,
//! 2. the release-level extra artists,
//! 3. the extra artists of each track.
//!
//! All three feed one identity set, so a contributor is recorded once, with
//! the release and role of the first sighting. Lookups run strictly in
//! sequence, which is what makes "first" well defined.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::error::{DiscogsError, Result};
use crate::models::{ArtistAttributes, ArtistRecord, CollaboratorRecord, Credit, Release};

/// Cutoff year used when none is given.
pub const DEFAULT_CUTOFF_YEAR: i32 = 1935;

/// Result of a batch resolution that tolerates per-artist failures.
#[derive(Debug, Default)]
pub struct BatchResolveResult {
    /// Resolved artists, in input order.
    pub resolved: Vec<ArtistRecord>,
    /// Artist IDs that failed, with error messages.
    pub failed: Vec<(u64, String)>,
}

impl BatchResolveResult {
    /// Total number of artists attempted.
    pub fn total(&self) -> usize {
        self.resolved.len() + self.failed.len()
    }

    /// Check if every artist resolved.
    pub fn all_successful(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Ordered, deduplicated collaborators of one subject artist.
struct Collaborators {
    subject_id: u64,
    seen: HashSet<u64>,
    records: Vec<CollaboratorRecord>,
}

impl Collaborators {
    fn new(subject_id: u64) -> Self {
        Self {
            subject_id,
            seen: HashSet::new(),
            records: Vec::new(),
        }
    }

    /// Record `credit` unless it is the subject or was seen before.
    /// Returns whether it was added.
    fn offer(&mut self, credit: &Credit, release_id: u64, role: &str) -> bool {
        if credit.id == self.subject_id || !self.seen.insert(credit.id) {
            return false;
        }
        self.records.push(CollaboratorRecord::new(
            credit.id,
            credit.name.as_str(),
            release_id,
            role,
        ));
        true
    }

    /// Offer every credit, each with the role chosen by `role`.
    fn offer_all<'a, I, F>(&mut self, credits: I, release_id: u64, role: F) -> usize
    where
        I: IntoIterator<Item = &'a Credit>,
        F: Fn(&Credit) -> &str,
    {
        let mut added = 0;
        for credit in credits {
            if self.offer(credit, release_id, role(credit)) {
                added += 1;
            }
        }
        added
    }

    fn into_records(self) -> Vec<CollaboratorRecord> {
        self.records
    }
}

/// Resolves artists and their collaborators against a [`Catalog`].
///
/// # Example
///
/// ```rust,no_run
/// use discollab::{ClientConfig, Credentials, DiscogsApi, Resolver};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = DiscogsApi::new(ClientConfig::new(Credentials::token("your_token")?))?;
///     let resolver = Resolver::new(api);
///     let record = resolver.resolve_artist(145257, 1935).await?;
///     println!("{} has {} collaborators", record.artist_name, record.collaborators.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Resolver<C> {
    catalog: C,
}

impl<C: Catalog> Resolver<C> {
    /// Create a resolver over a catalog.
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// The underlying catalog.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Resolve one artist and its collaborators on releases from years
    /// `1..=cutoff_year`.
    ///
    /// # Errors
    ///
    /// Returns `ArtistNotFound` when the catalog cannot produce the artist
    /// (not found or an HTTP error status). Credential and quota errors,
    /// and failures fetching a release or track, abort the call and are
    /// returned unchanged.
    pub async fn resolve_artist(&self, artist_id: u64, cutoff_year: i32) -> Result<ArtistRecord> {
        let artist = self.catalog.artist(artist_id).await.map_err(|e| {
            if e.is_lookup_failure() {
                warn!("Lookup of artist {} failed: {}", artist_id, e);
                DiscogsError::artist_not_found()
            } else {
                e
            }
        })?;

        let mut collaborators = Collaborators::new(artist.id);

        for release_ref in artist.releases_until(cutoff_year) {
            let Some(release_id) = release_ref.detail_id() else {
                debug!("Master {} has no main release, skipping", release_ref.id);
                continue;
            };

            let release = self.catalog.release(release_id).await?;
            self.collect_release(&release, &mut collaborators).await?;
        }

        let record = build_record(&artist, collaborators.into_records());
        info!(
            "Resolved artist {} ({}) with {} collaborators",
            record.artist_id,
            record.artist_name,
            record.collaborators.len()
        );
        Ok(record)
    }

    /// Run the three contributor passes over one release.
    async fn collect_release(
        &self,
        release: &Release,
        collaborators: &mut Collaborators,
    ) -> Result<()> {
        let primary = collaborators.offer_all(release.artists(), release.id, |_| "");
        let extra = collaborators.offer_all(release.extra_artists(), release.id, |c| {
            c.role_or_empty()
        });

        let mut track_extra = 0;
        for track in release.tracks() {
            if let Some(credits) = self.catalog.track_extra_artists(release, track).await? {
                track_extra += collaborators.offer_all(&credits, release.id, |c| c.role_or_empty());
            }
        }

        debug!(
            "Release {}: {} primary, {} extra, {} track collaborators added",
            release.id, primary, extra, track_extra
        );
        Ok(())
    }

    /// Resolve artists in input order.
    ///
    /// The first failing artist aborts the batch and its error is returned.
    /// An empty input fails with `NoArtistsFound`.
    pub async fn resolve_many(&self, artist_ids: &[u64], cutoff_year: i32) -> Result<Vec<ArtistRecord>> {
        let mut records = Vec::with_capacity(artist_ids.len());
        for &artist_id in artist_ids {
            records.push(self.resolve_artist(artist_id, cutoff_year).await?);
        }

        if records.is_empty() {
            return Err(DiscogsError::no_artists_found());
        }
        Ok(records)
    }

    /// Resolve artists in input order, collecting failures instead of
    /// aborting.
    ///
    /// Fails with `NoArtistsFound` only if no artist resolved.
    pub async fn resolve_many_lenient(
        &self,
        artist_ids: &[u64],
        cutoff_year: i32,
    ) -> Result<BatchResolveResult> {
        let mut result = BatchResolveResult::default();

        for &artist_id in artist_ids {
            match self.resolve_artist(artist_id, cutoff_year).await {
                Ok(record) => result.resolved.push(record),
                Err(e) => {
                    warn!("Failed to resolve artist {}: {}", artist_id, e);
                    result.failed.push((artist_id, e.to_string()));
                }
            }
        }

        if result.resolved.is_empty() {
            return Err(DiscogsError::no_artists_found());
        }
        Ok(result)
    }
}

fn build_record(artist: &ArtistAttributes, collaborators: Vec<CollaboratorRecord>) -> ArtistRecord {
    ArtistRecord {
        artist_id: artist.id,
        artist_name: artist.name.clone(),
        real_name: artist.real_name_or_name().to_string(),
        profile: artist.profile.clone().unwrap_or_default(),
        level: 0,
        collaborators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReleaseKind, ReleaseRef, Track};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory catalog that records lookups in order.
    #[derive(Default)]
    struct MemoryCatalog {
        artists: HashMap<u64, ArtistAttributes>,
        releases: HashMap<u64, Release>,
        broken_releases: HashSet<u64>,
        artist_failure: Option<fn() -> DiscogsError>,
        calls: Mutex<Vec<String>>,
    }

    impl MemoryCatalog {
        fn with_artist(mut self, artist: ArtistAttributes) -> Self {
            self.artists.insert(artist.id, artist);
            self
        }

        fn with_release(mut self, release: Release) -> Self {
            self.releases.insert(release.id, release);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn log(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl Catalog for MemoryCatalog {
        async fn artist(&self, artist_id: u64) -> Result<ArtistAttributes> {
            self.log(format!("artist/{}", artist_id));
            if let Some(failure) = self.artist_failure {
                return Err(failure());
            }
            self.artists
                .get(&artist_id)
                .cloned()
                .ok_or_else(|| DiscogsError::NotFound(format!("artists/{}", artist_id)))
        }

        async fn release(&self, release_id: u64) -> Result<Release> {
            self.log(format!("release/{}", release_id));
            if self.broken_releases.contains(&release_id) {
                return Err(DiscogsError::HttpStatus {
                    status: 500,
                    message: "Internal Server Error".to_string(),
                });
            }
            self.releases
                .get(&release_id)
                .cloned()
                .ok_or_else(|| DiscogsError::NotFound(format!("releases/{}", release_id)))
        }

        async fn track_extra_artists(
            &self,
            release: &Release,
            track: &Track,
        ) -> Result<Option<Vec<Credit>>> {
            self.log(format!("track/{}/{}", release.id, track.position));
            Ok(track.extra_artists.clone())
        }
    }

    fn artist(id: u64, releases: Vec<ReleaseRef>) -> ArtistAttributes {
        ArtistAttributes {
            profile: Some("Bio".to_string()),
            releases,
            ..ArtistAttributes::new(id, format!("Artist {}", id))
        }
    }

    fn release(id: u64, year: i32, artists: Vec<Credit>, extra: Vec<Credit>) -> Release {
        Release {
            artists: Some(artists),
            extra_artists: Some(extra),
            ..Release::new(id, format!("Release {}", id), Some(year))
        }
    }

    fn track(position: &str, extra: Vec<Credit>) -> Track {
        Track {
            extra_artists: Some(extra),
            ..Track::new(position, "Song")
        }
    }

    /// Artist 100, release 1 (1930): primary [100, 200], extra [300 Producer].
    fn scenario_a(year: i32) -> MemoryCatalog {
        MemoryCatalog::default()
            .with_artist(artist(100, vec![ReleaseRef::new(1, "R1", Some(year))]))
            .with_release(release(
                1,
                year,
                vec![Credit::new(100, "Artist 100"), Credit::new(200, "Artist 200")],
                vec![Credit::with_role(300, "Artist 300", "Producer")],
            ))
    }

    #[tokio::test]
    async fn test_scenario_a() {
        let resolver = Resolver::new(scenario_a(1930));
        let record = resolver.resolve_artist(100, DEFAULT_CUTOFF_YEAR).await.unwrap();

        assert_eq!(
            record.collaborators,
            vec![
                CollaboratorRecord::new(200, "Artist 200", 1, ""),
                CollaboratorRecord::new(300, "Artist 300", 1, "Producer"),
            ]
        );
        assert_eq!(record.level, 0);
        assert_eq!(record.real_name, "Artist 100");
        assert_eq!(record.profile, "Bio");
    }

    #[tokio::test]
    async fn test_scenario_b_release_after_cutoff() {
        let resolver = Resolver::new(scenario_a(1940));
        let record = resolver.resolve_artist(100, 1935).await.unwrap();

        assert!(record.collaborators.is_empty());
        assert_eq!(record.artist_name, "Artist 100");
        assert_eq!(resolver.catalog().calls(), vec!["artist/100"]);
    }

    #[tokio::test]
    async fn test_scenario_c_unknown_artist() {
        let resolver = Resolver::new(MemoryCatalog::default());
        let err = resolver.resolve_artist(999, 1935).await.unwrap_err();

        assert!(matches!(err, DiscogsError::ArtistNotFound { code: -1, .. }));
    }

    #[tokio::test]
    async fn test_quota_exceeded_on_artist_is_not_masked() {
        let catalog = MemoryCatalog {
            artist_failure: Some(|| DiscogsError::QuotaExceeded),
            ..scenario_a(1930)
        };
        let err = Resolver::new(catalog)
            .resolve_artist(100, 1935)
            .await
            .unwrap_err();

        assert!(matches!(err, DiscogsError::QuotaExceeded));
        assert_eq!(err.code(), None);
    }

    #[tokio::test]
    async fn test_bad_credentials_on_artist_is_not_masked() {
        let catalog = MemoryCatalog {
            artist_failure: Some(|| DiscogsError::BadCredentials("Invalid consumer token".to_string())),
            ..scenario_a(1930)
        };
        let resolver = Resolver::new(catalog);

        let err = resolver.resolve_artist(100, 1935).await.unwrap_err();
        assert!(matches!(err, DiscogsError::BadCredentials(_)));

        let err = resolver.resolve_many(&[100, 200], 1935).await.unwrap_err();
        assert!(matches!(err, DiscogsError::BadCredentials(_)));
    }

    #[tokio::test]
    async fn test_http_status_on_artist_maps_to_artist_not_found() {
        let catalog = MemoryCatalog {
            artist_failure: Some(|| DiscogsError::HttpStatus {
                status: 502,
                message: "Bad Gateway".to_string(),
            }),
            ..MemoryCatalog::default()
        };
        let err = Resolver::new(catalog)
            .resolve_artist(100, 1935)
            .await
            .unwrap_err();
        assert!(matches!(err, DiscogsError::ArtistNotFound { code: -1, .. }));
    }

    #[tokio::test]
    async fn test_scenario_d_batch_propagates_first_failure() {
        let resolver = Resolver::new(scenario_a(1930));

        let err = resolver.resolve_many(&[999], 1935).await.unwrap_err();
        assert!(matches!(err, DiscogsError::ArtistNotFound { .. }));

        let err = resolver.resolve_many(&[100, 999, 100], 1935).await.unwrap_err();
        assert!(matches!(err, DiscogsError::ArtistNotFound { .. }));
        // The batch stops at the failing artist.
        assert_eq!(
            resolver
                .catalog()
                .calls()
                .iter()
                .filter(|c| c.starts_with("artist/"))
                .count(),
            3
        );
    }

    #[tokio::test]
    async fn test_batch_empty_input() {
        let resolver = Resolver::new(MemoryCatalog::default());
        let err = resolver.resolve_many(&[], 1935).await.unwrap_err();
        assert!(matches!(err, DiscogsError::NoArtistsFound { code: 404, .. }));
    }

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let catalog = scenario_a(1930).with_artist(artist(200, vec![]));
        let resolver = Resolver::new(catalog);

        let records = resolver.resolve_many(&[200, 100], 1935).await.unwrap();
        let ids: Vec<u64> = records.iter().map(|r| r.artist_id).collect();
        assert_eq!(ids, vec![200, 100]);
    }

    #[tokio::test]
    async fn test_lenient_batch_collects_failures() {
        let resolver = Resolver::new(scenario_a(1930));

        let result = resolver
            .resolve_many_lenient(&[999, 100], 1935)
            .await
            .unwrap();
        assert_eq!(result.total(), 2);
        assert!(!result.all_successful());
        assert_eq!(result.resolved[0].artist_id, 100);
        assert_eq!(result.failed[0].0, 999);

        let err = resolver.resolve_many_lenient(&[998, 999], 1935).await.unwrap_err();
        assert!(matches!(err, DiscogsError::NoArtistsFound { .. }));
    }

    #[tokio::test]
    async fn test_dedup_across_releases_and_passes() {
        let catalog = MemoryCatalog::default()
            .with_artist(artist(
                100,
                vec![
                    ReleaseRef::new(1, "R1", Some(1930)),
                    ReleaseRef::new(2, "R2", Some(1931)),
                ],
            ))
            .with_release(Release {
                tracklist: Some(vec![track("A1", vec![Credit::with_role(200, "B", "Bass")])]),
                ..release(
                    1,
                    1930,
                    vec![Credit::new(200, "B")],
                    vec![Credit::with_role(200, "B", "Arranger")],
                )
            })
            .with_release(release(
                2,
                1931,
                vec![Credit::new(200, "B"), Credit::new(300, "C")],
                vec![Credit::with_role(300, "C", "Producer")],
            ));

        let record = Resolver::new(catalog).resolve_artist(100, 1935).await.unwrap();
        assert_eq!(record.collaborator_ids(), vec![200, 300]);
    }

    #[tokio::test]
    async fn test_first_discovery_wins() {
        let catalog = MemoryCatalog::default()
            .with_artist(artist(
                100,
                vec![
                    ReleaseRef::new(1, "R1", Some(1930)),
                    ReleaseRef::new(2, "R2", Some(1931)),
                ],
            ))
            .with_release(release(1, 1930, vec![Credit::new(400, "X")], vec![]))
            .with_release(release(
                2,
                1931,
                vec![],
                vec![Credit::with_role(400, "X", "Trumpet")],
            ));

        let record = Resolver::new(catalog).resolve_artist(100, 1935).await.unwrap();
        let x = record.collaborator(400).unwrap();
        assert_eq!(x.release_id, 1);
        assert_eq!(x.roles, vec![""]);
    }

    #[tokio::test]
    async fn test_subject_excluded_from_every_pass() {
        let catalog = MemoryCatalog::default()
            .with_artist(artist(100, vec![ReleaseRef::new(1, "R1", Some(1930))]))
            .with_release(Release {
                tracklist: Some(vec![track(
                    "A1",
                    vec![Credit::with_role(100, "Self", "Vocals")],
                )]),
                ..release(
                    1,
                    1930,
                    vec![Credit::new(100, "Self")],
                    vec![Credit::with_role(100, "Self", "Leader")],
                )
            });

        let record = Resolver::new(catalog).resolve_artist(100, 1935).await.unwrap();
        assert!(record.collaborators.is_empty());
    }

    #[tokio::test]
    async fn test_year_window() {
        let catalog = MemoryCatalog::default()
            .with_artist(artist(
                100,
                vec![
                    ReleaseRef::new(1, "No year", None),
                    ReleaseRef::new(2, "Zero", Some(0)),
                    ReleaseRef::new(3, "Negative", Some(-1)),
                    ReleaseRef::new(4, "Cutoff", Some(1935)),
                    ReleaseRef::new(5, "Late", Some(1936)),
                ],
            ))
            .with_release(release(4, 1935, vec![Credit::new(201, "Edge")], vec![]));

        let resolver = Resolver::new(catalog);
        let record = resolver.resolve_artist(100, 1935).await.unwrap();

        assert_eq!(record.collaborator_ids(), vec![201]);
        assert_eq!(resolver.catalog().calls(), vec!["artist/100", "release/4"]);
    }

    #[tokio::test]
    async fn test_track_pass_runs_after_release_passes() {
        let catalog = MemoryCatalog::default()
            .with_artist(artist(100, vec![ReleaseRef::new(1, "R1", Some(1930))]))
            .with_release(Release {
                tracklist: Some(vec![
                    track("A1", vec![Credit::with_role(500, "Clarinet Player", "Clarinet")]),
                    Track::new("B1", "No credits"),
                    track("B2", vec![Credit::with_role(600, "Drummer", "Drums")]),
                ]),
                ..release(1, 1930, vec![Credit::new(200, "B")], vec![])
            });

        let resolver = Resolver::new(catalog);
        let record = resolver.resolve_artist(100, 1935).await.unwrap();

        assert_eq!(record.collaborator_ids(), vec![200, 500, 600]);
        assert_eq!(record.collaborator(600).unwrap().roles, vec!["Drums"]);
        assert_eq!(
            resolver.catalog().calls(),
            vec![
                "artist/100",
                "release/1",
                "track/1/A1",
                "track/1/B1",
                "track/1/B2"
            ]
        );
    }

    #[tokio::test]
    async fn test_absent_lists_contribute_nothing() {
        let catalog = MemoryCatalog::default()
            .with_artist(artist(100, vec![ReleaseRef::new(1, "R1", Some(1930))]))
            .with_release(Release::new(1, "Bare", Some(1930)));

        let record = Resolver::new(catalog).resolve_artist(100, 1935).await.unwrap();
        assert!(record.collaborators.is_empty());
    }

    #[tokio::test]
    async fn test_release_failure_aborts_resolution() {
        let mut catalog = scenario_a(1930);
        catalog.broken_releases.insert(1);

        let err = Resolver::new(catalog).resolve_artist(100, 1935).await.unwrap_err();
        assert!(matches!(err, DiscogsError::HttpStatus { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_master_resolves_through_main_release() {
        let catalog = MemoryCatalog::default()
            .with_artist(artist(
                100,
                vec![
                    ReleaseRef {
                        id: 50,
                        year: Some(1930),
                        kind: ReleaseKind::Master,
                        main_release: Some(1),
                        ..Default::default()
                    },
                    ReleaseRef {
                        id: 60,
                        year: Some(1930),
                        kind: ReleaseKind::Master,
                        main_release: None,
                        ..Default::default()
                    },
                ],
            ))
            .with_release(release(1, 1930, vec![Credit::new(200, "B")], vec![]));

        let resolver = Resolver::new(catalog);
        let record = resolver.resolve_artist(100, 1935).await.unwrap();

        assert_eq!(record.collaborator(200).unwrap().release_id, 1);
        assert_eq!(resolver.catalog().calls(), vec!["artist/100", "release/1"]);
    }

    #[test]
    fn test_resolver_is_reusable_across_calls() {
        let resolver = Resolver::new(scenario_a(1930));
        let first = tokio_test::block_on(resolver.resolve_artist(100, 1935)).unwrap();
        let second = tokio_test::block_on(resolver.resolve_artist(100, 1935)).unwrap();
        assert_eq!(first, second);
        assert_eq!(second.collaborators.len(), 2);
    }
}
