//! Data models for Discogs responses and resolved records.
//!
//! This module contains the catalog-side structures (artists, releases,
//! credits, tracks) and the resolver's output records.

pub mod artist;
pub mod record;
pub mod release;

// Re-exports for convenience
pub use artist::{ArtistAttributes, ReleaseKind, ReleaseRef};
pub use record::{ArtistRecord, CollaboratorRecord};
pub use release::{Credit, Release, Track};
