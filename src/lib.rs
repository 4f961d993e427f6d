//! # discollab
//!
//! A Rust library for fetching artist metadata from Discogs and resolving
//! each artist's collaborators.
//!
//! ## Quick Start
//!
//! The easiest way to use this library is through the [`DiscogsBridge`] struct:
//!
//! ```rust,no_run
//! use discollab::DiscogsBridge;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create instance with a personal access token
//!     let bridge = DiscogsBridge::with_token("your_token")?;
//!
//!     // Artist plus collaborators on releases up to 1935
//!     let artist = bridge.get_artist_by_id(145257).await?;
//!     println!("{}: {} collaborators", artist.artist_name, artist.collaborators.len());
//!
//!     // Several artists at once
//!     let artists = bridge.get_artists_from_list(&[145257, 253281]).await?;
//!     println!("{}", serde_json::to_string_pretty(&artists)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Collaborators
//!
//! A collaborator is any other artist credited on one of the subject's
//! releases from years `1..=cutoff`: as a primary artist, as a release-level
//! extra artist, or as a track-level extra artist. Each collaborator appears
//! once, tagged with the release and role of its first appearance.
//!
//! ## Low-Level APIs
//!
//! - [`DiscogsApi`] - Discogs client returning typed models
//! - [`Resolver`] - Collaboration resolution over any [`Catalog`]

pub mod api;
mod bridge;
pub mod catalog;
pub mod config;
pub mod converters;
pub mod error;
pub mod models;
pub mod resolver;

// Main interface (recommended)
pub use bridge::DiscogsBridge;

// Low-level APIs
pub use api::DiscogsApi;
pub use catalog::Catalog;
pub use config::{ClientConfig, Credentials};
pub use error::DiscogsError;
pub use models::{ArtistAttributes, ArtistRecord, CollaboratorRecord, Credit, Release, ReleaseRef, Track};
pub use resolver::{BatchResolveResult, Resolver, DEFAULT_CUTOFF_YEAR};
