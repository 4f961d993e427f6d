//! Release-related models.
//!
//! A release carries contributors at three granularities: the primary
//! artists, release-level extra artists and per-track extra artists.

use serde::{Deserialize, Serialize};

/// An artist credited on a release or track.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credit {
    /// Artist ID. Zero means the entry has no artist identity.
    pub id: u64,

    /// Artist name as credited.
    pub name: String,

    /// Credited role, e.g. "Producer". Primary artists usually have none.
    #[serde(default)]
    pub role: Option<String>,
}

impl Credit {
    /// Create a credit without a role.
    pub fn new<S: Into<String>>(id: u64, name: S) -> Self {
        Self {
            id,
            name: name.into(),
            role: None,
        }
    }

    /// Create a credit with a role.
    pub fn with_role<S1: Into<String>, S2: Into<String>>(id: u64, name: S1, role: S2) -> Self {
        Self {
            id,
            name: name.into(),
            role: Some(role.into()),
        }
    }

    /// Role string, empty when none was credited.
    pub fn role_or_empty(&self) -> &str {
        self.role.as_deref().unwrap_or("")
    }
}

/// Track when nested inside a release.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Track {
    /// Position on the release, e.g. "A1".
    #[serde(default)]
    pub position: String,

    /// Track title.
    pub title: String,

    /// Duration as printed, e.g. "3:05".
    #[serde(default)]
    pub duration: Option<String>,

    /// Extra artists credited on this track only.
    #[serde(default)]
    pub extra_artists: Option<Vec<Credit>>,
}

impl Track {
    /// Create a track without credits.
    pub fn new<S1: Into<String>, S2: Into<String>>(position: S1, title: S2) -> Self {
        Self {
            position: position.into(),
            title: title.into(),
            ..Default::default()
        }
    }
}

/// A full release record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Release {
    /// Release ID.
    pub id: u64,

    /// Release title.
    #[serde(default)]
    pub title: String,

    /// Release year, absent when unknown.
    #[serde(default)]
    pub year: Option<i32>,

    /// Primary artists.
    #[serde(default)]
    pub artists: Option<Vec<Credit>>,

    /// Release-level extra artists.
    #[serde(default)]
    pub extra_artists: Option<Vec<Credit>>,

    /// Tracks in order.
    #[serde(default)]
    pub tracklist: Option<Vec<Track>>,
}

impl Release {
    /// Create an empty release.
    pub fn new<S: Into<String>>(id: u64, title: S, year: Option<i32>) -> Self {
        Self {
            id,
            title: title.into(),
            year,
            ..Default::default()
        }
    }

    /// Primary artists, empty when absent.
    pub fn artists(&self) -> &[Credit] {
        self.artists.as_deref().unwrap_or_default()
    }

    /// Release-level extra artists, empty when absent.
    pub fn extra_artists(&self) -> &[Credit] {
        self.extra_artists.as_deref().unwrap_or_default()
    }

    /// Tracks, empty when absent.
    pub fn tracks(&self) -> &[Track] {
        self.tracklist.as_deref().unwrap_or_default()
    }

    /// Primary artist names joined with a separator.
    pub fn artists_string(&self, separator: &str) -> String {
        self.artists()
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }
}
