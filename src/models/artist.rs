//! Artist-related models.
//!
//! This module contains models for an artist as the catalog reports it,
//! together with the references to its releases.

use serde::{Deserialize, Serialize};

/// Whether a release reference points at a concrete release or a master.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseKind {
    #[default]
    Release,
    Master,
}

impl ReleaseKind {
    /// Parse the `type` field of a release list entry.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("master") {
            ReleaseKind::Master
        } else {
            ReleaseKind::Release
        }
    }
}

/// Release when nested inside an artist's release list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReleaseRef {
    /// Release or master ID.
    pub id: u64,

    /// Release title.
    #[serde(default)]
    pub title: String,

    /// Release year, absent when unknown.
    #[serde(default)]
    pub year: Option<i32>,

    /// Release or master.
    #[serde(default)]
    pub kind: ReleaseKind,

    /// Main release of a master.
    #[serde(default)]
    pub main_release: Option<u64>,

    /// The artist's role on this release (e.g. "Main", "Appearance").
    #[serde(default)]
    pub role: Option<String>,
}

impl ReleaseRef {
    /// Create a plain release reference.
    pub fn new<S: Into<String>>(id: u64, title: S, year: Option<i32>) -> Self {
        Self {
            id,
            title: title.into(),
            year,
            ..Default::default()
        }
    }

    /// ID of the release whose detail should be fetched.
    ///
    /// Masters resolve to their main release; a master without one has
    /// nothing to fetch.
    pub fn detail_id(&self) -> Option<u64> {
        match self.kind {
            ReleaseKind::Release => Some(self.id),
            ReleaseKind::Master => self.main_release,
        }
    }

    /// Whether the release year lies in `(0, cutoff_year]`.
    pub fn within_year(&self, cutoff_year: i32) -> bool {
        matches!(self.year, Some(year) if year > 0 && year <= cutoff_year)
    }
}

/// An artist with its release history.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArtistAttributes {
    /// Artist ID.
    pub id: u64,

    /// Artist name.
    pub name: String,

    /// Legal name, if the catalog records one.
    #[serde(default)]
    pub real_name: Option<String>,

    /// Free-text biography.
    #[serde(default)]
    pub profile: Option<String>,

    /// Releases in catalog order.
    #[serde(default)]
    pub releases: Vec<ReleaseRef>,
}

impl ArtistAttributes {
    /// Create a new artist with no releases.
    pub fn new<S: Into<String>>(id: u64, name: S) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Real name, falling back to the artist name when none is recorded.
    pub fn real_name_or_name(&self) -> &str {
        match self.real_name.as_deref() {
            Some(real) if !real.trim().is_empty() => real,
            _ => &self.name,
        }
    }

    /// Releases whose year falls inside `(0, cutoff_year]`.
    pub fn releases_until(&self, cutoff_year: i32) -> Vec<&ReleaseRef> {
        self.releases
            .iter()
            .filter(|r| r.within_year(cutoff_year))
            .collect()
    }
}
