//! Resolved artist records.
//!
//! These are the output of collaboration resolution. Field names in JSON
//! follow the shape consumers of the data layer expect.

use serde::{Deserialize, Serialize};

/// One unique contributor found on the subject artist's releases.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CollaboratorRecord {
    #[serde(rename = "collaboratorID")]
    pub collaborator_id: u64,

    #[serde(rename = "collaboratorName")]
    pub collaborator_name: String,

    /// Release on which the contributor was first found.
    #[serde(rename = "releaseID")]
    pub release_id: u64,

    /// Roles credited at discovery; `[""]` for primary artists.
    pub roles: Vec<String>,
}

impl CollaboratorRecord {
    pub fn new<S1: Into<String>, S2: Into<String>>(
        collaborator_id: u64,
        collaborator_name: S1,
        release_id: u64,
        role: S2,
    ) -> Self {
        Self {
            collaborator_id,
            collaborator_name: collaborator_name.into(),
            release_id,
            roles: vec![role.into()],
        }
    }
}

/// An artist with its collaboration graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArtistRecord {
    #[serde(rename = "artistID")]
    pub artist_id: u64,

    #[serde(rename = "artistName")]
    pub artist_name: String,

    #[serde(rename = "realname")]
    pub real_name: String,

    pub profile: String,

    /// Reserved for ranking; always 0 when freshly resolved.
    pub level: u32,

    /// Collaborators in discovery order.
    #[serde(default)]
    pub collaborators: Vec<CollaboratorRecord>,
}

impl ArtistRecord {
    /// Look up a collaborator by ID.
    pub fn collaborator(&self, collaborator_id: u64) -> Option<&CollaboratorRecord> {
        self.collaborators
            .iter()
            .find(|c| c.collaborator_id == collaborator_id)
    }

    /// Collaborator IDs in discovery order.
    pub fn collaborator_ids(&self) -> Vec<u64> {
        self.collaborators.iter().map(|c| c.collaborator_id).collect()
    }
}
