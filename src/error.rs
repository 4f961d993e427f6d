//! Error types for Discogs lookups and collaboration resolution.

use thiserror::Error;

/// Advisory code carried by [`DiscogsError::ArtistNotFound`].
pub const ARTIST_LOOKUP_FAILED: i32 = -1;

/// Advisory code carried by [`DiscogsError::NoArtistsFound`].
pub const NO_ARTISTS_FOUND: i32 = 404;

/// Main error type for all Discogs operations.
#[derive(Debug, Error)]
pub enum DiscogsError {
    /// The subject artist of a resolution could not be looked up.
    #[error("Artist not found: {message} (code {code})")]
    ArtistNotFound { message: String, code: i32 },

    /// A batch resolution produced no artists at all.
    #[error("No artists found: {message} (code {code})")]
    NoArtistsFound { message: String, code: i32 },

    /// The service answered 404 for a resource.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Missing, invalid or rejected credentials.
    #[error("Bad credentials: {0}")]
    BadCredentials(String),

    /// Too many requests - rate limited.
    #[error("Quota exceeded: too many requests")]
    QuotaExceeded,

    /// Any other non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// The response did not contain the expected payload.
    #[error("No data from API: {0}")]
    NoDataApi(String),

    /// Client configuration is unusable.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// HTTP request failed.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl DiscogsError {
    /// Build the error raised when a single artist lookup fails.
    pub fn artist_not_found() -> Self {
        DiscogsError::ArtistNotFound {
            message: "Can't find artist.".to_string(),
            code: ARTIST_LOOKUP_FAILED,
        }
    }

    /// Build the error raised when a batch yields nothing.
    pub fn no_artists_found() -> Self {
        DiscogsError::NoArtistsFound {
            message: "No artists found".to_string(),
            code: NO_ARTISTS_FOUND,
        }
    }

    /// Advisory numeric code, if this kind carries one.
    ///
    /// The code is informational only and is not an HTTP status contract.
    pub fn code(&self) -> Option<i32> {
        match self {
            DiscogsError::ArtistNotFound { code, .. } | DiscogsError::NoArtistsFound { code, .. } => {
                Some(*code)
            }
            _ => None,
        }
    }

    /// Whether the service could not produce the requested resource.
    ///
    /// Credential, quota, transport and parse failures are not lookup
    /// failures; they say nothing about the resource itself.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            DiscogsError::NotFound(_) | DiscogsError::HttpStatus { .. }
        )
    }
}

/// Result type alias for Discogs operations.
pub type Result<T> = std::result::Result<T, DiscogsError>;
