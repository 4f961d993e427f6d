//! Client configuration and Discogs credentials.
//!
//! Credentials are always explicit: there is no built-in key or secret.

use std::time::Duration;

use crate::error::{DiscogsError, Result};

/// Base URL for the Discogs API.
pub const DEFAULT_BASE_URL: &str = "https://api.discogs.com/";

/// Default User-Agent. Discogs rejects requests without one.
pub const DEFAULT_USER_AGENT: &str = concat!("discollab/", env!("CARGO_PKG_VERSION"));

/// Page size used when walking an artist's release list.
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_TOKEN: &str = "DISCOGS_TOKEN";
pub const ENV_CONSUMER_KEY: &str = "DISCOGS_CONSUMER_KEY";
pub const ENV_CONSUMER_SECRET: &str = "DISCOGS_CONSUMER_SECRET";

/// How requests authenticate against Discogs.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Application consumer key and secret.
    KeySecret { key: String, secret: String },
    /// Personal access token.
    Token(String),
}

impl Credentials {
    /// Consumer key/secret credentials. Both values must be non-empty.
    pub fn key_secret<S1: Into<String>, S2: Into<String>>(key: S1, secret: S2) -> Result<Self> {
        let key = non_empty("consumer key", key.into())?;
        let secret = non_empty("consumer secret", secret.into())?;
        Ok(Credentials::KeySecret { key, secret })
    }

    /// Personal access token credentials.
    pub fn token<S: Into<String>>(token: S) -> Result<Self> {
        Ok(Credentials::Token(non_empty("token", token.into())?))
    }

    /// Read credentials from the environment.
    ///
    /// `DISCOGS_TOKEN` wins when set; otherwise both `DISCOGS_CONSUMER_KEY`
    /// and `DISCOGS_CONSUMER_SECRET` are required.
    pub fn from_env() -> Result<Self> {
        if let Some(token) = env_value(ENV_TOKEN) {
            return Self::token(token);
        }
        match (env_value(ENV_CONSUMER_KEY), env_value(ENV_CONSUMER_SECRET)) {
            (Some(key), Some(secret)) => Self::key_secret(key, secret),
            _ => Err(DiscogsError::InvalidConfig(format!(
                "set {} or both {} and {}",
                ENV_TOKEN, ENV_CONSUMER_KEY, ENV_CONSUMER_SECRET
            ))),
        }
    }

    /// Value of the `Authorization` header for these credentials.
    pub fn authorization(&self) -> String {
        match self {
            Credentials::KeySecret { key, secret } => {
                format!("Discogs key={}, secret={}", key, secret)
            }
            Credentials::Token(token) => format!("Discogs token={}", token),
        }
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::KeySecret { key, .. } => f
                .debug_struct("KeySecret")
                .field("key", key)
                .field("secret", &"***")
                .finish(),
            Credentials::Token(_) => f.debug_tuple("Token").field(&"***").finish(),
        }
    }
}

fn non_empty(what: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DiscogsError::InvalidConfig(format!("{} must not be empty", what)));
    }
    Ok(trimmed.to_string())
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Settings for [`DiscogsApi`](crate::api::DiscogsApi).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credentials: Credentials,
    /// API root, must end with `/`.
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Page size for paginated endpoints (Discogs caps it at 100).
    pub per_page: u32,
}

impl ClientConfig {
    /// Config with default endpoints for the given credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Config built from [`Credentials::from_env`].
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Credentials::from_env()?))
    }

    /// Override the API root.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        let mut url = base_url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the page size, clamped to `1..=100`.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, 100);
        self
    }
}
