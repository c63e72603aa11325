//! Caller-supplied configuration for a [`StreamClient`](crate::StreamClient).

use std::env;

/// Where the Stream API lives, unless told otherwise.
pub const DEFAULT_BASE_URL: &str = "https://video.bunnycdn.com/library/";

pub const API_KEY_VAR: &str = "BUNNY_STREAM_API_KEY";
pub const LIBRARY_ID_VAR: &str = "BUNNY_STREAM_LIBRARY_ID";
pub const BASE_URL_VAR: &str = "BUNNY_STREAM_BASE_URL";

/// API key and library the client talks to.
///
/// The configuration is fixed for the lifetime of a client; it is the only state a client
/// carries between calls.
#[derive(Clone, PartialEq, Eq)]
pub struct StreamConfig {
    /// The library's API key, sent as the `AccessKey` header.
    pub api_key: String,
    /// The numeric ID of the video library.
    pub library_id: u64,
    /// Prefix of every endpoint URL, ending in `/library/`.
    pub base_url: String,
}

impl StreamConfig {
    pub fn new(api_key: impl Into<String>, library_id: u64) -> Self {
        Self {
            api_key: api_key.into(),
            library_id,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Points the client at a different host, e.g. a proxy or a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Reads the configuration from `BUNNY_STREAM_API_KEY`, `BUNNY_STREAM_LIBRARY_ID` and,
    /// optionally, `BUNNY_STREAM_BASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(API_KEY_VAR).map_err(|_| ConfigError::Missing(API_KEY_VAR))?;
        let library_id =
            env::var(LIBRARY_ID_VAR).map_err(|_| ConfigError::Missing(LIBRARY_ID_VAR))?;
        let library_id = library_id
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidLibraryId(library_id))?;

        let mut config = Self::new(api_key, library_id);
        if let Ok(base_url) = env::var(BASE_URL_VAR) {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }

    /// Full URL of an endpoint within the configured library.
    ///
    /// `endpoint` is expected to start with `/`, e.g. `/videos/{id}`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}{}", self.base_url, self.library_id, endpoint)
    }
}

impl std::fmt::Debug for StreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamConfig")
            .field("api_key", &"<redacted>")
            .field("library_id", &self.library_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("library ID must be a number, got {0:?}")]
    InvalidLibraryId(String),
}
