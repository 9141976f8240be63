use core_config::{ConfigError, FromEnv, env_parse_or, env_required};

use crate::error::{ApiClientError, ApiClientResult};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Qdrant connection configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QdrantConfig {
    pub url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl QdrantConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Both the URL and the API key must be present and non-blank.
    pub fn validate(&self) -> ApiClientResult<()> {
        if self.url.trim().is_empty() {
            return Err(ApiClientError::Config(
                "vector store URL is required but not set".to_string(),
            ));
        }
        if self.api_key.trim().is_empty() {
            return Err(ApiClientError::Config(
                "vector store API key is required but not set".to_string(),
            ));
        }
        Ok(())
    }
}

impl FromEnv for QdrantConfig {
    /// Requires QDRANT_URL and QDRANT_API_KEY; QDRANT_TIMEOUT_SECS defaults to 30
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_required("QDRANT_URL")?,
            api_key: env_required("QDRANT_API_KEY")?,
            timeout_secs: env_parse_or("QDRANT_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
        })
    }
}
