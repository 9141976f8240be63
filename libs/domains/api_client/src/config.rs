use std::path::PathBuf;

use core_config::{ConfigError, FromEnv, env_optional, env_parse_or};

use crate::error::ApiClientResult;
use crate::qdrant::QdrantConfig;

/// Embeddings service configuration. Both fields are optional: with neither
/// set, every embedding request degrades to a fallback vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddingsConfig {
    /// Enables the hosted API client and is sent as bearer auth on the direct path
    pub api_key: Option<String>,
    /// Routes embedding requests to a self-hosted endpoint instead of the hosted API
    pub base_url: Option<String>,
}

impl EmbeddingsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Blank strings are treated as absent.
    pub(crate) fn normalized(self) -> Self {
        let keep = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            api_key: keep(self.api_key),
            base_url: keep(self.base_url),
        }
    }
}

impl FromEnv for EmbeddingsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_optional("OPENAI_API_KEY"),
            base_url: env_optional("OPENAI_BASE_URL"),
        })
    }
}

const DEFAULT_LAUNCH_TIMEOUT_SECS: u64 = 30;

/// Headless browser launch settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Explicit browser binary; when unset the PATH is searched
    pub executable: Option<PathBuf>,
    /// Extra command line flags appended after the defaults
    pub extra_args: Vec<String>,
    /// How long to wait for the DevTools endpoint to come up
    pub launch_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            executable: None,
            extra_args: Vec::new(),
            launch_timeout_secs: DEFAULT_LAUNCH_TIMEOUT_SECS,
        }
    }
}

impl BrowserConfig {
    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = Some(executable.into());
        self
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    pub fn with_launch_timeout(mut self, secs: u64) -> Self {
        self.launch_timeout_secs = secs;
        self
    }
}

impl FromEnv for BrowserConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default().with_launch_timeout(env_parse_or(
            "BROWSER_LAUNCH_TIMEOUT_SECS",
            DEFAULT_LAUNCH_TIMEOUT_SECS,
        )?);

        if let Some(executable) = env_optional("BROWSER_EXECUTABLE") {
            config = config.with_executable(executable);
        }
        // Whitespace separated, e.g. "--no-sandbox --lang=en-US"
        for arg in env_optional("BROWSER_ARGS").unwrap_or_default().split_whitespace() {
            config = config.with_arg(arg);
        }

        Ok(config)
    }
}

/// Everything [`crate::ApiClient`] needs to build its collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientConfig {
    pub qdrant: QdrantConfig,
    pub embeddings: EmbeddingsConfig,
    pub browser: BrowserConfig,
}

impl ApiClientConfig {
    pub fn new(qdrant: QdrantConfig) -> Self {
        Self {
            qdrant,
            embeddings: EmbeddingsConfig::default(),
            browser: BrowserConfig::default(),
        }
    }

    pub fn with_embeddings(mut self, embeddings: EmbeddingsConfig) -> Self {
        self.embeddings = embeddings.normalized();
        self
    }

    pub fn with_browser(mut self, browser: BrowserConfig) -> Self {
        self.browser = browser;
        self
    }

    pub fn validate(&self) -> ApiClientResult<()> {
        self.qdrant.validate()
    }
}

impl FromEnv for ApiClientConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(QdrantConfig::from_env()?)
            .with_embeddings(EmbeddingsConfig::from_env()?)
            .with_browser(BrowserConfig::from_env()?))
    }
}
