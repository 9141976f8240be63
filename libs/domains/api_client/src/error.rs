use core_config::ConfigError;
use qdrant_client::QdrantError;
use thiserror::Error;

/// Coarse classification of an [`ApiClientError`], mirroring how a caller is
/// expected to react: fix the request, fix the configuration, or treat it as
/// an outage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRequest,
    Config,
    Internal,
}

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Connectivity error: {0}")]
    Connectivity(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiClientResult<T> = Result<T, ApiClientError>;

/// Phrases matched as whole words against a store message whose structured
/// status did not settle the classification.
const AUTH_MARKERS: &[&str] = &[
    "unauthorized",
    "unauthenticated",
    "forbidden",
    "permission denied",
    "permissiondenied",
    "invalid api key",
    "invalid api-key",
    "status 401",
    "status 403",
    "http 401",
    "http 403",
];

const CONNECTIVITY_MARKERS: &[&str] = &[
    "connection refused",
    "connection reset",
    "econnrefused",
    "etimedout",
    "timed out",
    "deadline exceeded",
    "deadlineexceeded",
    "service unavailable",
    "status unavailable",
    "transport error",
    "dns error",
    "failed to connect",
];

// gRPC status codes
const GRPC_CANCELLED: i32 = 1;
const GRPC_UNKNOWN: i32 = 2;
const GRPC_DEADLINE_EXCEEDED: i32 = 4;
const GRPC_PERMISSION_DENIED: i32 = 7;
const GRPC_UNAVAILABLE: i32 = 14;
const GRPC_UNAUTHENTICATED: i32 = 16;

/// Lowercased words of `message`. Identifiers such as `logs_401` or
/// `session-timeout` stay a single word.
fn words(message: &str) -> Vec<String> {
    message
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn contains_phrase(words: &[String], phrase: &str) -> bool {
    let phrase: Vec<&str> = phrase.split(' ').collect();
    words
        .windows(phrase.len())
        .any(|window| window.iter().zip(&phrase).all(|(word, expected)| word == expected))
}

fn mentions_any(words: &[String], markers: &[&str]) -> bool {
    markers.iter().any(|marker| contains_phrase(words, marker))
}

impl ApiClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiClientError::Config(_) => ErrorKind::Config,
            ApiClientError::InvalidRequest(_) | ApiClientError::Authentication(_) => {
                ErrorKind::InvalidRequest
            }
            ApiClientError::Connectivity(_)
            | ApiClientError::VectorStore(_)
            | ApiClientError::Embedding(_)
            | ApiClientError::InvalidResponse(_)
            | ApiClientError::Browser(_)
            | ApiClientError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Resolve a raw [`ApiClientError::VectorStore`] failure into its
    /// classified form. Other variants pass through untouched.
    pub fn classify(self) -> Self {
        match self {
            ApiClientError::VectorStore(message) => ApiClientError::from_store_failure(&message),
            other => other,
        }
    }

    /// Classify a vector store failure from its gRPC status.
    ///
    /// Credential codes point at the API key, unreachable or expired calls
    /// point at the URL. `Unknown` and `Cancelled` carry no useful code, so
    /// their message decides; every other code is internal.
    pub fn from_store_status(code: i32, message: &str) -> Self {
        match code {
            GRPC_UNAUTHENTICATED | GRPC_PERMISSION_DENIED => Self::store_authentication(message),
            GRPC_UNAVAILABLE | GRPC_DEADLINE_EXCEEDED => Self::store_connectivity(message),
            GRPC_UNKNOWN | GRPC_CANCELLED => Self::from_store_failure(message),
            _ => Self::store_internal(message),
        }
    }

    /// Classify a vector store failure by its message alone.
    ///
    /// Markers must appear as whole words, so collection names embedded in
    /// the message do not change the outcome. Anything unmatched is internal.
    pub fn from_store_failure(message: &str) -> Self {
        let words = words(message);

        if mentions_any(&words, AUTH_MARKERS) {
            Self::store_authentication(message)
        } else if mentions_any(&words, CONNECTIVITY_MARKERS) {
            Self::store_connectivity(message)
        } else {
            Self::store_internal(message)
        }
    }

    fn store_authentication(detail: &str) -> Self {
        ApiClientError::Authentication(format!(
            "vector store rejected the credentials, check the API key ({})",
            detail
        ))
    }

    fn store_connectivity(detail: &str) -> Self {
        ApiClientError::Connectivity(format!(
            "vector store is unreachable, check the URL and that the host is up ({})",
            detail
        ))
    }

    fn store_internal(detail: &str) -> Self {
        ApiClientError::Internal(format!("vector store operation failed: {}", detail))
    }
}

impl From<ConfigError> for ApiClientError {
    fn from(err: ConfigError) -> Self {
        ApiClientError::Config(err.to_string())
    }
}

impl From<QdrantError> for ApiClientError {
    fn from(err: QdrantError) -> Self {
        match &err {
            QdrantError::ResponseError { status, .. } => {
                ApiClientError::from_store_status(status.code() as i32, status.message())
            }
            _ => ApiClientError::VectorStore(err.to_string()),
        }
    }
}

impl From<reqwest::Error> for ApiClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiClientError::InvalidResponse(err.to_string())
        } else {
            ApiClientError::Embedding(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiClientError {
    fn from(err: serde_json::Error) -> Self {
        ApiClientError::InvalidResponse(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for ApiClientError {
    fn from(err: std::io::Error) -> Self {
        ApiClientError::Browser(err.to_string())
    }
}
