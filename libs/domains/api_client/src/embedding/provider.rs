use async_trait::async_trait;

use crate::error::ApiClientResult;

/// Trait for embedding generation backends
///
/// Implementations call a remote service; they never synthesize values.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Short label used in logs
    fn name(&self) -> &'static str;

    /// Generate the embedding for a single text
    async fn embed(&self, text: &str) -> ApiClientResult<Vec<f32>>;
}
