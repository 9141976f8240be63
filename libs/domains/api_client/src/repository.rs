use async_trait::async_trait;

use crate::error::ApiClientResult;
use crate::models::CollectionDescriptor;

/// Vector store operations the client relies on.
///
/// Errors are returned unclassified as [`crate::ApiClientError::VectorStore`];
/// callers decide how to surface them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Names of all collections currently present in the store
    async fn list_collection_names(&self) -> ApiClientResult<Vec<String>>;

    /// Create a collection with the given settings
    async fn create_collection(
        &self,
        name: &str,
        descriptor: &CollectionDescriptor,
    ) -> ApiClientResult<()>;
}
