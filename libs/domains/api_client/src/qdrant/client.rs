use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, OptimizersConfigDiffBuilder, VectorParamsBuilder,
};
use tracing::debug;

use super::QdrantConfig;
use crate::error::{ApiClientError, ApiClientResult};
use crate::models::{CollectionDescriptor, DistanceMetric};
use crate::repository::VectorStore;

/// Qdrant-backed implementation of [`VectorStore`]
pub struct QdrantStore {
    client: Qdrant,
}

impl QdrantStore {
    pub fn new(config: &QdrantConfig) -> ApiClientResult<Self> {
        config.validate()?;

        let client = Qdrant::from_url(&config.url)
            .api_key(config.api_key.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .skip_compatibility_check()
            .build()
            .map_err(|e| ApiClientError::Config(format!("Failed to build Qdrant client: {}", e)))?;

        Ok(Self { client })
    }

    fn to_qdrant_distance(metric: DistanceMetric) -> Distance {
        match metric {
            DistanceMetric::Cosine => Distance::Cosine,
            DistanceMetric::Euclidean => Distance::Euclid,
            DistanceMetric::DotProduct => Distance::Dot,
            DistanceMetric::Manhattan => Distance::Manhattan,
        }
    }

    #[allow(deprecated)]
    fn create_builder(name: &str, descriptor: &CollectionDescriptor) -> CreateCollectionBuilder {
        CreateCollectionBuilder::new(name)
            .vectors_config(VectorParamsBuilder::new(
                descriptor.dimension,
                Self::to_qdrant_distance(descriptor.distance),
            ))
            .replication_factor(descriptor.replication_factor)
            .optimizers_config(
                OptimizersConfigDiffBuilder::default()
                    .default_segment_number(descriptor.segment_number)
                    .memmap_threshold(descriptor.memmap_threshold),
            )
    }
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn list_collection_names(&self) -> ApiClientResult<Vec<String>> {
        let response = self.client.list_collections().await?;

        Ok(response
            .collections
            .into_iter()
            .map(|collection| collection.name)
            .collect())
    }

    async fn create_collection(
        &self,
        name: &str,
        descriptor: &CollectionDescriptor,
    ) -> ApiClientResult<()> {
        debug!(collection = name, ?descriptor, "Creating Qdrant collection");
        self.client
            .create_collection(Self::create_builder(name, descriptor))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdrant_client::qdrant::CreateCollection;

    #[test]
    fn test_distance_mapping() {
        assert_eq!(
            QdrantStore::to_qdrant_distance(DistanceMetric::Cosine),
            Distance::Cosine
        );
        assert_eq!(
            QdrantStore::to_qdrant_distance(DistanceMetric::Euclidean),
            Distance::Euclid
        );
        assert_eq!(
            QdrantStore::to_qdrant_distance(DistanceMetric::DotProduct),
            Distance::Dot
        );
    }

    #[test]
    fn test_new_rejects_missing_api_key() {
        let config = QdrantConfig::new("http://localhost:6334", "");
        assert!(matches!(
            QdrantStore::new(&config),
            Err(ApiClientError::Config(_))
        ));
    }

    #[allow(deprecated)]
    #[test]
    fn test_create_builder_applies_descriptor() {
        let request: CreateCollection =
            QdrantStore::create_builder("docs", &CollectionDescriptor::default()).into();

        assert_eq!(request.collection_name, "docs");
        assert_eq!(request.replication_factor, Some(2));

        let optimizers = request.optimizers_config.unwrap();
        assert_eq!(optimizers.default_segment_number, Some(2));
        assert_eq!(optimizers.memmap_threshold, Some(20_000));
    }
}
