use serde::{Deserialize, Serialize};

/// Dimension of every embedding produced or accepted by this crate.
pub const EMBEDDING_DIMENSION: usize = 768;

/// Model requested from the embeddings endpoint.
pub const EMBEDDING_MODEL: &str = "nomic-embed-text";

/// Distance metric for similarity calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceMetric {
    #[default]
    Cosine,
    Euclidean,
    DotProduct,
    Manhattan,
}

/// Settings applied when a collection is created for the first time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionDescriptor {
    pub dimension: u64,
    pub distance: DistanceMetric,
    pub replication_factor: u32,
    pub segment_number: u64,
    pub memmap_threshold: u64,
}

impl Default for CollectionDescriptor {
    fn default() -> Self {
        Self {
            dimension: EMBEDDING_DIMENSION as u64,
            distance: DistanceMetric::Cosine,
            replication_factor: 2,
            segment_number: 2,
            memmap_threshold: 20_000,
        }
    }
}

/// Where an embedding's values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmbeddingSource {
    /// Produced by the configured embeddings service.
    Remote,
    /// Synthesized locally after the embeddings service failed.
    Fallback,
}

/// Embedding result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    pub values: Vec<f32>,
    pub source: EmbeddingSource,
}

impl Embedding {
    pub fn remote(values: Vec<f32>) -> Self {
        Self {
            values,
            source: EmbeddingSource::Remote,
        }
    }

    pub fn fallback(values: Vec<f32>) -> Self {
        Self {
            values,
            source: EmbeddingSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == EmbeddingSource::Fallback
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }
}
