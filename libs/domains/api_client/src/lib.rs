//! API Client Domain Library
//!
//! One façade, [`ApiClient`], over the three external services the rest of
//! the system depends on: a Qdrant vector store, an OpenAI-compatible
//! embeddings API and a headless Chromium browser.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────┐
//!                    │  ApiClient  │
//!                    └──────┬──────┘
//!          ┌────────────────┼──────────────────┐
//! ┌────────▼───────┐ ┌──────▼───────────┐ ┌────▼────────────┐
//! │  VectorStore   │ │EmbeddingProvider │ │ BrowserLauncher │
//! │    (trait)     │ │     (trait)      │ │     (trait)     │
//! └────────┬───────┘ └──────┬───────────┘ └────┬────────────┘
//! ┌────────▼───────┐ ┌──────▼───────────┐ ┌────▼────────────┐
//! │  QdrantStore   │ │ OpenAIProvider   │ │ChromiumLauncher │
//! └────────────────┘ │DirectHttpProvider│ └─────────────────┘
//!                    └──────────────────┘
//! ```
//!
//! # Failure policies
//!
//! - [`ApiClient::init_collection`] surfaces classified errors
//!   (authentication, connectivity, internal).
//! - [`ApiClient::get_embeddings`] never fails: when the embeddings service is
//!   unavailable it returns a random unit vector and logs a warning. Use
//!   [`ApiClient::embed`] to tell real embeddings from fallback ones.
//! - Browser operations propagate launcher errors unchanged.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_api_client::{ApiClient, ApiClientConfig, EmbeddingsConfig, QdrantConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ApiClientConfig::new(QdrantConfig::new("http://localhost:6334", "qdrant-key"))
//!     .with_embeddings(EmbeddingsConfig::new().with_base_url("http://localhost:11434"));
//! let client = ApiClient::new(config)?;
//!
//! client.init_collection("documents").await?;
//! let vector = client.get_embeddings("hello world").await;
//! assert_eq!(vector.len(), 768);
//!
//! client.init_browser().await?;
//! client.cleanup().await?;
//! # Ok(())
//! # }
//! ```

pub mod browser;
pub mod client;
pub mod config;
pub mod embedding;
pub mod error;
pub mod models;
pub mod qdrant;
pub mod repository;

pub use browser::{BrowserHandle, BrowserLauncher, ChromiumHandle, ChromiumLauncher};
pub use client::ApiClient;
pub use config::{ApiClientConfig, BrowserConfig, EmbeddingsConfig};
pub use embedding::{DirectHttpProvider, EmbeddingProvider, OpenAIProvider, random_unit_vector};
pub use error::{ApiClientError, ApiClientResult, ErrorKind};
pub use models::{
    CollectionDescriptor, DistanceMetric, EMBEDDING_DIMENSION, EMBEDDING_MODEL, Embedding,
    EmbeddingSource,
};
pub use qdrant::{QdrantConfig, QdrantStore};
pub use repository::VectorStore;
