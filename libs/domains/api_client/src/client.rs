use std::sync::Arc;

use core_config::FromEnv;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

use crate::browser::{BrowserHandle, BrowserLauncher, ChromiumLauncher};
use crate::config::ApiClientConfig;
use crate::embedding::{DirectHttpProvider, EmbeddingProvider, OpenAIProvider, random_unit_vector};
use crate::error::{ApiClientError, ApiClientResult};
use crate::models::{CollectionDescriptor, EMBEDDING_DIMENSION, Embedding};
use crate::qdrant::QdrantStore;
use crate::repository::VectorStore;

/// Single access point for embeddings, collection provisioning and the
/// headless browser.
///
/// The vector store and embeddings clients are fixed at construction. The
/// browser slot is the only mutable state: it moves from empty to launched on
/// [`ApiClient::init_browser`] and back on [`ApiClient::cleanup`].
pub struct ApiClient {
    store: Arc<dyn VectorStore>,
    embeddings: Option<Arc<dyn EmbeddingProvider>>,
    direct_embeddings: Option<Arc<dyn EmbeddingProvider>>,
    launcher: Arc<dyn BrowserLauncher>,
    browser: Mutex<Option<Box<dyn BrowserHandle>>>,
    descriptor: CollectionDescriptor,
}

impl ApiClient {
    /// Build every collaborator from `config`.
    ///
    /// Fails before creating any client when the vector store URL or API key
    /// is missing.
    pub fn new(config: ApiClientConfig) -> ApiClientResult<Self> {
        config.validate()?;

        let store = QdrantStore::new(&config.qdrant)?;

        let embeddings_config = config.embeddings.normalized();

        let embeddings = embeddings_config
            .api_key
            .clone()
            .map(|key| Arc::new(OpenAIProvider::new(key)) as Arc<dyn EmbeddingProvider>);

        let direct_embeddings = embeddings_config.base_url.as_deref().map(|base_url| {
            Arc::new(DirectHttpProvider::new(
                base_url,
                embeddings_config.api_key.clone(),
            )) as Arc<dyn EmbeddingProvider>
        });

        info!(
            qdrant_url = %config.qdrant.url,
            embeddings_client = embeddings.is_some(),
            embeddings_base_url = embeddings_config.base_url.as_deref(),
            "API client configured"
        );

        Ok(Self::with_components(
            Arc::new(store),
            embeddings,
            direct_embeddings,
            Arc::new(ChromiumLauncher::new(config.browser)),
        ))
    }

    /// Load [`ApiClientConfig`] from the process environment and build the client.
    pub fn from_env() -> ApiClientResult<Self> {
        Self::new(ApiClientConfig::from_env()?)
    }

    /// Assemble a client from already-built collaborators.
    ///
    /// `direct_embeddings`, when present, takes precedence over `embeddings`.
    pub fn with_components(
        store: Arc<dyn VectorStore>,
        embeddings: Option<Arc<dyn EmbeddingProvider>>,
        direct_embeddings: Option<Arc<dyn EmbeddingProvider>>,
        launcher: Arc<dyn BrowserLauncher>,
    ) -> Self {
        Self {
            store,
            embeddings,
            direct_embeddings,
            launcher,
            browser: Mutex::new(None),
            descriptor: CollectionDescriptor::default(),
        }
    }

    pub fn has_embeddings_client(&self) -> bool {
        self.embeddings.is_some()
    }

    // ===== Browser lifecycle =====

    /// Launch the headless browser unless one is already running.
    ///
    /// The slot stays locked for the whole launch, so concurrent callers wait
    /// for the first launch instead of starting a second process.
    #[instrument(skip(self))]
    pub async fn init_browser(&self) -> ApiClientResult<()> {
        let mut slot = self.browser.lock().await;
        if slot.is_some() {
            debug!("Browser already running");
            return Ok(());
        }

        let handle = self.launcher.launch().await?;
        info!(pid = handle.id(), "Browser launched");
        *slot = Some(handle);
        Ok(())
    }

    /// Close the browser if one is running. No-op otherwise.
    #[instrument(skip(self))]
    pub async fn cleanup(&self) -> ApiClientResult<()> {
        let handle = self.browser.lock().await.take();

        match handle {
            Some(mut handle) => {
                let pid = handle.id();
                handle.close().await?;
                info!(pid, "Browser closed");
            }
            None => debug!("No browser to close"),
        }

        Ok(())
    }

    pub async fn has_browser(&self) -> bool {
        self.browser.lock().await.is_some()
    }

    // ===== Embeddings =====

    /// Embed `text`, always returning [`EMBEDDING_DIMENSION`] values.
    ///
    /// Any failure of the embeddings service is logged and replaced with a
    /// random unit vector; callers cannot tell the two apart from the values.
    /// Use [`ApiClient::embed`] to see which one was returned.
    pub async fn get_embeddings(&self, text: &str) -> Vec<f32> {
        self.embed(text).await.values
    }

    /// Like [`ApiClient::get_embeddings`], tagged with where the values came from.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn embed(&self, text: &str) -> Embedding {
        match self.try_embed(text).await {
            Ok(values) => Embedding::remote(values),
            Err(err) => {
                warn!(
                    error = %err,
                    fallback = true,
                    "Embedding generation failed, returning random vector"
                );
                Embedding::fallback(random_unit_vector(EMBEDDING_DIMENSION))
            }
        }
    }

    async fn try_embed(&self, text: &str) -> ApiClientResult<Vec<f32>> {
        let provider = self
            .direct_embeddings
            .as_ref()
            .or(self.embeddings.as_ref())
            .ok_or_else(|| {
                ApiClientError::InvalidRequest(
                    "no embeddings client configured, set an API key or base URL".to_string(),
                )
            })?;

        let values = provider.embed(text).await?;
        debug!(provider = provider.name(), dimension = values.len(), "Embedding generated");

        if values.len() != EMBEDDING_DIMENSION {
            return Err(ApiClientError::InvalidResponse(format!(
                "expected {} dimensions, got {}",
                EMBEDDING_DIMENSION,
                values.len()
            )));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ApiClientError::InvalidResponse(
                "embedding contains non-finite values".to_string(),
            ));
        }

        Ok(values)
    }

    // ===== Collections =====

    /// Make sure collection `name` exists, creating it with the default
    /// [`CollectionDescriptor`] if it does not.
    ///
    /// Store failures are classified into authentication, connectivity or
    /// internal errors. Nothing is retried.
    #[instrument(skip(self))]
    pub async fn init_collection(&self, name: &str) -> ApiClientResult<()> {
        if name.trim().is_empty() {
            return Err(ApiClientError::InvalidRequest(
                "collection name must not be empty".to_string(),
            ));
        }

        self.ensure_collection(name).await.map_err(|err| {
            let err = err.classify();
            error!(error = %err, kind = ?err.kind(), "Collection initialization failed");
            err
        })
    }

    async fn ensure_collection(&self, name: &str) -> ApiClientResult<()> {
        let existing = self.store.list_collection_names().await?;
        if existing.iter().any(|collection| collection == name) {
            debug!("Collection already exists");
            return Ok(());
        }

        self.store.create_collection(name, &self.descriptor).await?;
        info!(
            dimension = self.descriptor.dimension,
            replication_factor = self.descriptor.replication_factor,
            "Collection created"
        );
        Ok(())
    }
}
