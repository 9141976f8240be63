use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::EmbeddingProvider;
use crate::error::{ApiClientError, ApiClientResult};
use crate::models::EMBEDDING_MODEL;

/// Default endpoint of the hosted embeddings API
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Serialize)]
pub(super) struct EmbeddingRequest<'a> {
    pub model: &'a str,
    pub input: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct EmbeddingResponse {
    pub data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
pub(super) struct EmbeddingData {
    pub embedding: Vec<f32>,
}

/// POST a single-input embeddings request and pull `data[0].embedding` out of the reply.
pub(super) async fn request_embedding(
    client: &Client,
    url: &str,
    api_key: Option<&str>,
    text: &str,
) -> ApiClientResult<Vec<f32>> {
    let request = EmbeddingRequest {
        model: EMBEDDING_MODEL,
        input: text,
    };

    let mut builder = client
        .post(url)
        .header("Content-Type", "application/json")
        .json(&request);

    if let Some(key) = api_key {
        builder = builder.header("Authorization", format!("Bearer {}", key));
    }

    let response = builder.send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(ApiClientError::Embedding(format!(
            "embeddings API error ({}): {}",
            status, error_text
        )));
    }

    let body = response.bytes().await?;
    let parsed: EmbeddingResponse = serde_json::from_slice(&body).map_err(|e| {
        ApiClientError::InvalidResponse(format!("expected {{ data: [{{ embedding }}] }}: {}", e))
    })?;

    parsed
        .data
        .into_iter()
        .next()
        .map(|d| d.embedding)
        .ok_or_else(|| ApiClientError::InvalidResponse("response data is empty".to_string()))
}

/// Hosted embeddings API client, authenticated with a static key.
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: OPENAI_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different OpenAI-compatible deployment.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/embeddings", self.base_url)
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn embed(&self, text: &str) -> ApiClientResult<Vec<f32>> {
        request_embedding(&self.client, &self.endpoint(), Some(&self.api_key), text).await
    }
}
