use async_trait::async_trait;
use reqwest::Client;

use super::EmbeddingProvider;
use super::openai::request_embedding;
use crate::error::ApiClientResult;

/// Embeddings over plain HTTP against a self-hosted, OpenAI-compatible server
/// (Ollama, LM Studio, vLLM...). Bearer auth is sent only when a key is set.
pub struct DirectHttpProvider {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl DirectHttpProvider {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: Self::endpoint_url(base_url),
            api_key,
        }
    }

    /// `<base>/embeddings` when the base already ends in `/v1`, otherwise
    /// `<base>/v1/embeddings`.
    pub fn endpoint_url(base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        if base.ends_with("/v1") {
            format!("{}/embeddings", base)
        } else {
            format!("{}/v1/embeddings", base)
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EmbeddingProvider for DirectHttpProvider {
    fn name(&self) -> &'static str {
        "direct-http"
    }

    async fn embed(&self, text: &str) -> ApiClientResult<Vec<f32>> {
        request_embedding(&self.client, &self.endpoint, self.api_key.as_deref(), text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiClientError;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    #[test]
    fn test_endpoint_url_resolution() {
        assert_eq!(
            DirectHttpProvider::endpoint_url("http://localhost:11434"),
            "http://localhost:11434/v1/embeddings"
        );
        assert_eq!(
            DirectHttpProvider::endpoint_url("http://localhost:11434/v1"),
            "http://localhost:11434/v1/embeddings"
        );
        assert_eq!(
            DirectHttpProvider::endpoint_url("http://localhost:11434/v1/"),
            "http://localhost:11434/v1/embeddings"
        );
        assert_eq!(
            DirectHttpProvider::endpoint_url("http://gateway/api"),
            "http://gateway/api/v1/embeddings"
        );
    }

    #[tokio::test]
    async fn test_no_authorization_header_without_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .and(|request: &Request| !request.headers.contains_key("authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{ "embedding": [1.0, 0.0] }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = DirectHttpProvider::new(&server.uri(), None);
        assert_eq!(provider.embed("text").await.unwrap(), vec![1.0, 0.0]);
    }

    #[tokio::test]
    async fn test_bearer_header_with_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .and(wiremock::matchers::header("Authorization", "Bearer local-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{ "embedding": [0.5] }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider =
            DirectHttpProvider::new(&format!("{}/v1", server.uri()), Some("local-key".to_string()));
        assert_eq!(provider.embed("text").await.unwrap(), vec![0.5]);
    }

    #[tokio::test]
    async fn test_invalid_response_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "embeddings": [] })),
            )
            .mount(&server)
            .await;

        let provider = DirectHttpProvider::new(&server.uri(), None);
        let err = provider.embed("text").await.unwrap_err();
        assert!(matches!(err, ApiClientError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_empty_data_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })),
            )
            .mount(&server)
            .await;

        let provider = DirectHttpProvider::new(&server.uri(), None);
        let err = provider.embed("text").await.unwrap_err();
        assert!(matches!(err, ApiClientError::InvalidResponse(_)));
    }
}
