//! Embedding client for hosted and local model servers

use super::{EmbeddingProvider, LLMProvider, ProviderConfig, ProviderError, ProviderResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Client for interacting with LLM APIs to generate embeddings
pub struct EmbeddingClient {
    client: Client,
    config: ProviderConfig,
    api_base_url: String,
}

impl EmbeddingClient {
    /// Create a new embedding client based on configuration
    pub fn new(config: &ProviderConfig) -> ProviderResult<Self> {
        if config.provider == LLMProvider::Local {
            return Err(ProviderError::ConfigError(
                "Local embeddings use HashEmbedder, not an HTTP client".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::ConfigError(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            api_base_url: config.base_url(),
        })
    }

    async fn openai_embedding(&self, text: &str) -> ProviderResult<Vec<f32>> {
        #[derive(Serialize)]
        struct OpenAIRequest<'a> {
            input: &'a str,
            model: &'a str,
        }

        #[derive(Deserialize)]
        struct OpenAIResponse {
            data: Vec<OpenAIData>,
        }

        #[derive(Deserialize)]
        struct OpenAIData {
            embedding: Vec<f32>,
        }

        let api_key = self.config.require_api_key()?;

        let url = format!("{}/embeddings", self.api_base_url);
        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&OpenAIRequest {
                input: text,
                model: &self.config.model,
            })
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !resp.status().is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(format!("OpenAI returned error: {}", error_text)));
        }

        let result: OpenAIResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::SerializationError(e.to_string()))?;
        result
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| ProviderError::ApiError("OpenAI returned no embedding".to_string()))
    }

    async fn ollama_embedding(&self, text: &str) -> ProviderResult<Vec<f32>> {
        #[derive(Serialize)]
        struct OllamaRequest<'a> {
            model: &'a str,
            prompt: &'a str,
        }

        #[derive(Deserialize)]
        struct OllamaResponse {
            embedding: Vec<f32>,
        }

        let url = format!("{}/api/embeddings", self.api_base_url);
        let resp = self
            .client
            .post(&url)
            .json(&OllamaRequest {
                model: &self.config.model,
                prompt: text,
            })
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !resp.status().is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(format!("Ollama returned error: {}", error_text)));
        }

        let result: OllamaResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::SerializationError(e.to_string()))?;
        Ok(result.embedding)
    }

    async fn gemini_embedding(&self, text: &str) -> ProviderResult<Vec<f32>> {
        #[derive(Serialize)]
        struct GeminiRequest<'a> {
            model: String,
            content: GeminiContent<'a>,
        }

        #[derive(Serialize)]
        struct GeminiContent<'a> {
            parts: Vec<GeminiPart<'a>>,
        }

        #[derive(Serialize)]
        struct GeminiPart<'a> {
            text: &'a str,
        }

        #[derive(Deserialize)]
        struct GeminiResponse {
            embedding: GeminiEmbedding,
        }

        #[derive(Deserialize)]
        struct GeminiEmbedding {
            values: Vec<f32>,
        }

        let api_key = self.config.require_api_key()?;

        let url = format!(
            "{}/models/{}:embedContent?key={}",
            self.api_base_url, self.config.model, api_key
        );

        let resp = self
            .client
            .post(&url)
            .json(&GeminiRequest {
                model: format!("models/{}", self.config.model),
                content: GeminiContent {
                    parts: vec![GeminiPart { text }],
                },
            })
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !resp.status().is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(format!("Gemini returned error: {}", error_text)));
        }

        let result: GeminiResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::SerializationError(e.to_string()))?;
        Ok(result.embedding.values)
    }
}

#[async_trait]
impl EmbeddingProvider for EmbeddingClient {
    async fn embed(&self, text: &str) -> ProviderResult<Vec<f32>> {
        debug!(provider = ?self.config.provider, chars = text.len(), "requesting embedding");
        match self.config.provider {
            LLMProvider::OpenAI => self.openai_embedding(text).await,
            LLMProvider::Ollama => self.ollama_embedding(text).await,
            LLMProvider::Gemini => self.gemini_embedding(text).await,
            LLMProvider::Local => Err(ProviderError::ConfigError(
                "Local provider has no HTTP endpoint".to_string(),
            )),
        }
    }
}
