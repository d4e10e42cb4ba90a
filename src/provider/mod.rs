//! Model providers
//!
//! The core only ever sees two async capabilities: turning text into an
//! embedding and turning a prompt into text. HTTP clients for hosted and
//! local model servers implement them, as does the offline `HashEmbedder`.

pub mod embedding;
pub mod generation;
pub mod local;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

pub use embedding::EmbeddingClient;
pub use generation::GenerationClient;
pub use local::HashEmbedder;

/// Provider errors
#[derive(Error, Debug)]
pub enum ProviderError {
    /// API error from the model provider (non-success response)
    #[error("LLM API error: {0}")]
    ApiError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Text -> embedding capability
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> ProviderResult<Vec<f32>>;
}

/// Prompt -> text capability
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> ProviderResult<String>;
}

/// Supported model providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LLMProvider {
    OpenAI,
    Ollama,
    Gemini,
    /// In-process feature hashing (embeddings only)
    Local,
}

impl LLMProvider {
    fn default_base_url(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "https://api.openai.com/v1",
            LLMProvider::Ollama => "http://localhost:11434",
            LLMProvider::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            LLMProvider::Local => "",
        }
    }
}

/// Configuration for one provider endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// The provider to use
    pub provider: LLMProvider,
    /// Model name (e.g., "text-embedding-3-small", "llama3")
    pub model: String,
    /// API Key (optional, can be loaded from env if None)
    pub api_key: Option<String>,
    /// API Base URL (defaults per provider)
    pub api_base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// System prompt for generation
    pub system_prompt: Option<String>,
    /// Vector dimension for the `Local` embedder
    pub dimensions: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::Ollama,
            model: "llama3".to_string(),
            api_key: None,
            api_base_url: None,
            timeout_secs: 60,
            system_prompt: None,
            dimensions: 256,
        }
    }
}

impl ProviderConfig {
    /// Offline embedding configuration
    pub fn local(dimensions: usize) -> Self {
        Self {
            provider: LLMProvider::Local,
            model: "feature-hash".to_string(),
            dimensions,
            ..Default::default()
        }
    }

    pub(crate) fn base_url(&self) -> String {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| self.provider.default_base_url().to_string())
            .trim_end_matches('/')
            .to_string()
    }

    pub(crate) fn require_api_key(&self) -> ProviderResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ProviderError::ConfigError(format!("{:?} requires API key", self.provider)))
    }
}

/// Build the embedding provider described by `config`
pub fn build_embedder(config: &ProviderConfig) -> ProviderResult<Arc<dyn EmbeddingProvider>> {
    match config.provider {
        LLMProvider::Local => Ok(Arc::new(HashEmbedder::new(config.dimensions)?)),
        _ => Ok(Arc::new(EmbeddingClient::new(config)?)),
    }
}

/// Build the text generator described by `config`
pub fn build_generator(config: &ProviderConfig) -> ProviderResult<Arc<dyn TextGenerator>> {
    Ok(Arc::new(GenerationClient::new(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_defaults_and_overrides() {
        let config = ProviderConfig::default();
        assert_eq!(config.base_url(), "http://localhost:11434");

        let custom = ProviderConfig {
            api_base_url: Some("http://models.internal:8080/".to_string()),
            ..Default::default()
        };
        assert_eq!(custom.base_url(), "http://models.internal:8080");
    }

    #[test]
    fn test_require_api_key() {
        let config = ProviderConfig {
            provider: LLMProvider::OpenAI,
            ..Default::default()
        };
        assert!(matches!(config.require_api_key(), Err(ProviderError::ConfigError(_))));
    }

    #[test]
    fn test_build_local_embedder() {
        assert!(build_embedder(&ProviderConfig::local(64)).is_ok());
        assert!(build_embedder(&ProviderConfig::local(0)).is_err());
    }

    #[test]
    fn test_local_generator_is_rejected() {
        let result = build_generator(&ProviderConfig::local(64));
        assert!(matches!(result, Err(ProviderError::ConfigError(_))));
    }
}
