//! Configuration
//!
//! One YAML document covers both providers, ingestion, retrieval and the
//! risk blend. Every section has defaults, so an empty document is valid
//! and runs fully offline. API keys may be overlaid from the environment.

use crate::algo::{RiskWeights, WeightsError};
use crate::ingest::IngestConfig;
use crate::provider::{LLMProvider, ProviderConfig, ProviderError};
use crate::rag::RagConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const EMBEDDING_API_KEY_ENV: &str = "RISKGRAPH_EMBEDDING_API_KEY";
pub const GENERATION_API_KEY_ENV: &str = "RISKGRAPH_GENERATION_API_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid risk weights: {0}")]
    Weights(#[from] WeightsError),

    #[error("Invalid setting: {0}")]
    Invalid(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskGraphConfig {
    pub embedding: ProviderConfig,
    pub generation: ProviderConfig,
    pub ingest: IngestConfig,
    pub rag: RagConfig,
    pub risk: RiskWeights,
}

impl Default for RiskGraphConfig {
    fn default() -> Self {
        Self {
            embedding: ProviderConfig::local(256),
            generation: ProviderConfig::default(),
            ingest: IngestConfig::default(),
            rag: RagConfig::default(),
            risk: RiskWeights::default(),
        }
    }
}

impl RiskGraphConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading config");
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Overlay API keys from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Overlay API keys from an arbitrary variable lookup
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(EMBEDDING_API_KEY_ENV).filter(|k| !k.is_empty()) {
            self.embedding.api_key = Some(key);
        }
        if let Some(key) = lookup(GENERATION_API_KEY_ENV).filter(|k| !k.is_empty()) {
            self.generation.api_key = Some(key);
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.risk.validate()?;

        if self.ingest.embed_concurrency == 0 {
            return Err(ConfigError::Invalid("ingest.embed_concurrency must be at least 1".to_string()));
        }
        if self.rag.top_k == 0 {
            return Err(ConfigError::Invalid("rag.top_k must be at least 1".to_string()));
        }
        if self.embedding.provider == LLMProvider::Local && self.embedding.dimensions == 0 {
            return Err(ConfigError::Invalid("embedding.dimensions must be at least 1".to_string()));
        }
        if self.generation.provider == LLMProvider::Local {
            return Err(ConfigError::Invalid(
                "generation.provider cannot be Local".to_string(),
            ));
        }
        Ok(())
    }
}
