//! Retrieval-augmented generation over the knowledge graph
//!
//! `answer` embeds the question, ranks stored embeddings by cosine
//! similarity, resolves the hits to entities and asks the generator to
//! answer from that context. `summarize` does the same for one entity and
//! its direct neighbors, without ranking.

pub mod context;
pub mod prompt;

use crate::graph::EntityId;
use crate::knowledge::KnowledgeGraph;
use crate::provider::{EmbeddingProvider, ProviderError, TextGenerator};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use context::{context_block, ContextItem};

/// Returned in place of an answer when a provider call fails
pub const FALLBACK_MESSAGE: &str =
    "The language model is unavailable right now, so no answer could be generated. Please try again later.";

/// Returned when there is nothing to retrieve
pub const NO_CONTEXT_MESSAGE: &str =
    "The knowledge graph is empty. Ingest papers, events or policies before asking questions.";

/// RAG errors
#[derive(Error, Debug)]
pub enum RagError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Entity {0} not found")]
    NotFound(EntityId),

    #[error("Context serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type RagResult<T> = Result<T, RagError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnswerStatus {
    Generated,
    NoContext,
    ProviderFailure,
}

/// Generated text plus the context it was conditioned on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RagAnswer {
    pub answer: String,
    /// Ordered by descending similarity for `answer`; entity first for `summarize`
    pub contexts: Vec<ContextItem>,
    pub status: AnswerStatus,
}

impl RagAnswer {
    pub fn no_context() -> Self {
        Self {
            answer: NO_CONTEXT_MESSAGE.to_string(),
            contexts: Vec::new(),
            status: AnswerStatus::NoContext,
        }
    }

    pub fn provider_failure() -> Self {
        Self {
            answer: FALLBACK_MESSAGE.to_string(),
            contexts: Vec::new(),
            status: AnswerStatus::ProviderFailure,
        }
    }
}

/// Retrieval settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    /// Hits retrieved when the caller passes `k = 0`
    pub top_k: usize,
    /// Summary length cap per context item, in chars
    pub summary_chars: Option<usize>,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            top_k: 8,
            summary_chars: Some(600),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RagOrchestrator {
    config: RagConfig,
}

impl RagOrchestrator {
    pub fn new(config: RagConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Answer `question` from the `k` most similar entities
    ///
    /// An empty embedding index short-circuits without calling either
    /// provider. Index hits that no longer resolve to an entity are dropped.
    pub async fn answer(
        &self,
        graph: &KnowledgeGraph,
        question: &str,
        k: usize,
        embedder: &dyn EmbeddingProvider,
        generator: &dyn TextGenerator,
    ) -> RagResult<RagAnswer> {
        if graph.embeddings().is_empty() {
            debug!("Embedding index empty; skipping retrieval");
            return Ok(RagAnswer::no_context());
        }

        let k = if k == 0 { self.config.top_k } else { k };
        let query = embedder.embed(question).await?;
        let hits = graph.embeddings().top_k(&query, k);

        let contexts: Vec<ContextItem> = hits
            .iter()
            .filter_map(|hit| {
                graph
                    .get_entity(&hit.id)
                    .map(|entity| ContextItem::from_entity(entity, Some(hit.score), self.config.summary_chars))
            })
            .collect();
        info!(k, hits = hits.len(), resolved = contexts.len(), "Retrieved context");

        let prompt = prompt::answer_prompt(question, &context_block(&contexts)?);
        let answer = generator.generate(&prompt).await?;

        Ok(RagAnswer {
            answer,
            contexts,
            status: AnswerStatus::Generated,
        })
    }

    /// Summarize one entity in the light of its direct neighbors
    pub async fn summarize(
        &self,
        graph: &KnowledgeGraph,
        id: &EntityId,
        generator: &dyn TextGenerator,
    ) -> RagResult<RagAnswer> {
        let entity = graph
            .get_entity(id)
            .ok_or_else(|| RagError::NotFound(id.clone()))?;

        let mut contexts = vec![ContextItem::from_entity(entity, None, self.config.summary_chars)];
        contexts.extend(
            graph
                .graph()
                .neighbors(id)
                .into_iter()
                .map(|n| ContextItem::from_entity(n, None, self.config.summary_chars)),
        );
        info!(entity = %id, neighbors = contexts.len() - 1, "Summarizing entity");

        let prompt = prompt::summary_prompt(entity.title(), &context_block(&contexts)?);
        let answer = generator.generate(&prompt).await?;

        Ok(RagAnswer {
            answer,
            contexts,
            status: AnswerStatus::Generated,
        })
    }
}
