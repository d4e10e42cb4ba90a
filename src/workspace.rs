//! Session-level facade for a presentation layer
//!
//! Owns the knowledge graph together with the providers, the current
//! selection and the last answer. Provider failures during `answer` and
//! `summarize` are caught here and turned into a fixed fallback answer.

use crate::algo::MetricSnapshot;
use crate::config::{ConfigResult, RiskGraphConfig};
use crate::graph::{Entity, EntityId, GraphError, GraphResult};
use crate::ingest::{EventRecord, IngestPipeline, IngestReport, IngestResult, PaperRecord, PolicyRecord};
use crate::knowledge::KnowledgeGraph;
use crate::provider::{build_embedder, build_generator, EmbeddingProvider, TextGenerator};
use crate::rag::{RagAnswer, RagError, RagOrchestrator, RagResult};
use std::sync::Arc;
use tracing::{info, warn};

pub struct Workspace {
    graph: KnowledgeGraph,
    pipeline: IngestPipeline,
    rag: RagOrchestrator,
    embedder: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn TextGenerator>,
    selected: Option<EntityId>,
    last_answer: Option<RagAnswer>,
}

impl Workspace {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            graph: KnowledgeGraph::default(),
            pipeline: IngestPipeline::default(),
            rag: RagOrchestrator::default(),
            embedder,
            generator,
            selected: None,
            last_answer: None,
        }
    }

    /// Build providers and tuning from a validated configuration
    pub fn from_config(config: &RiskGraphConfig) -> ConfigResult<Self> {
        config.validate()?;
        let embedder = build_embedder(&config.embedding)?;
        let generator = build_generator(&config.generation)?;

        Ok(Self {
            graph: KnowledgeGraph::new(config.risk),
            pipeline: IngestPipeline::new(config.ingest.clone()),
            rag: RagOrchestrator::new(config.rag.clone()),
            ..Self::new(embedder, generator)
        })
    }

    pub fn with_pipeline(mut self, pipeline: IngestPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn with_rag(mut self, rag: RagOrchestrator) -> Self {
        self.rag = rag;
        self
    }

    pub async fn ingest(
        &mut self,
        papers: &[PaperRecord],
        events: &[EventRecord],
        policies: &[PolicyRecord],
    ) -> IngestResult<IngestReport> {
        let embedder = Arc::clone(&self.embedder);
        self.pipeline
            .ingest(&mut self.graph, papers, events, policies, embedder.as_ref())
            .await
    }

    /// Answer a question; `k = 0` uses the configured default
    pub async fn answer(&mut self, question: &str, k: usize) -> RagResult<RagAnswer> {
        let result = self
            .rag
            .answer(&self.graph, question, k, self.embedder.as_ref(), self.generator.as_ref())
            .await;
        self.settle(result)
    }

    /// Summarize an entity and its neighbors; unknown ids are an error
    pub async fn summarize(&mut self, id: &EntityId) -> RagResult<RagAnswer> {
        let result = self.rag.summarize(&self.graph, id, self.generator.as_ref()).await;
        self.settle(result)
    }

    fn settle(&mut self, result: RagResult<RagAnswer>) -> RagResult<RagAnswer> {
        let answer = match result {
            Ok(answer) => answer,
            Err(RagError::Provider(e)) => {
                warn!(error = %e, "Provider failed; returning fallback answer");
                RagAnswer::provider_failure()
            }
            Err(e) => return Err(e),
        };
        self.last_answer = Some(answer.clone());
        Ok(answer)
    }

    /// Clear the graph, the selection and the last answer together
    pub fn reset(&mut self) -> &MetricSnapshot {
        info!("Resetting workspace");
        self.selected = None;
        self.last_answer = None;
        self.graph.reset()
    }

    pub fn select(&mut self, id: &EntityId) -> GraphResult<&Entity> {
        let entity = self
            .graph
            .get_entity(id)
            .ok_or_else(|| GraphError::EntityNotFound(id.clone()))?;
        self.selected = Some(id.clone());
        Ok(entity)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Entity> {
        self.selected.as_ref().and_then(|id| self.graph.get_entity(id))
    }

    pub fn last_answer(&self) -> Option<&RagAnswer> {
        self.last_answer.as_ref()
    }

    pub fn graph(&self) -> &KnowledgeGraph {
        &self.graph
    }

    pub fn metrics(&self) -> &MetricSnapshot {
        self.graph.metrics()
    }
}
