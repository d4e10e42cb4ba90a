//! Ingestion pipeline
//!
//! Populates a `KnowledgeGraph` from validated records in strict stage
//! order: papers, events, policies, then derived paper/event links. Each
//! record is embedded, upserted with its embedding, and (for events and
//! policies) linked to a `Location` entity.
//!
//! The run is fail-fast: the first provider error aborts it and leaves the
//! mutations already applied in place. Embedding calls may run with bounded
//! parallelism, but results are always applied in record order.

pub mod inference;
pub mod records;
pub mod text;

use crate::graph::{EntityAttributes, EntityId, EntityKind, GraphError};
use crate::knowledge::KnowledgeGraph;
use crate::provider::{EmbeddingProvider, ProviderError};
use futures::stream::{self, StreamExt};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

pub use inference::{MarkerCooccurrence, MarkerGroup, RelationInference};
pub use records::{EventRecord, IngestRecord, PaperRecord, PolicyRecord};

/// Pipeline stage, reported on failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStage {
    Papers,
    Events,
    Policies,
}

impl fmt::Display for IngestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IngestStage::Papers => "papers",
            IngestStage::Events => "events",
            IngestStage::Policies => "policies",
        };
        f.write_str(name)
    }
}

impl From<EntityKind> for IngestStage {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Paper => IngestStage::Papers,
            EntityKind::Event => IngestStage::Events,
            // Locations are never ingested directly
            EntityKind::Policy | EntityKind::Location => IngestStage::Policies,
        }
    }
}

/// Ingestion errors
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Embedding failed during {stage} at {record}: {source}")]
    Provider {
        stage: IngestStage,
        record: EntityId,
        #[source]
        source: ProviderError,
    },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type IngestResult<T> = Result<T, IngestError>;

/// Ingestion tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Maximum embedding calls in flight per stage
    pub embed_concurrency: usize,
    /// Whether to derive paper/event links after the record stages
    pub derive_links: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            embed_concurrency: 1,
            derive_links: true,
        }
    }
}

/// What one run added to the graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub papers: usize,
    pub events: usize,
    pub policies: usize,
    /// Location entities created by this run
    pub locations: usize,
    /// All relationships appended, derived links included
    pub relationships: usize,
    pub derived_links: usize,
}

pub struct IngestPipeline {
    config: IngestConfig,
    inference: Box<dyn RelationInference>,
}

impl Default for IngestPipeline {
    fn default() -> Self {
        Self::new(IngestConfig::default())
    }
}

impl IngestPipeline {
    pub fn new(config: IngestConfig) -> Self {
        Self {
            config,
            inference: Box::new(MarkerCooccurrence::default()),
        }
    }

    /// Replace the paper/event link rule
    pub fn with_inference(mut self, inference: Box<dyn RelationInference>) -> Self {
        self.inference = inference;
        self
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Run all stages against `graph`
    pub async fn ingest(
        &self,
        graph: &mut KnowledgeGraph,
        papers: &[PaperRecord],
        events: &[EventRecord],
        policies: &[PolicyRecord],
        embedder: &dyn EmbeddingProvider,
    ) -> IngestResult<IngestReport> {
        info!(
            papers = papers.len(),
            events = events.len(),
            policies = policies.len(),
            "Starting ingestion"
        );
        let mut report = IngestReport::default();

        let paper_texts = self.ingest_stage(graph, papers, embedder, &mut report).await?;
        report.papers = papers.len();

        let event_texts = self.ingest_stage(graph, events, embedder, &mut report).await?;
        report.events = events.len();

        self.ingest_stage(graph, policies, embedder, &mut report).await?;
        report.policies = policies.len();

        if self.config.derive_links {
            self.derive_links(graph, &paper_texts, &event_texts, &mut report);
        }

        info!(
            locations = report.locations,
            relationships = report.relationships,
            derived_links = report.derived_links,
            "Ingestion complete"
        );
        Ok(report)
    }

    /// Embed and apply one record collection, returning each distinct id
    /// with its canonical text (last occurrence wins)
    async fn ingest_stage<R: IngestRecord>(
        &self,
        graph: &mut KnowledgeGraph,
        records: &[R],
        embedder: &dyn EmbeddingProvider,
        report: &mut IngestReport,
    ) -> IngestResult<Vec<(EntityId, String)>> {
        let stage = IngestStage::from(R::KIND);
        info!(%stage, count = records.len(), "Ingesting stage");

        let texts: Vec<String> = records.iter().map(R::canonical_text).collect();
        let mut embedded = stream::iter(records.iter().zip(texts.iter()))
            .map(move |(record, text)| async move { (record, text, embedder.embed(text).await) })
            .buffered(self.config.embed_concurrency.max(1));

        let mut seen: IndexMap<EntityId, String> = IndexMap::new();
        while let Some((record, text, result)) = embedded.next().await {
            let id = record.entity_id();
            let vector = match result {
                Ok(vector) => vector,
                Err(source) => {
                    warn!(%stage, record = %id, error = %source, "Aborting ingestion");
                    return Err(IngestError::Provider { stage, record: id, source });
                }
            };

            debug!(record = %id, dims = vector.len(), "Applying record");
            graph.upsert_entity(id.clone(), record.attributes());
            graph.upsert_embedding(id.clone(), vector)?;

            if let Some((region, relation)) = record.location_link() {
                self.link_location(graph, &id, region, relation, report);
            }

            seen.insert(id, text.clone());
        }

        Ok(seen.into_iter().collect())
    }

    fn link_location(
        &self,
        graph: &mut KnowledgeGraph,
        source: &EntityId,
        region: &str,
        relation: &'static str,
        report: &mut IngestReport,
    ) {
        let region = region.trim();
        if region.is_empty() {
            return;
        }

        let location = EntityId::new(EntityKind::Location, region);
        if !graph.graph().has_entity(&location) {
            report.locations += 1;
        }
        graph.upsert_entity(location.clone(), EntityAttributes::new().with_name(region));
        graph.add_relationship(source.clone(), location, relation);
        report.relationships += 1;
    }

    fn derive_links(
        &self,
        graph: &mut KnowledgeGraph,
        papers: &[(EntityId, String)],
        events: &[(EntityId, String)],
        report: &mut IngestReport,
    ) {
        for (paper_id, paper_text) in papers {
            for (event_id, event_text) in events {
                if let Some(kind) = self.inference.infer(paper_text, event_text) {
                    debug!(paper = %paper_id, event = %event_id, %kind, "Derived link");
                    graph.add_relationship(paper_id.clone(), event_id.clone(), kind);
                    report.derived_links += 1;
                    report.relationships += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::HashEmbedder;

    fn event(id: &str, name: &str, region: Option<&str>) -> EventRecord {
        EventRecord {
            external_id: id.to_string(),
            name: name.to_string(),
            description: None,
            start_time: None,
            end_time: None,
            region: region.map(str::to_string),
            asset_type: None,
            severity: Some(0.9),
        }
    }

    #[tokio::test]
    async fn test_single_event_scenario() {
        let mut graph = KnowledgeGraph::default();
        let embedder = HashEmbedder::new(32).unwrap();

        let report = IngestPipeline::default()
            .ingest(&mut graph, &[], &[event("event", "Storm", Some("X"))], &[], &embedder)
            .await
            .unwrap();

        assert_eq!(report.events, 1);
        assert_eq!(report.locations, 1);
        assert_eq!(report.relationships, 1);
        assert_eq!(graph.graph().entity_count(), 2);

        let id = EntityId::new(EntityKind::Event, "event");
        let m = graph.metrics().get(&id).unwrap();
        assert_eq!(m.degree, 1);
        assert!((m.risk_score - 0.95).abs() < 1e-12);

        // Locations are graph-only
        assert_eq!(graph.embeddings().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_region_is_skipped() {
        let mut graph = KnowledgeGraph::default();
        let embedder = HashEmbedder::new(8).unwrap();

        let report = IngestPipeline::default()
            .ingest(&mut graph, &[], &[event("e", "Flood", Some("  "))], &[], &embedder)
            .await
            .unwrap();

        assert_eq!(report.locations, 0);
        assert_eq!(graph.graph().relationship_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_records_yield_one_derived_link() {
        let mut graph = KnowledgeGraph::default();
        let embedder = HashEmbedder::new(16).unwrap();
        let paper = PaperRecord {
            id: "p".to_string(),
            title: "Flood defences".to_string(),
            summary: None,
            published: None,
        };

        let report = IngestPipeline::default()
            .ingest(
                &mut graph,
                &[paper.clone(), paper],
                &[event("e", "River flood", None)],
                &[],
                &embedder,
            )
            .await
            .unwrap();

        assert_eq!(report.papers, 2);
        assert_eq!(report.derived_links, 1);
    }
}
