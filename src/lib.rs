//! RiskGraph
//!
//! An in-memory knowledge graph of papers, events, policies and locations
//! with per-entity embeddings, structural risk metrics and graph-grounded
//! retrieval-augmented generation.
//!
//! # Architecture
//!
//! - `vector`: cosine math and an exact top-k embedding index
//! - `graph`: entities, relationships and the in-memory store
//! - `algo`: degree centrality and the composite risk score, on top of the
//!   `riskgraph-algorithms` kernels
//! - `knowledge`: owned graph + index + eagerly rebuilt metric snapshot
//! - `ingest`: record stages, location linkage and derived links
//! - `rag`: retrieval, context assembly and prompting
//! - `provider`: embedding and generation capabilities (HTTP or offline)
//! - `workspace`: the surface a presentation layer drives
//!
//! ## Example Usage
//!
//! ```rust
//! use riskgraph::graph::{EntityAttributes, EntityId, EntityKind, RelationKind};
//! use riskgraph::KnowledgeGraph;
//!
//! let mut kg = KnowledgeGraph::default();
//! let event = EntityId::new(EntityKind::Event, "uri");
//! let texas = EntityId::new(EntityKind::Location, "Texas");
//!
//! kg.upsert_entity(event.clone(), EntityAttributes::new().with_severity(0.9));
//! kg.upsert_entity(texas.clone(), EntityAttributes::new().with_name("Texas"));
//! let metrics = kg.add_relationship(event.clone(), texas, RelationKind::OCCURS_IN);
//!
//! let risk = metrics.get(&event).unwrap().risk_score;
//! assert!((risk - 0.95).abs() < 1e-12);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod graph;
pub mod ingest;
pub mod knowledge;
pub mod provider;
pub mod rag;
pub mod vector;
pub mod workspace;

// Re-export main types for convenience
pub use graph::{
    Entity, EntityAttributes, EntityId, EntityKind, GraphError, GraphResult, GraphStore,
    RelationKind, Relationship,
};

pub use vector::{cosine_similarity, EmbeddingIndex, ScoredEntity};

pub use algo::{compute_snapshot, EntityMetrics, MetricSnapshot, RiskWeights};

pub use knowledge::KnowledgeGraph;

pub use ingest::{
    EventRecord, IngestConfig, IngestError, IngestPipeline, IngestReport, IngestResult,
    PaperRecord, PolicyRecord, RelationInference,
};

pub use rag::{AnswerStatus, ContextItem, RagAnswer, RagConfig, RagError, RagOrchestrator, RagResult};

pub use provider::{
    EmbeddingProvider, HashEmbedder, LLMProvider, ProviderConfig, ProviderError, ProviderResult,
    TextGenerator,
};

pub use config::{ConfigError, ConfigResult, RiskGraphConfig};

pub use workspace::Workspace;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
